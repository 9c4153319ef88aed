//! Infrastructure Services
//!
//! - **api**: backend collaborator traits plus the HTTP and in-memory implementations
//! - **auth**: login state and session persistence
//! - **config**: wizard and API settings
//! - **errors**: common error types and handling utilities
//!
//! Async traits are declared without Send/Sync bounds since everything runs on
//! the browser's single thread.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
