//! Utility Functions and Cross-Cutting Concerns
//!
//! - **console_macros**: WASM-compatible logging macros for browser console output
//! - **display**: formatting helpers for badges, row counts and percentages
//! - **platform**: browser dialog and location helpers
//!
//! These utilities work the same in the WASM build and in native unit tests.

pub mod console_macros;
pub mod display;
pub mod platform;

pub use display::*;
pub use platform::*;
