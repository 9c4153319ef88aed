//! This crate contains the shared UI and wizard logic for the data migration dashboard.

pub mod app;
pub use app::{MigrationList, MigrationWizard};

pub mod components;
pub mod services;
pub mod utils;
pub mod wizard;
