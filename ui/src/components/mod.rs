//! User Interface Components
//!
//! Reusable Dioxus components for the migration dashboard:
//!
//! - **forms**: one form per wizard step plus the login form
//! - **display**: step indicator, status badges, banners and loading indicators
//! - **inputs**: validated input fields and form controls
//!
//! Step forms take the wizard's `Signal<WizardState>` for reading and an
//! `EventHandler<WizardAction>` for every change.

pub mod display;
pub mod forms;
pub mod inputs;
