//! Data Migration Wizard
//!
//! Four-step wizard that collects everything needed to create a migration
//! project: basic info, source connection, target configuration and table
//! selection.
//!
//! # Architecture
//!
//! All state for one wizard instance lives in [`WizardState`]. Synchronous
//! edits go through [`WizardState::reduce_in_place`]; the three async
//! operations run as drivers that only touch the state through a
//! [`WizardStore`]:
//!
//! - **Connection test**: [`test_source_connection`]
//! - **Table listing**: [`load_table_catalog`]
//! - **Submission**: [`submit_migration`]
//!
//! Each driver holds a [`gate::Ticket`] while its request is pending. Only one
//! request per kind may be pending, and a result whose ticket went stale
//! (source edited, wizard cancelled, view closed) is dropped.
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = Rc::new(RefCell::new(WizardState::new(WizardConfig::default())));
//! store.borrow_mut().reduce_in_place(WizardAction::SetName("CRM".into()));
//! test_source_connection(&store, &api).await?;
//! ```

pub mod catalog;
pub mod connection_tester;
pub mod controller;
pub mod gate;
pub mod state;
pub mod store;
pub mod submission;
pub mod types;
pub mod validation;

pub use catalog::{load_table_catalog, TableCatalog, TableEntry};
pub use connection_tester::{test_source_connection, ConnectionTester};
pub use controller::{step_title, StepChange, WizardController};
pub use state::WizardState;
pub use store::WizardStore;
pub use submission::{submit_migration, SubmissionHandler};
pub use types::*;
pub use validation::{is_step_valid, step_validation_message};
