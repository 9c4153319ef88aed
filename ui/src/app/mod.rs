//! Page-level components
//!
//! - **migration_wizard**: the four-step "new migration" flow
//! - **migration_list**: the user's migrations with status and quality

pub mod migration_list;
pub mod migration_wizard;

pub use migration_list::MigrationList;
pub use migration_wizard::{MigrationWizard, MigrationWizardProps};
