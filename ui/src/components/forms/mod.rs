pub mod basic_info_form;
pub mod login_form;
pub mod source_connection_form;
pub mod table_selection_form;
pub mod target_config_form;

pub use basic_info_form::*;
pub use login_form::*;
pub use source_connection_form::*;
pub use table_selection_form::*;
pub use target_config_form::*;
