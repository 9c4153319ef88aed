pub mod connection_status_display;
pub mod error_banner;
pub mod loading_indicator;
pub mod status_badge;
pub mod step_indicator;

pub use connection_status_display::*;
pub use error_banner::*;
pub use loading_indicator::*;
pub use status_badge::*;
pub use step_indicator::*;
