//! Browser helpers
//!
//! Thin wrappers over `web_sys::window()` that degrade to a harmless default
//! when no window exists (tests, server rendering).

use crate::console_warn;
use web_sys::window;

/// Ask the user to confirm with the native dialog. `false` without a window.
pub fn confirm_dialog(message: &str) -> bool {
    let Some(window) = window() else {
        console_warn!("[Platform] No window available, treating confirm as declined");
        return false;
    };
    window.confirm_with_message(message).unwrap_or(false)
}

/// The page's query string without the leading `?`, or empty
pub fn current_query_string() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .map(|search| search.trim_start_matches('?').to_string())
        .unwrap_or_default()
}
