//! Step validation
//!
//! Pure predicates over [`FormData`]; no UI state is consulted so the rules can
//! be exercised directly.

use super::types::FormData;

pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_TARGET_PROJECT_LENGTH: usize = 2;

/// Whether `step` may be left in the forward direction with `form` as entered.
/// Step 0 does not exist; steps past the table selection (e.g. a review step)
/// carry no rules of their own.
pub fn is_step_valid(step: u8, form: &FormData) -> bool {
    step_validation_message(step, form).is_none() && step != 0
}

/// First reason `step` is incomplete, phrased for the user
pub fn step_validation_message(step: u8, form: &FormData) -> Option<String> {
    match step {
        0 => Some("Unknown step".to_string()),
        1 => {
            if form.name.chars().count() < MIN_NAME_LENGTH {
                Some(format!(
                    "Migration name must be at least {} characters",
                    MIN_NAME_LENGTH
                ))
            } else {
                None
            }
        }
        2 => {
            if is_blank(&form.source_host) {
                Some("Source host is required".to_string())
            } else if is_blank(&form.source_database) {
                Some("Source database is required".to_string())
            } else if is_blank(&form.source_username) {
                Some("Source username is required".to_string())
            } else {
                None
            }
        }
        3 => {
            if form.target_project.chars().count() < MIN_TARGET_PROJECT_LENGTH {
                Some(format!(
                    "Target project must be at least {} characters",
                    MIN_TARGET_PROJECT_LENGTH
                ))
            } else {
                None
            }
        }
        4 => {
            if form.selected_tables.is_empty() {
                Some("Select at least one table to migrate".to_string())
            } else {
                None
            }
        }
        _ => None,
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> FormData {
        let mut form = FormData::default();
        form.name = "Legacy CRM".to_string();
        form.source_host = "sql01".to_string();
        form.source_database = "crm".to_string();
        form.source_username = "svc_migrate".to_string();
        form.target_project = "warehouse".to_string();
        form.selected_tables = vec!["accounts".to_string()];
        form
    }

    #[test]
    fn test_step1_name_length() {
        let mut form = FormData::default();
        assert!(!is_step_valid(1, &form));

        form.name = "ab".to_string();
        assert!(!is_step_valid(1, &form));

        form.name = "abc".to_string();
        assert!(is_step_valid(1, &form));

        // Counted in characters, not bytes
        form.name = "éé".to_string();
        assert!(!is_step_valid(1, &form));
    }

    #[test]
    fn test_step2_password_optional() {
        let mut form = complete_form();
        form.source_password.clear();
        assert!(is_step_valid(2, &form));

        form.source_username = "   ".to_string();
        assert!(!is_step_valid(2, &form));
        assert_eq!(
            step_validation_message(2, &form).as_deref(),
            Some("Source username is required")
        );

        form.source_username = "sa".to_string();
        form.source_host.clear();
        assert_eq!(
            step_validation_message(2, &form).as_deref(),
            Some("Source host is required")
        );
    }

    #[test]
    fn test_step3_target_project() {
        let mut form = complete_form();
        form.target_project = "x".to_string();
        assert!(!is_step_valid(3, &form));
        form.target_project = "xy".to_string();
        assert!(is_step_valid(3, &form));
    }

    #[test]
    fn test_step4_requires_selection() {
        let mut form = complete_form();
        assert!(is_step_valid(4, &form));
        form.selected_tables.clear();
        assert!(!is_step_valid(4, &form));
    }

    #[test]
    fn test_out_of_range_steps() {
        let form = FormData::default();
        assert!(!is_step_valid(0, &form));
        assert!(is_step_valid(5, &form));
    }

    #[test]
    fn test_message_agrees_with_predicate() {
        let forms = [FormData::default(), complete_form()];
        for form in &forms {
            for step in 1..=4 {
                assert_eq!(
                    step_validation_message(step, form).is_none(),
                    is_step_valid(step, form),
                    "step {}",
                    step
                );
                // Deterministic: same inputs, same answer
                assert_eq!(is_step_valid(step, form), is_step_valid(step, form));
            }
        }
    }
}
