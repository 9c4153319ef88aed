use crate::console_warn;

/// Top-level configuration handed to the views at startup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub wizard: WizardConfig,
    pub api: ApiConfig,
}

/// How far the step indicator lets the user jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPolicy {
    /// Only steps at or before the one currently displayed
    #[default]
    UpToCurrent,
    /// Any step the user has already reached through `next`
    FurthestReached,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardConfig {
    pub total_steps: u8,
    pub jump_policy: JumpPolicy,
    pub default_target_schema: String,
    pub confirm_cancel_message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            total_steps: 4,
            jump_policy: JumpPolicy::UpToCurrent,
            default_target_schema: "public".to_string(),
            confirm_cancel_message:
                "Are you sure you want to cancel? All entered data will be lost.".to_string(),
        }
    }
}

impl WizardConfig {
    pub fn with_total_steps(mut self, total_steps: u8) -> Self {
        self.total_steps = total_steps.max(1);
        self
    }

    pub fn with_jump_policy(mut self, jump_policy: JumpPolicy) -> Self {
        self.jump_policy = jump_policy;
        self
    }

    /// Step count with the lower bound applied
    pub fn effective_total_steps(&self) -> u8 {
        self.total_steps.max(1)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "/api".to_string(),
            user_agent: "data-migration-wizard/1.0".to_string(),
        }
    }
}

/// `?api=memory` runs the dashboard against the in-process demo backend
pub const IN_MEMORY_API: &str = "memory";

impl ApiConfig {
    pub fn uses_in_memory_backend(&self) -> bool {
        self.base_url == IN_MEMORY_API
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl AppConfig {
    /// Apply overrides from a URL query string such as `?api=https%3A%2F%2Fx%2Fapi&jump=furthest&steps=5`.
    /// Values are percent-decoded. Unknown keys are ignored; malformed values are logged and skipped.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();

        let pairs = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes());
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "api" if !value.is_empty() => {
                    config.api.base_url = value.to_string();
                }
                "jump" => match value {
                    "furthest" => config.wizard.jump_policy = JumpPolicy::FurthestReached,
                    "current" => config.wizard.jump_policy = JumpPolicy::UpToCurrent,
                    other => console_warn!("[Config] Unknown jump policy '{}', keeping default", other),
                },
                "steps" => match value.parse::<u8>() {
                    Ok(steps) => config.wizard = config.wizard.with_total_steps(steps),
                    Err(_) => console_warn!("[Config] Ignoring invalid step count '{}'", value),
                },
                _ => {}
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_observed_wizard() {
        let config = AppConfig::default();
        assert_eq!(config.wizard.total_steps, 4);
        assert_eq!(config.wizard.jump_policy, JumpPolicy::UpToCurrent);
        assert_eq!(config.wizard.default_target_schema, "public");
    }

    #[test]
    fn test_memory_backend_selection() {
        assert!(!AppConfig::default().api.uses_in_memory_backend());
        assert!(AppConfig::from_query("api=memory").api.uses_in_memory_backend());
    }

    #[test]
    fn test_from_query_overrides() {
        let config = AppConfig::from_query("?api=https://example.com/v1/&jump=furthest&steps=5&x=1");
        assert_eq!(config.api.base_url, "https://example.com/v1/");
        assert_eq!(config.wizard.jump_policy, JumpPolicy::FurthestReached);
        assert_eq!(config.wizard.total_steps, 5);
        assert_eq!(
            config.api.endpoint("/migrations"),
            "https://example.com/v1/migrations"
        );
    }

    #[test]
    fn test_from_query_decodes_values() {
        let config = AppConfig::from_query("?api=https%3A%2F%2Fhost%2Fapi&jump=furthest");
        assert_eq!(config.api.base_url, "https://host/api");
        assert_eq!(config.api.endpoint("/tables"), "https://host/api/tables");
        assert_eq!(config.wizard.jump_policy, JumpPolicy::FurthestReached);
    }

    #[test]
    fn test_from_query_ignores_garbage() {
        let config = AppConfig::from_query("steps=lots&jump=sideways&noequals");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_total_steps_floor() {
        let wizard = WizardConfig::default().with_total_steps(0);
        assert_eq!(wizard.total_steps, 1);
        assert_eq!(wizard.effective_total_steps(), 1);
    }
}
