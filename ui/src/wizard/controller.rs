use super::types::FormData;
use super::validation::is_step_valid;
use crate::services::config::{JumpPolicy, WizardConfig};

/// Result of a navigation request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepChange {
    Moved { from: u8, to: u8 },
    Unchanged,
}

impl StepChange {
    pub fn moved(&self) -> bool {
        matches!(self, StepChange::Moved { .. })
    }
}

/// Step state machine over `1..=total_steps`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WizardController {
    current_step: u8,
    furthest_step: u8,
    total_steps: u8,
    jump_policy: JumpPolicy,
}

impl WizardController {
    pub fn new(config: &WizardConfig) -> Self {
        Self {
            current_step: 1,
            furthest_step: 1,
            total_steps: config.effective_total_steps(),
            jump_policy: config.jump_policy,
        }
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn total_steps(&self) -> u8 {
        self.total_steps
    }

    /// Highest step reached through `next`
    pub fn furthest_step(&self) -> u8 {
        self.furthest_step
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.total_steps
    }

    /// Advance one step if the displayed step validates. On the last step this
    /// is a no-op; submitting is a separate action.
    pub fn next(&mut self, form: &FormData) -> StepChange {
        if self.is_last_step() || !is_step_valid(self.current_step, form) {
            return StepChange::Unchanged;
        }
        let from = self.current_step;
        self.current_step += 1;
        self.furthest_step = self.furthest_step.max(self.current_step);
        StepChange::Moved {
            from,
            to: self.current_step,
        }
    }

    /// Go back one step. Always allowed; form data is untouched.
    pub fn previous(&mut self) -> StepChange {
        if self.is_first_step() {
            return StepChange::Unchanged;
        }
        let from = self.current_step;
        self.current_step -= 1;
        StepChange::Moved {
            from,
            to: self.current_step,
        }
    }

    pub fn can_jump_to(&self, step: u8) -> bool {
        let limit = match self.jump_policy {
            JumpPolicy::UpToCurrent => self.current_step,
            JumpPolicy::FurthestReached => self.furthest_step,
        };
        (1..=limit).contains(&step)
    }

    /// Direct navigation from the step indicator
    pub fn jump_to(&mut self, step: u8) -> StepChange {
        if step == self.current_step || !self.can_jump_to(step) {
            return StepChange::Unchanged;
        }
        let from = self.current_step;
        self.current_step = step;
        StepChange::Moved { from, to: step }
    }

    /// Submit is offered only on the last step and only when it validates
    pub fn can_submit(&self, form: &FormData) -> bool {
        self.is_last_step() && is_step_valid(self.total_steps, form)
    }

    pub fn progress_percentage(&self) -> f64 {
        if self.total_steps <= 1 {
            return 100.0;
        }
        (self.current_step - 1) as f64 / (self.total_steps - 1) as f64 * 100.0
    }
}

pub fn step_title(step: u8) -> &'static str {
    match step {
        1 => "Basic Info",
        2 => "Source Connection",
        3 => "Target Configuration",
        4 => "Table Selection",
        _ => "Review",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> WizardController {
        WizardController::new(&WizardConfig::default())
    }

    fn form_valid_through(step: u8) -> FormData {
        let mut form = FormData::default();
        if step >= 1 {
            form.name = "abc".to_string();
        }
        if step >= 2 {
            form.source_host = "localhost".to_string();
            form.source_database = "app".to_string();
            form.source_username = "root".to_string();
        }
        if step >= 3 {
            form.target_project = "dw".to_string();
        }
        if step >= 4 {
            form.selected_tables = vec!["users".to_string()];
        }
        form
    }

    #[test]
    fn test_next_blocked_by_short_name() {
        let mut wizard = controller();
        let mut form = FormData::default();
        form.name = "ab".to_string();

        assert_eq!(wizard.next(&form), StepChange::Unchanged);
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn test_next_advances_with_valid_name() {
        let mut wizard = controller();
        let form = form_valid_through(1);

        assert_eq!(wizard.next(&form), StepChange::Moved { from: 1, to: 2 });
        assert_eq!(wizard.current_step(), 2);
        assert_eq!(wizard.furthest_step(), 2);
    }

    #[test]
    fn test_next_never_passes_total_steps() {
        let mut wizard = controller();
        let form = form_valid_through(4);
        for _ in 0..10 {
            wizard.next(&form);
        }
        assert_eq!(wizard.current_step(), 4);
        assert!(wizard.is_last_step());
        assert!(wizard.can_submit(&form));
    }

    #[test]
    fn test_previous_floors_at_one() {
        let mut wizard = controller();
        let form = form_valid_through(2);
        wizard.next(&form);
        wizard.next(&form);
        assert_eq!(wizard.current_step(), 3);

        assert!(wizard.previous().moved());
        assert!(wizard.previous().moved());
        assert_eq!(wizard.previous(), StepChange::Unchanged);
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn test_jump_up_to_current_policy() {
        let mut wizard = controller();
        let form = form_valid_through(3);
        wizard.next(&form);
        wizard.next(&form);
        assert_eq!(wizard.current_step(), 3);

        assert!(!wizard.can_jump_to(4));
        assert_eq!(wizard.jump_to(4), StepChange::Unchanged);
        assert_eq!(wizard.jump_to(1), StepChange::Moved { from: 3, to: 1 });

        // Reached step 3 earlier, but the conservative policy still refuses it
        assert!(!wizard.can_jump_to(3));
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.jump_to(0), StepChange::Unchanged);
    }

    #[test]
    fn test_jump_furthest_reached_policy() {
        let config = WizardConfig::default().with_jump_policy(JumpPolicy::FurthestReached);
        let mut wizard = WizardController::new(&config);
        let form = form_valid_through(3);
        wizard.next(&form);
        wizard.next(&form);
        wizard.jump_to(1);

        assert!(wizard.can_jump_to(3));
        assert!(!wizard.can_jump_to(4));
        assert_eq!(wizard.jump_to(3), StepChange::Moved { from: 1, to: 3 });
    }

    #[test]
    fn test_configurable_step_count() {
        let config = WizardConfig::default().with_total_steps(5);
        let mut wizard = WizardController::new(&config);
        let form = form_valid_through(4);
        for _ in 0..4 {
            assert!(wizard.next(&form).moved());
        }
        assert_eq!(wizard.current_step(), 5);
        assert_eq!(step_title(5), "Review");
        assert!(wizard.can_submit(&form));
        assert_eq!(wizard.progress_percentage(), 100.0);
    }

    #[test]
    fn test_single_step_wizard() {
        let config = WizardConfig::default().with_total_steps(1);
        let mut wizard = WizardController::new(&config);
        let form = form_valid_through(1);
        assert!(wizard.is_last_step());
        assert_eq!(wizard.next(&form), StepChange::Unchanged);
        assert!(wizard.can_submit(&form));
        assert_eq!(wizard.progress_percentage(), 100.0);
    }

    #[test]
    fn test_can_submit_requires_last_step() {
        let mut wizard = controller();
        let form = form_valid_through(4);
        assert!(!wizard.can_submit(&form));
        wizard.next(&form);
        wizard.next(&form);
        assert!((wizard.progress_percentage() - 200.0 / 3.0).abs() < 1e-9);
    }
}
