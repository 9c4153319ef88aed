use dioxus::prelude::*;

use crate::components::inputs::{CheckboxField, ValidatedInput};
use crate::wizard::{step_validation_message, WizardAction, WizardState};

#[derive(Props, PartialEq, Clone)]
pub struct TargetConfigFormProps {
    pub state: Signal<WizardState>,
    pub dispatch: EventHandler<WizardAction>,
    pub show_errors: bool,
}

#[component]
pub fn TargetConfigForm(props: TargetConfigFormProps) -> Element {
    let dispatch = props.dispatch;
    let form = props.state.read().form_data().clone();
    let project_error = if props.show_errors {
        step_validation_message(3, &form).unwrap_or_default()
    } else {
        String::new()
    };

    rsx! {
        div {
            class: "wizard-form target-config",

            h2 {
                class: "form-title",
                "Target Configuration"
            }

            ValidatedInput {
                label: "Target project".to_string(),
                value: form.target_project.clone(),
                placeholder: "analytics_warehouse".to_string(),
                error: project_error,
                on_change: move |value: String| dispatch.call(WizardAction::SetTargetProject(value))
            }

            ValidatedInput {
                label: "Schema".to_string(),
                value: form.target_schema.clone(),
                placeholder: "public".to_string(),
                on_change: move |value: String| dispatch.call(WizardAction::SetTargetSchema(value))
            }

            div {
                class: "options-section",
                CheckboxField {
                    label: "Generate data tests".to_string(),
                    checked: form.generate_tests,
                    on_change: move |checked: bool| dispatch.call(WizardAction::SetGenerateTests(checked))
                }
                CheckboxField {
                    label: "Generate documentation".to_string(),
                    checked: form.generate_docs,
                    on_change: move |checked: bool| dispatch.call(WizardAction::SetGenerateDocs(checked))
                }
            }
        }
    }
}
