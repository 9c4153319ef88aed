use dioxus::prelude::*;

use crate::components::inputs::ValidatedInput;
use crate::wizard::{step_validation_message, WizardAction, WizardState};

#[derive(Props, PartialEq, Clone)]
pub struct BasicInfoFormProps {
    pub state: Signal<WizardState>,
    pub dispatch: EventHandler<WizardAction>,
    /// Set once the user tried to leave the step with invalid data
    pub show_errors: bool,
}

#[component]
pub fn BasicInfoForm(props: BasicInfoFormProps) -> Element {
    let state = props.state;
    let dispatch = props.dispatch;
    let form = state.read().form_data().clone();
    let name_error = if props.show_errors {
        step_validation_message(1, &form).unwrap_or_default()
    } else {
        String::new()
    };

    rsx! {
        div {
            class: "wizard-form basic-info",

            h2 {
                class: "form-title",
                "Basic Information"
            }

            ValidatedInput {
                label: "Migration name".to_string(),
                value: form.name.clone(),
                placeholder: "e.g. Legacy CRM to warehouse".to_string(),
                error: name_error,
                on_change: move |value: String| dispatch.call(WizardAction::SetName(value))
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Description (optional)"
                }
                textarea {
                    class: "form-input",
                    rows: 3,
                    value: "{form.description}",
                    placeholder: "What is being migrated and why",
                    oninput: move |event| dispatch.call(WizardAction::SetDescription(event.value()))
                }
            }
        }
    }
}
