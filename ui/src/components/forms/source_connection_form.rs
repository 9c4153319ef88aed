use dioxus::prelude::*;

use crate::components::display::ConnectionStatusDisplay;
use crate::components::inputs::{InputType, ValidatedInput};
use crate::wizard::{FormData, SourceField, WizardAction, WizardState};

#[derive(Props, PartialEq, Clone)]
pub struct SourceConnectionFormProps {
    pub state: Signal<WizardState>,
    pub dispatch: EventHandler<WizardAction>,
    pub show_errors: bool,
    pub on_test_connection: EventHandler<()>,
}

fn required_error(show: bool, required: bool, value: &str, label: &str) -> String {
    if show && required && value.trim().is_empty() {
        format!("Source {} is required", label.to_lowercase())
    } else {
        String::new()
    }
}

fn field_value(form: &FormData, field: SourceField) -> String {
    match field {
        SourceField::Host => form.source_host.clone(),
        SourceField::Port => form.source_port.clone(),
        SourceField::Database => form.source_database.clone(),
        SourceField::Username => form.source_username.clone(),
        SourceField::Password => form.source_password.clone(),
    }
}

#[component]
pub fn SourceConnectionForm(props: SourceConnectionFormProps) -> Element {
    let state = props.state;
    let dispatch = props.dispatch;
    let on_test_connection = props.on_test_connection;

    let (form, status, message, can_test) = {
        let s = state.read();
        (
            s.form_data().clone(),
            s.connection().status(),
            s.connection().message().unwrap_or_default().to_string(),
            s.connection().can_test(),
        )
    };
    let show = props.show_errors;

    let fields = [
        (SourceField::Host, "Host", "sql01.internal", InputType::Text, true),
        (SourceField::Port, "Port", "1433", InputType::Number, false),
        (SourceField::Database, "Database", "crm", InputType::Text, true),
        (SourceField::Username, "Username", "migration_reader", InputType::Text, true),
        (SourceField::Password, "Password", "", InputType::Password, false),
    ];

    rsx! {
        div {
            class: "wizard-form source-connection",

            h2 {
                class: "form-title",
                "Source Connection"
            }

            for (field, label, placeholder, input_type, required) in fields {
                ValidatedInput {
                    key: "{label}",
                    label: label.to_string(),
                    value: field_value(&form, field),
                    placeholder: placeholder.to_string(),
                    input_type: input_type,
                    error: required_error(show, required, &field_value(&form, field), label),
                    on_change: move |value: String| dispatch.call(WizardAction::SetSourceField(field, value))
                }
            }

            div {
                class: "button-section",
                button {
                    class: "secondary-button",
                    disabled: !can_test || form.source_host.trim().is_empty(),
                    onclick: move |_| on_test_connection.call(()),
                    if can_test { "Test Connection" } else { "Testing..." }
                }
                ConnectionStatusDisplay {
                    status: status,
                    message: message
                }
            }
        }
    }
}
