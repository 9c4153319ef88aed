//! Input components for form validation and display

use dioxus::prelude::*;

#[derive(PartialEq, Clone, Debug)]
pub enum InputType {
    Text,
    Password,
    Email,
    Number,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
            InputType::Email => "email",
            InputType::Number => "number",
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ValidatedInputProps {
    pub label: String,
    pub value: String,
    #[props(default)]
    pub placeholder: String,
    #[props(default = InputType::Text)]
    pub input_type: InputType,
    /// Rendered under the field and marks it invalid when not empty
    #[props(default)]
    pub error: String,
    #[props(default)]
    pub disabled: bool,
    pub on_change: EventHandler<String>,
}

#[component]
pub fn ValidatedInput(props: ValidatedInputProps) -> Element {
    let input_class = if !props.error.is_empty() {
        "form-input input-invalid"
    } else {
        "form-input"
    };

    rsx! {
        div {
            class: "input-section",
            label {
                class: "input-label",
                "{props.label}"
            }
            input {
                class: "{input_class}",
                r#type: "{props.input_type.as_str()}",
                value: "{props.value}",
                placeholder: "{props.placeholder}",
                disabled: props.disabled,
                oninput: move |event| props.on_change.call(event.value())
            }
            if !props.error.is_empty() {
                ValidationMessage { message: props.error.clone() }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ValidationMessageProps {
    pub message: String,
}

#[component]
pub fn ValidationMessage(props: ValidationMessageProps) -> Element {
    rsx! {
        div {
            class: "validation-feedback invalid",
            "⚠ {props.message}"
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct CheckboxFieldProps {
    pub label: String,
    pub checked: bool,
    #[props(default)]
    pub disabled: bool,
    pub on_change: EventHandler<bool>,
}

#[component]
pub fn CheckboxField(props: CheckboxFieldProps) -> Element {
    rsx! {
        label {
            class: "checkbox-field",
            input {
                r#type: "checkbox",
                checked: props.checked,
                disabled: props.disabled,
                onchange: move |event| props.on_change.call(event.checked())
            }
            span { "{props.label}" }
        }
    }
}
