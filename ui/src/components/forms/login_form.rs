use dioxus::prelude::*;

use crate::components::display::ErrorBanner;
use crate::components::inputs::{InputType, ValidatedInput};
use crate::services::api::{ApiHandle, LoginCredentials, RegisterProfile, User};
use crate::services::auth::AuthStore;

#[derive(Clone, Copy, Debug, PartialEq)]
enum LoginMode {
    SignIn,
    Register,
}

#[derive(Props, PartialEq, Clone)]
pub struct LoginFormProps {
    pub auth: Signal<AuthStore>,
    pub api: ApiHandle,
    pub on_authenticated: EventHandler<User>,
}

/// Sign in or create an account
#[component]
pub fn LoginForm(props: LoginFormProps) -> Element {
    let mut auth = props.auth;
    let on_authenticated = props.on_authenticated;

    let mut mode = use_signal(|| LoginMode::SignIn);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut company = use_signal(String::new);
    let mut is_submitting = use_signal(|| false);

    let error = auth.read().error().map(str::to_string);
    let registering = mode() == LoginMode::Register;
    let ready = !email().trim().is_empty()
        && !password().is_empty()
        && (!registering || !name().trim().is_empty());

    let api = props.api.clone();
    let submit = move |_| {
        if is_submitting() {
            return;
        }
        is_submitting.set(true);
        let api = api.clone();
        let registering = mode() == LoginMode::Register;
        let credentials = LoginCredentials {
            email: email().trim().to_string(),
            password: password(),
        };
        let company_value = company().trim().to_string();
        let profile = RegisterProfile {
            name: name().trim().to_string(),
            email: credentials.email.clone(),
            password: credentials.password.clone(),
            company: (!company_value.is_empty()).then_some(company_value),
        };

        spawn(async move {
            let mut store = auth.peek().clone();
            let ok = if registering {
                store.register(api.api(), profile).await
            } else {
                store.login(api.api(), credentials).await
            };
            let user = store.user().cloned();
            auth.set(store);
            is_submitting.set(false);

            if let (true, Some(user)) = (ok, user) {
                password.set(String::new());
                on_authenticated.call(user);
            }
        });
    };

    rsx! {
        div {
            class: "auth-form",

            h2 {
                class: "form-title",
                if registering { "Create your account" } else { "Sign in" }
            }

            if let Some(message) = error {
                ErrorBanner {
                    message: message,
                    on_dismiss: move |_| auth.with_mut(|a| a.clear_error())
                }
            }

            if registering {
                ValidatedInput {
                    label: "Full name".to_string(),
                    value: name(),
                    on_change: move |value: String| name.set(value)
                }
            }

            ValidatedInput {
                label: "Email".to_string(),
                value: email(),
                placeholder: "you@company.com".to_string(),
                input_type: InputType::Email,
                on_change: move |value: String| email.set(value)
            }

            ValidatedInput {
                label: "Password".to_string(),
                value: password(),
                input_type: InputType::Password,
                on_change: move |value: String| password.set(value)
            }

            if registering {
                ValidatedInput {
                    label: "Company (optional)".to_string(),
                    value: company(),
                    on_change: move |value: String| company.set(value)
                }
            }

            div {
                class: "button-section",
                button {
                    class: "primary-button",
                    disabled: !ready || is_submitting(),
                    onclick: submit,
                    if is_submitting() {
                        "Please wait..."
                    } else if registering {
                        "Create account"
                    } else {
                        "Sign in"
                    }
                }
                button {
                    class: "link-button",
                    disabled: is_submitting(),
                    onclick: move |_| {
                        auth.with_mut(|a| a.clear_error());
                        mode.set(if registering { LoginMode::SignIn } else { LoginMode::Register });
                    },
                    if registering { "Already have an account? Sign in" } else { "New here? Create an account" }
                }
            }
        }
    }
}
