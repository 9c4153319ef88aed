use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct ErrorBannerProps {
    pub message: String,
    pub on_dismiss: EventHandler<()>,
}

#[component]
pub fn ErrorBanner(props: ErrorBannerProps) -> Element {
    rsx! {
        div {
            class: "error-banner",
            role: "alert",
            span { class: "error-text", "{props.message}" }
            button {
                class: "dismiss-button",
                aria_label: "Dismiss",
                onclick: move |_| props.on_dismiss.call(()),
                "×"
            }
        }
    }
}
