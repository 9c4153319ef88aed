use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct LoadingIndicatorProps {
    pub message: String,
    /// Smaller variant placed next to a button instead of in its own row
    #[props(default)]
    pub inline: bool,
}

#[component]
pub fn LoadingIndicator(props: LoadingIndicatorProps) -> Element {
    let class = if props.inline {
        "loading-indicator inline"
    } else {
        "loading-indicator"
    };

    rsx! {
        div {
            class: "{class}",
            span { class: "spinner" }
            "{props.message}"
        }
    }
}
