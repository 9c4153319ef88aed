use dioxus::prelude::*;

use crate::wizard::ConnectionStatus;

#[derive(Props, PartialEq, Clone)]
pub struct ConnectionStatusDisplayProps {
    pub status: ConnectionStatus,
    #[props(default)]
    pub message: String,
}

#[component]
pub fn ConnectionStatusDisplay(props: ConnectionStatusDisplayProps) -> Element {
    let message = &props.message;

    match props.status {
        ConnectionStatus::Idle => rsx! {},
        ConnectionStatus::Testing => rsx! {
            div {
                class: "connection-status testing",
                "⏳ Testing connection..."
            }
        },
        ConnectionStatus::Success => rsx! {
            div {
                class: "connection-status success",
                "✓ {message}"
            }
        },
        ConnectionStatus::Error => rsx! {
            div {
                class: "connection-status error",
                "⚠ {message}"
            }
        },
    }
}
