use dioxus::prelude::*;

use crate::wizard::step_title;

#[derive(Props, PartialEq, Clone)]
pub struct StepIndicatorProps {
    pub current_step: u8,
    pub total_steps: u8,
    pub progress: f64,
    /// Per step, in order: whether clicking it is allowed
    pub reachable: Vec<bool>,
    pub on_jump: EventHandler<u8>,
}

/// Numbered step list with a progress bar. Steps that cannot be jumped to are
/// rendered but not clickable.
#[component]
pub fn StepIndicator(props: StepIndicatorProps) -> Element {
    let progress = format!("{:.0}", props.progress);
    let on_jump = props.on_jump;
    let steps: Vec<(u8, &'static str, bool)> = (1..=props.total_steps)
        .map(|step| {
            let reachable = props
                .reachable
                .get(step as usize - 1)
                .copied()
                .unwrap_or(false);
            let class = if step == props.current_step {
                "step current"
            } else if step < props.current_step {
                "step done"
            } else {
                "step"
            };
            (step, class, reachable && step != props.current_step)
        })
        .collect();

    rsx! {
        div {
            class: "step-indicator",
            ol {
                class: "step-list",
                for (step, class, clickable) in steps {
                    li {
                        key: "{step}",
                        class: "{class}",
                        button {
                            class: "step-button",
                            disabled: !clickable,
                            onclick: move |_| on_jump.call(step),
                            span { class: "step-number", "{step}" }
                            span { class: "step-title", "{step_title(step)}" }
                        }
                    }
                }
            }
            div {
                class: "progress-track",
                div {
                    class: "progress-fill",
                    style: "width: {progress}%;"
                }
            }
        }
    }
}
