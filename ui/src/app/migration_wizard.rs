use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

use crate::components::display::{ErrorBanner, LoadingIndicator, StepIndicator};
use crate::components::forms::{
    BasicInfoForm, SourceConnectionForm, TableSelectionForm, TargetConfigForm,
};
use crate::services::api::{ApiHandle, Migration};
use crate::services::config::WizardConfig;
use crate::utils::display::format_row_count;
use crate::utils::platform::confirm_dialog;
use crate::wizard::{
    load_table_catalog, step_title, submit_migration, test_source_connection, CatalogLoad,
    StepChange, WizardAction, WizardState, WizardStore,
};
use crate::{console_debug, console_info};

const WIZARD_CSS: Asset = asset!("/assets/styling/wizard.css");

/// Step holding the table list; its catalog is fetched on arrival
const TABLE_SELECTION_STEP: u8 = 4;

/// Wizard state as seen by the async drivers: the component's signal plus a
/// flag that goes false when the component unmounts.
#[derive(Clone)]
struct SignalStore {
    state: Signal<WizardState>,
    mounted: Rc<Cell<bool>>,
}

impl WizardStore for SignalStore {
    fn read<R>(&self, f: impl FnOnce(&WizardState) -> R) -> R {
        f(&self.state.peek())
    }

    fn update<R>(&self, f: impl FnOnce(&mut WizardState) -> R) -> R {
        let mut state = self.state;
        let mut guard = state.write();
        f(&mut guard)
    }

    fn is_live(&self) -> bool {
        self.mounted.get()
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct MigrationWizardProps {
    pub api: ApiHandle,
    #[props(default)]
    pub config: WizardConfig,
    /// Called with the created migration; the caller navigates away
    pub on_complete: EventHandler<Migration>,
    /// Called after the user confirmed cancelling
    pub on_cancel: EventHandler<()>,
}

#[component]
pub fn MigrationWizard(props: MigrationWizardProps) -> Element {
    let config = props.config.clone();
    let mut state = use_signal(move || WizardState::new(config));
    let mut show_errors = use_signal(|| false);
    let mounted = use_hook(|| Rc::new(Cell::new(true)));

    {
        let mounted = mounted.clone();
        use_drop(move || {
            console_debug!("[Wizard] View closed, dropping pending requests");
            mounted.set(false);
            if let Ok(mut s) = state.try_write() {
                s.invalidate_pending();
            }
        });
    }

    let store = SignalStore {
        state,
        mounted: mounted.clone(),
    };

    // Dispatch function for actions - using in-place reduction to preserve Dioxus Signal reactivity
    let dispatch = EventHandler::new(move |action: WizardAction| {
        state.with_mut(|s| s.reduce_in_place(action));
    });

    let load_tables = {
        let store = store.clone();
        let api = props.api.clone();
        move || {
            let store = store.clone();
            let api = api.clone();
            spawn(async move {
                let _ = load_table_catalog(&store, api.api()).await;
            });
        }
    };

    let reload_tables = load_tables.clone();

    // Fetch the catalog the first time the table step is shown for a source
    {
        let load_tables = load_tables.clone();
        use_effect(move || {
            let s = state.read();
            let needs_catalog = s.controller().current_step() == TABLE_SELECTION_STEP
                && *s.catalog_load() == CatalogLoad::Idle;
            drop(s);
            if needs_catalog {
                load_tables();
            }
        });
    }

    let on_test_connection = {
        let store = store.clone();
        let api = props.api.clone();
        move |_| {
            let store = store.clone();
            let api = api.clone();
            spawn(async move {
                let _ = test_source_connection(&store, api.api()).await;
            });
        }
    };

    let on_submit = {
        let store = store.clone();
        let api = props.api.clone();
        let on_complete = props.on_complete;
        move |_| {
            show_errors.set(true);
            let store = store.clone();
            let api = api.clone();
            spawn(async move {
                if let Ok(migration) = submit_migration(&store, api.api()).await {
                    on_complete.call(migration);
                }
            });
        }
    };

    let on_next = move |_| {
        let change = state.with_mut(|s| s.next());
        // Errors only show once the user tried to move on
        show_errors.set(change == StepChange::Unchanged);
    };

    let on_back = move |_| {
        show_errors.set(false);
        dispatch.call(WizardAction::Previous);
    };

    let on_cancel = props.on_cancel;
    let on_cancel_click = move |_| {
        let cancelled = state.with_mut(|s| s.cancel(confirm_dialog));
        if cancelled {
            console_info!("[Wizard] Leaving wizard after cancel");
            on_cancel.call(());
        }
    };

    let on_jump = move |step: u8| {
        show_errors.set(false);
        dispatch.call(WizardAction::JumpTo(step));
    };

    let s = state.read();
    let controller = s.controller().clone();
    let current_step = controller.current_step();
    let reachable: Vec<bool> = (1..=controller.total_steps())
        .map(|step| controller.can_jump_to(step))
        .collect();
    let step_message = s.current_step_message();
    let submit_error = s.submission().error().map(str::to_string);
    let is_submitting = s.submission().is_submitting();
    let submit_enabled = s.submission().is_enabled();
    let can_submit = s.can_submit();
    let summary = (
        s.form_data().name.clone(),
        s.form_data().connection_config().display_target(),
        s.form_data().target_config(),
        s.form_data().selected_tables().len(),
        s.catalog().total_selected_rows(),
    );
    drop(s);

    rsx! {
        document::Link { rel: "stylesheet", href: WIZARD_CSS }

        div {
            class: "migration-wizard",

            div {
                class: "wizard-header",
                h1 { class: "wizard-title", "New Migration" }
                span {
                    class: "wizard-subtitle",
                    "Step {current_step} of {controller.total_steps()}: {step_title(current_step)}"
                }
            }

            StepIndicator {
                current_step: current_step,
                total_steps: controller.total_steps(),
                progress: controller.progress_percentage(),
                reachable: reachable,
                on_jump: on_jump
            }

            if let Some(message) = submit_error {
                ErrorBanner {
                    message: message,
                    on_dismiss: move |_| dispatch.call(WizardAction::DismissSubmitError)
                }
            }

            div {
                class: "wizard-body",
                {match current_step {
                    1 => rsx! {
                        BasicInfoForm { state: state, dispatch: dispatch, show_errors: show_errors() }
                    },
                    2 => rsx! {
                        SourceConnectionForm {
                            state: state,
                            dispatch: dispatch,
                            show_errors: show_errors(),
                            on_test_connection: on_test_connection
                        }
                    },
                    3 => rsx! {
                        TargetConfigForm { state: state, dispatch: dispatch, show_errors: show_errors() }
                    },
                    TABLE_SELECTION_STEP => rsx! {
                        TableSelectionForm {
                            state: state,
                            dispatch: dispatch,
                            show_errors: show_errors(),
                            on_reload_tables: move |_| reload_tables()
                        }
                    },
                    _ => rsx! {
                        div {
                            class: "wizard-form review",
                            h2 { class: "form-title", "Review" }
                            dl {
                                dt { "Name" } dd { "{summary.0}" }
                                dt { "Source" } dd { "{summary.1}" }
                                dt { "Target" } dd { "{summary.2.project}.{summary.2.schema}" }
                                dt { "Tables" } dd { "{summary.3} ({format_row_count(summary.4)} rows)" }
                            }
                        }
                    },
                }}
            }

            if show_errors() {
                if let Some(message) = step_message {
                    div { class: "validation-feedback invalid step-message", "⚠ {message}" }
                }
            }

            div {
                class: "wizard-footer",
                button {
                    class: "link-button",
                    disabled: is_submitting,
                    onclick: on_cancel_click,
                    "Cancel"
                }
                div {
                    class: "wizard-nav",
                    if !controller.is_first_step() {
                        button {
                            class: "secondary-button",
                            disabled: is_submitting,
                            onclick: on_back,
                            "Back"
                        }
                    }
                    if controller.is_last_step() {
                        if is_submitting {
                            LoadingIndicator { message: "Creating migration...".to_string(), inline: true }
                        }
                        button {
                            class: if can_submit { "primary-button" } else { "primary-button incomplete" },
                            disabled: !submit_enabled,
                            onclick: on_submit,
                            "Create Migration"
                        }
                    } else {
                        button {
                            class: "primary-button",
                            onclick: on_next,
                            "Next"
                        }
                    }
                }
            }
        }
    }
}
