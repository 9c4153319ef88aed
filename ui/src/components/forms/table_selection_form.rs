use dioxus::prelude::*;

use crate::components::display::LoadingIndicator;
use crate::components::inputs::CheckboxField;
use crate::utils::display::{format_row_count, percentage};
use crate::wizard::{CatalogLoad, TableEntry, WizardAction, WizardState};

#[derive(Props, PartialEq, Clone)]
pub struct TableSelectionFormProps {
    pub state: Signal<WizardState>,
    pub dispatch: EventHandler<WizardAction>,
    pub show_errors: bool,
    pub on_reload_tables: EventHandler<()>,
}

#[component]
pub fn TableSelectionForm(props: TableSelectionFormProps) -> Element {
    let dispatch = props.dispatch;
    let on_reload_tables = props.on_reload_tables;

    let s = props.state.read();
    let load = s.catalog_load().clone();
    let filter = s.table_filter().to_string();
    let visible: Vec<TableEntry> = s.catalog().filter(&filter).into_iter().cloned().collect();
    let total = s.catalog().len();
    let selected = s.catalog().selected_count();
    let all_selected = s.catalog().all_selected();
    let selected_rows = s.catalog().total_selected_rows();
    let total_rows: u64 = s.catalog().entries().iter().map(|e| e.row_count).sum();
    let include_views = s.form_data().include_views;
    let include_procs = s.form_data().include_stored_procedures;
    let show_empty_error = props.show_errors && selected == 0;
    drop(s);

    let coverage = format!("{:.0}", percentage(selected_rows, total_rows));

    rsx! {
        div {
            class: "wizard-form table-selection",

            h2 {
                class: "form-title",
                "Table Selection"
            }

            {match load {
                CatalogLoad::Idle | CatalogLoad::Loading => rsx! {
                    LoadingIndicator { message: "Loading tables from source...".to_string() }
                },
                CatalogLoad::Failed(message) => rsx! {
                    div {
                        class: "catalog-error",
                        "⚠ {message}"
                        button {
                            class: "secondary-button",
                            onclick: move |_| on_reload_tables.call(()),
                            "Retry"
                        }
                    }
                },
                CatalogLoad::Loaded => rsx! {
                    div {
                        class: "table-toolbar",
                        input {
                            class: "form-input search-input",
                            r#type: "search",
                            value: "{filter}",
                            placeholder: "Search tables",
                            oninput: move |event| dispatch.call(WizardAction::SetTableFilter(event.value()))
                        }
                        button {
                            class: "link-button",
                            disabled: all_selected,
                            onclick: move |_| dispatch.call(WizardAction::SelectAllTables),
                            "Select all"
                        }
                        button {
                            class: "link-button",
                            disabled: selected == 0,
                            onclick: move |_| dispatch.call(WizardAction::DeselectAllTables),
                            "Deselect all"
                        }
                        button {
                            class: "link-button",
                            onclick: move |_| on_reload_tables.call(()),
                            "Refresh"
                        }
                    }

                    if visible.is_empty() {
                        div {
                            class: "empty-state",
                            if total == 0 { "The source has no tables" } else { "No tables match \"{filter}\"" }
                        }
                    }

                    ul {
                        class: "table-list",
                        for entry in visible {
                            li {
                                key: "{entry.name}",
                                class: if entry.selected { "table-row selected" } else { "table-row" },
                                label {
                                    input {
                                        r#type: "checkbox",
                                        checked: entry.selected,
                                        onchange: {
                                            let name = entry.name.clone();
                                            move |_| dispatch.call(WizardAction::ToggleTable(name.clone()))
                                        }
                                    }
                                    span { class: "table-name", "{entry.name}" }
                                }
                                span { class: "row-count", "{format_row_count(entry.row_count)} rows" }
                            }
                        }
                    }

                    div {
                        class: "selection-summary",
                        "{selected} of {total} tables selected, {format_row_count(selected_rows)} rows ({coverage}% of source)"
                    }
                },
            }}

            if show_empty_error {
                div {
                    class: "validation-feedback invalid",
                    "⚠ Select at least one table to migrate"
                }
            }

            div {
                class: "options-section",
                CheckboxField {
                    label: "Include views".to_string(),
                    checked: include_views,
                    on_change: move |checked: bool| dispatch.call(WizardAction::SetIncludeViews(checked))
                }
                CheckboxField {
                    label: "Include stored procedures".to_string(),
                    checked: include_procs,
                    on_change: move |checked: bool| dispatch.call(WizardAction::SetIncludeStoredProcedures(checked))
                }
            }
        }
    }
}
