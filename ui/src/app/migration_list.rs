use dioxus::prelude::*;

use crate::components::display::{ErrorBanner, LoadingIndicator, QualityScore, StatusBadge};
use crate::services::api::{ApiHandle, Migration};
use crate::utils::display::{filter_by_topic, migration_status_badge};
use crate::utils::platform::confirm_dialog;
use crate::{console_error, console_info};

const STATUS_FILTERS: [&str; 6] = ["All", "Draft", "Pending", "Running", "Completed", "Failed"];

#[derive(Props, PartialEq, Clone)]
pub struct MigrationListProps {
    pub api: ApiHandle,
    pub on_new: EventHandler<()>,
}

/// Migrations owned by the signed-in user
#[component]
pub fn MigrationList(props: MigrationListProps) -> Element {
    let mut status_filter = use_signal(|| "All".to_string());
    let mut action_error = use_signal(|| None::<String>);
    let on_new = props.on_new;

    let api = props.api.clone();
    let mut migrations = use_resource(move || {
        let api = api.clone();
        async move { api.api().list_migrations().await }
    });

    let api = props.api.clone();
    let delete = move |migration: Migration| {
        if !confirm_dialog(&format!("Delete migration \"{}\"?", migration.name)) {
            return;
        }
        let api = api.clone();
        spawn(async move {
            match api.api().delete_migration(&migration.id).await {
                Ok(()) => {
                    console_info!("[Migrations] Deleted {}", migration.id);
                    migrations.restart();
                }
                Err(e) => {
                    console_error!("[Migrations] Delete of {} failed: {}", migration.id, e);
                    action_error.set(Some(e.user_message()));
                }
            }
        });
    };

    let body = match &*migrations.read() {
        None => rsx! {
            LoadingIndicator { message: "Loading migrations...".to_string() }
        },
        Some(Err(e)) => rsx! {
            div {
                class: "catalog-error",
                "⚠ {e.user_message()}"
                button {
                    class: "secondary-button",
                    onclick: move |_| migrations.restart(),
                    "Retry"
                }
            }
        },
        Some(Ok(all)) if all.is_empty() => rsx! {
            div {
                class: "empty-state",
                "No migrations yet. Create one to get started."
            }
        },
        Some(Ok(all)) => {
            let filter = status_filter();
            let visible: Vec<Migration> =
                filter_by_topic(all, &filter, |m| migration_status_badge(&m.status).label)
                    .into_iter()
                    .cloned()
                    .collect();
            rsx! {
                table {
                    class: "migration-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Status" }
                            th { "Tables" }
                            th { "Progress" }
                            th { "Quality" }
                            th {}
                        }
                    }
                    tbody {
                        for migration in visible {
                            tr {
                                key: "{migration.id}",
                                td {
                                    div { class: "migration-name", "{migration.name}" }
                                    if let Some(description) = &migration.description {
                                        div { class: "migration-description", "{description}" }
                                    }
                                }
                                td { StatusBadge { status: migration.status.clone() } }
                                td { "{migration.table_count}" }
                                td {
                                    div {
                                        class: "progress-track small",
                                        div {
                                            class: "progress-fill",
                                            style: "width: {migration.progress.unwrap_or(0.0).clamp(0.0, 100.0)}%;"
                                        }
                                    }
                                }
                                td { QualityScore { score: migration.quality_score } }
                                td {
                                    button {
                                        class: "link-button danger",
                                        onclick: {
                                            let delete = delete.clone();
                                            let migration = migration.clone();
                                            move |_| delete(migration.clone())
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "migration-list",

            div {
                class: "list-header",
                h1 { "Migrations" }
                select {
                    class: "form-input status-filter",
                    value: "{status_filter}",
                    onchange: move |event| status_filter.set(event.value()),
                    for label in STATUS_FILTERS {
                        option { key: "{label}", value: "{label}", "{label}" }
                    }
                }
                button {
                    class: "primary-button",
                    onclick: move |_| on_new.call(()),
                    "New Migration"
                }
            }

            if let Some(message) = action_error() {
                ErrorBanner {
                    message: message,
                    on_dismiss: move |_| action_error.set(None)
                }
            }

            {body}
        }
    }
}
