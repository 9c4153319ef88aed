use dioxus::prelude::*;

use crate::services::api::MigrationStatus;
use crate::utils::display::{migration_status_badge, quality_score_band};

#[derive(Props, PartialEq, Clone)]
pub struct StatusBadgeProps {
    pub status: MigrationStatus,
}

#[component]
pub fn StatusBadge(props: StatusBadgeProps) -> Element {
    let badge = migration_status_badge(&props.status);
    rsx! {
        span { class: "badge {badge.class}", "{badge.label}" }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct QualityScoreProps {
    #[props(!optional)]
    pub score: Option<u8>,
}

#[component]
pub fn QualityScore(props: QualityScoreProps) -> Element {
    let band = quality_score_band(props.score);
    let text = props
        .score
        .map(|s| format!("{s}%"))
        .unwrap_or_else(|| "n/a".to_string());
    rsx! {
        span { class: "quality-score {band.class()}", "{text}" }
    }
}
