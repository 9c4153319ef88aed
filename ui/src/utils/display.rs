//! Formatting helpers shared by the views. Pure functions only.

use crate::services::api::MigrationStatus;

/// Label and CSS modifier for a migration status pill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub class: &'static str,
}

pub fn migration_status_badge(status: &MigrationStatus) -> StatusBadge {
    match status {
        MigrationStatus::Draft => StatusBadge {
            label: "Draft",
            class: "badge-muted",
        },
        MigrationStatus::Pending => StatusBadge {
            label: "Pending",
            class: "badge-info",
        },
        MigrationStatus::Running => StatusBadge {
            label: "Running",
            class: "badge-active",
        },
        MigrationStatus::Completed => StatusBadge {
            label: "Completed",
            class: "badge-success",
        },
        MigrationStatus::Failed => StatusBadge {
            label: "Failed",
            class: "badge-error",
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBand {
    High,
    Medium,
    Low,
    Unscored,
}

impl QualityBand {
    pub fn class(&self) -> &'static str {
        match self {
            QualityBand::High => "quality-high",
            QualityBand::Medium => "quality-medium",
            QualityBand::Low => "quality-low",
            QualityBand::Unscored => "quality-none",
        }
    }
}

/// 90 and up is high, 70 to 89 medium, anything lower is low
pub fn quality_score_band(score: Option<u8>) -> QualityBand {
    match score {
        None => QualityBand::Unscored,
        Some(s) if s >= 90 => QualityBand::High,
        Some(s) if s >= 70 => QualityBand::Medium,
        Some(_) => QualityBand::Low,
    }
}

/// `1234567` -> `"1,234,567"`
pub fn format_row_count(rows: u64) -> String {
    let digits = rows.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Share of `whole` in percent, clamped to 0..=100. Zero when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0).min(100.0)
}

/// Items tagged with `topic`. `"all"` or an empty topic keeps everything.
pub fn filter_by_topic<'a, T, F>(items: &'a [T], topic: &str, topic_of: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    let topic = topic.trim();
    if topic.is_empty() || topic.eq_ignore_ascii_case("all") {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| topic_of(item).eq_ignore_ascii_case(topic))
        .collect()
}
