use chrono::NaiveDate;

use crate::models::DigestMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trend {
    pub value: i32,
    pub is_positive: bool,
}

impl Trend {
    pub fn up(value: i32) -> Self {
        Self {
            value,
            is_positive: true,
        }
    }

    pub fn down(value: i32) -> Self {
        Self {
            value,
            is_positive: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardVariant {
    #[default]
    Default,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub trend: Option<Trend>,
    pub variant: CardVariant,
}

impl MetricCard {
    pub fn trend_line(&self) -> Option<String> {
        self.trend.map(format_trend)
    }
}

/// "↗ 8% vs yesterday"; the sign lives in the arrow, the number is absolute.
pub fn format_trend(trend: Trend) -> String {
    let arrow = if trend.is_positive { "↗" } else { "↘" };
    format!("{arrow} {}% vs yesterday", trend.value.unsigned_abs())
}

pub fn digest_cards(metrics: &DigestMetrics) -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "Active Students",
            value: metrics.active_students.to_string(),
            trend: Some(Trend::up(8)),
            variant: CardVariant::Default,
        },
        MetricCard {
            title: "Class Average Score",
            value: format!("{}%", metrics.class_average_score),
            trend: Some(Trend::up(3)),
            variant: CardVariant::Success,
        },
        MetricCard {
            title: "Lessons Completed",
            value: metrics.lessons_completed.to_string(),
            trend: Some(Trend::up(12)),
            variant: CardVariant::Default,
        },
        MetricCard {
            title: "Total Time on App",
            value: metrics.total_time.clone(),
            trend: Some(Trend::down(5)),
            variant: CardVariant::Warning,
        },
    ]
}

/// "Monday, January 15, 2024"
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// A horizontal bar scaled to `width` cells for a 0–100 score.
pub fn score_bar(score: f64, width: usize) -> String {
    let clamped = score.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
