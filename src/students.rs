use crate::models::{FlagType, Student};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagIcon {
    TrendingDown,
    UserX,
    Clock,
    AlertCircle,
}

impl FlagIcon {
    /// Terminal stand-in for the icon.
    pub fn glyph(self) -> &'static str {
        match self {
            FlagIcon::TrendingDown => "↘",
            FlagIcon::UserX => "✗",
            FlagIcon::Clock => "◷",
            FlagIcon::AlertCircle => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Destructive,
    Secondary,
    Outline,
}

impl BadgeVariant {
    pub fn label(self) -> &'static str {
        match self {
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Outline => "outline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagStyle {
    pub icon: FlagIcon,
    pub badge: BadgeVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }

    /// Display tone used when rendering the score.
    pub fn tone(self) -> &'static str {
        match self {
            ScoreBand::High => "success",
            ScoreBand::Medium => "warning",
            ScoreBand::Low => "destructive",
        }
    }
}

pub fn flagged(students: &[Student]) -> Vec<&Student> {
    students.iter().filter(|student| student.is_flagged()).collect()
}

/// Case-insensitive substring match on the name. An empty term keeps everyone.
pub fn search<'a>(students: &'a [Student], term: &str) -> Vec<&'a Student> {
    if term.is_empty() {
        return students.iter().collect();
    }

    let needle = term.to_lowercase();
    students
        .iter()
        .filter(|student| student.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn classify(flag_type: Option<FlagType>) -> FlagStyle {
    match flag_type {
        Some(FlagType::Performance) => FlagStyle {
            icon: FlagIcon::TrendingDown,
            badge: BadgeVariant::Destructive,
        },
        Some(FlagType::Inactive) => FlagStyle {
            icon: FlagIcon::UserX,
            badge: BadgeVariant::Secondary,
        },
        Some(FlagType::Engagement) => FlagStyle {
            icon: FlagIcon::Clock,
            badge: BadgeVariant::Outline,
        },
        Some(FlagType::Unknown) | None => FlagStyle {
            icon: FlagIcon::AlertCircle,
            badge: BadgeVariant::Outline,
        },
    }
}

pub fn score_band(avg_score: f64) -> ScoreBand {
    if avg_score >= 80.0 {
        ScoreBand::High
    } else if avg_score >= 60.0 {
        ScoreBand::Medium
    } else {
        ScoreBand::Low
    }
}

pub fn status_label(student: &Student) -> &'static str {
    if student.is_flagged() {
        "Needs Attention"
    } else {
        "Good"
    }
}

/// Text shown on a flagged student's badge.
pub fn flag_badge(student: &Student) -> &'static str {
    student.flag_type.map_or("flagged", FlagType::label)
}
