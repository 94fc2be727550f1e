use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    Performance,
    Inactive,
    Engagement,
    #[serde(other)]
    Unknown,
}

impl FlagType {
    pub fn label(self) -> &'static str {
        match self {
            FlagType::Performance => "performance",
            FlagType::Inactive => "inactive",
            FlagType::Engagement => "engagement",
            FlagType::Unknown => "flagged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "flexible_date")]
    pub last_active: NaiveDate,
    pub avg_score: f64,
    pub time_on_app: String,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub flag_type: Option<FlagType>,
}

impl Student {
    /// A blank flag counts as no flag.
    pub fn is_flagged(&self) -> bool {
        self.flag.as_deref().is_some_and(|flag| !flag.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub chapter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    pub id: String,
    pub title: String,
    pub chapter: String,
    pub subject: String,
}

impl QueueItem {
    pub fn from_lesson(lesson: &Lesson, subject: &str) -> Self {
        Self {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            chapter: lesson.chapter.clone(),
            subject: subject.to_string(),
        }
    }
}

/// Lessons for one subject, kept in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectLessons {
    pub subject: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub id: String,
    pub student_name: String,
    pub subject: String,
    #[serde(deserialize_with = "flexible_date")]
    pub date: NaiveDate,
    pub lesson: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestMetrics {
    pub active_students: u32,
    pub class_average_score: f64,
    pub lessons_completed: u32,
    pub total_time: String,
    pub top_struggle_concept: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubjectScore {
    pub subject: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayScore {
    pub day: String,
    pub score: f64,
}

/// The whole read-only document the dashboard is built from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(deserialize_with = "flexible_date")]
    pub report_date: NaiveDate,
    pub daily_digest: DigestMetrics,
    #[serde(default)]
    pub subject_performance: Vec<SubjectScore>,
    #[serde(default)]
    pub weekly_trend: Vec<DayScore>,
    #[serde(default)]
    pub student_reports: Vec<Student>,
    #[serde(default)]
    pub help_requests: Vec<HelpRequest>,
    #[serde(default, deserialize_with = "ordered_lessons")]
    pub available_lessons: Vec<SubjectLessons>,
}

/// Accepts `2024-01-15` as well as a full RFC 3339 timestamp.
fn flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn ordered_lessons<'de, D>(deserializer: D) -> Result<Vec<SubjectLessons>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SubjectMapVisitor;

    impl<'de> Visitor<'de> for SubjectMapVisitor {
        type Value = Vec<SubjectLessons>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of subject to lesson list")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut subjects = Vec::new();
            while let Some((subject, lessons)) = map.next_entry::<String, Vec<Lesson>>()? {
                subjects.push(SubjectLessons { subject, lessons });
            }
            Ok(subjects)
        }
    }

    deserializer.deserialize_map(SubjectMapVisitor)
}
