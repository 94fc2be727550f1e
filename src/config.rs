use std::path::PathBuf;

pub const DATA_ENV: &str = "DASHBOARD_DATA";
pub const ROSTER_ENV: &str = "DASHBOARD_ROSTER";
pub const TEACHER_ENV: &str = "DASHBOARD_TEACHER";

/// Where the dashboard gets its data and who it greets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: Option<PathBuf>,
    pub roster_path: Option<PathBuf>,
    pub teacher_name: String,
}

impl Config {
    /// Command-line values win over the environment.
    pub fn resolve(
        data: Option<PathBuf>,
        roster: Option<PathBuf>,
        teacher: Option<String>,
    ) -> Self {
        Self::from_lookup(data, roster, teacher, |key| std::env::var(key).ok())
    }

    fn from_lookup(
        data: Option<PathBuf>,
        roster: Option<PathBuf>,
        teacher: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            data_path: data.or_else(|| non_empty(DATA_ENV).map(PathBuf::from)),
            roster_path: roster.or_else(|| non_empty(ROSTER_ENV).map(PathBuf::from)),
            teacher_name: teacher
                .or_else(|| non_empty(TEACHER_ENV))
                .unwrap_or_else(|| "Teacher".to_string()),
        }
    }
}
