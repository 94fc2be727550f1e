use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dashboard data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster row for {id} has an invalid last_active date: {value}")]
    RosterDate { id: String, value: String },
    #[error("bulletin message is empty")]
    EmptyMessage,
    #[error("no lesson with id {0} in the catalog")]
    UnknownLesson(String),
}
