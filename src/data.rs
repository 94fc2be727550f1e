use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::DashboardError;
use crate::models::{parse_date, DashboardData, FlagType, Student};
use crate::students;

const BUILTIN_DATA: &str = include_str!("../data/mock_data.json");

/// Loads the dashboard document once: built-in data unless a file is
/// configured, with the student list optionally replaced by a CSV roster.
pub fn load(config: &Config) -> Result<DashboardData, DashboardError> {
    let mut data = match &config.data_path {
        Some(path) => load_file(path)?,
        None => builtin()?,
    };

    if let Some(roster) = &config.roster_path {
        data.student_reports = import_roster(roster)?;
        info!(
            path = %roster.display(),
            students = data.student_reports.len(),
            "student roster imported"
        );
    }

    Ok(data)
}

pub fn builtin() -> Result<DashboardData, DashboardError> {
    debug!("using built-in dashboard data");
    Ok(serde_json::from_str(BUILTIN_DATA)?)
}

pub fn load_file(path: &Path) -> Result<DashboardData, DashboardError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DashboardError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let data: DashboardData = serde_json::from_str(&raw)?;
    info!(
        path = %path.display(),
        students = data.student_reports.len(),
        help_requests = data.help_requests.len(),
        "dashboard data loaded"
    );
    Ok(data)
}

#[derive(Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    last_active: String,
    avg_score: f64,
    time_on_app: String,
    flag: Option<String>,
    flag_type: Option<FlagType>,
}

pub fn import_roster(csv_path: &Path) -> Result<Vec<Student>, DashboardError> {
    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut students = Vec::new();

    for result in reader.deserialize::<RosterRow>() {
        let row = result?;
        let last_active = parse_date(&row.last_active).ok_or_else(|| DashboardError::RosterDate {
            id: row.id.clone(),
            value: row.last_active.clone(),
        })?;

        students.push(Student {
            id: row.id,
            name: row.name,
            last_active,
            avg_score: row.avg_score,
            time_on_app: row.time_on_app,
            flag: row.flag.filter(|flag| !flag.is_empty()),
            flag_type: row.flag_type,
        });
    }

    Ok(students)
}

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    name: &'a str,
    last_active: String,
    avg_score: f64,
    score_band: &'static str,
    time_on_app: &'a str,
    status: &'static str,
    flag: &'a str,
}

/// Writes the given student view as CSV and returns the row count.
pub fn export_students(csv_path: &Path, view: &[&Student]) -> Result<usize, DashboardError> {
    let mut writer = csv::Writer::from_path(csv_path)?;

    for student in view {
        writer.serialize(ExportRow {
            id: &student.id,
            name: &student.name,
            last_active: student.last_active.to_string(),
            avg_score: student.avg_score,
            score_band: students::score_band(student.avg_score).label(),
            time_on_app: &student.time_on_app,
            status: students::status_label(student),
            flag: student.flag.as_deref().unwrap_or(""),
        })?;
    }

    writer.flush().map_err(|source| DashboardError::Write {
        path: csv_path.to_path_buf(),
        source,
    })?;
    Ok(view.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_data_covers_every_page() {
        let data = builtin().unwrap();
        assert!(!data.student_reports.is_empty());
        assert!(!data.help_requests.is_empty());
        assert!(!data.available_lessons.is_empty());
        assert_eq!(data.weekly_trend.len(), 7);
        assert!(data.student_reports.iter().any(Student::is_flagged));
    }

    #[test]
    fn roster_import_maps_blank_flags_to_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "id,name,last_active,avg_score,time_on_app,flag,flag_type\n\
             s1,Asha,2024-01-14,45,1h 10m,Low quiz scores,performance\n\
             s2,Ben,2024-01-15,90,3h 2m,,"
        )
        .unwrap();

        let students = import_roster(file.path()).unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].flag_type, Some(FlagType::Performance));
        assert!(students[0].is_flagged());
        assert_eq!(students[1].flag, None);
        assert_eq!(students[1].flag_type, None);
    }

    #[test]
    fn roster_import_rejects_bad_dates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "id,name,last_active,avg_score,time_on_app,flag,flag_type\n\
             s1,Asha,last week,45,1h,,"
        )
        .unwrap();

        let err = import_roster(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::RosterDate { .. }));
    }

    #[test]
    fn export_writes_header_and_rows() {
        let data = builtin().unwrap();
        let view: Vec<&Student> = data.student_reports.iter().take(2).collect();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");

        let written = export_students(&path, &view).unwrap();
        assert_eq!(written, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,last_active,avg_score,score_band,time_on_app,status,flag")
        );
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn missing_data_file_names_the_path() {
        let err = load_file(Path::new("/nonexistent/dashboard.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dashboard.json"));
    }
}
