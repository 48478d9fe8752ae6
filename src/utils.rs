use chrono::{NaiveDate, NaiveDateTime};
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Date formats tried by `parse_date_dayfirst`, day-first variants
/// before ISO so ambiguous numeric dates read as day/month/year.
const DATE_FORMATS: [&str; 5] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y", "%Y-%m-%d"];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Get the configuration directory path.
/// If profile is Dev, uses "billboard-dev" instead of "billboard"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "billboard-dev",
        Profile::Prod => "billboard",
    };
    ProjectDirs::from("com", "billboard", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path (database file and uploaded images).
/// If profile is Dev, uses "billboard-dev" instead of "billboard"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "billboard-dev",
        Profile::Prod => "billboard",
    };
    ProjectDirs::from("com", "billboard", app_name).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse loosely formatted date text, preferring the day-first reading
/// for ambiguous numeric forms. Returns `None` for blank or
/// unrecognized input instead of an error.
pub fn parse_date_dayfirst(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Get the current timestamp as "YYYY-MM-DD HH:MM:SS"
pub fn get_current_timestamp_string() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
