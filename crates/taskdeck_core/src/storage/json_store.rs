use crate::error::AppError;
use crate::model::{Task, Timestamp, timestamp};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::Date;

pub const STORAGE_VERSION: &str = "1.0.0";
const STORE_FILE_NAME: &str = "tasks.json";
const EXPORT_FILE_PREFIX: &str = "tasks-backup";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredData {
    tasks: Vec<Task>,
    version: String,
    last_saved: Timestamp,
}

/// Envelope header read without rehydrating the task list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeSummary {
    #[serde(default)]
    tasks: Vec<serde_json::Value>,
    #[serde(default)]
    last_saved: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInfo {
    pub last_saved: Option<Timestamp>,
    pub task_count: usize,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("TASKDECK_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("taskdeck")
            .join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskdeck")
            .join(STORE_FILE_NAME))
    }
}

fn envelope(tasks: &[Task]) -> StoredData {
    StoredData {
        tasks: tasks.to_vec(),
        version: STORAGE_VERSION.to_string(),
        last_saved: Timestamp::now(),
    }
}

pub fn save(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(&envelope(tasks))?;
    std::fs::write(path, content)?;

    Ok(())
}

/// Reads the stored collection. An absent, unreadable, or malformed envelope
/// degrades to an empty collection; the failure is logged, never propagated.
pub fn load(path: &Path) -> Vec<Task> {
    if !path.exists() {
        return Vec::new();
    }

    match try_load(path) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!("discarding stored tasks at {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

fn try_load(path: &Path) -> Result<Vec<Task>, AppError> {
    let content = std::fs::read_to_string(path)?;
    parse_envelope(&content)
}

fn parse_envelope(content: &str) -> Result<Vec<Task>, AppError> {
    let raw: serde_json::Value = serde_json::from_str(content)
        .map_err(|err| AppError::invalid_data(format!("invalid file format: {err}")))?;

    let Some(tasks) = raw.get("tasks").filter(|value| value.is_array()) else {
        return Err(AppError::invalid_data(
            "invalid file format: missing tasks array",
        ));
    };

    if let Some(version) = raw.get("version").and_then(|value| value.as_str()) {
        check_version(version)?;
    }

    serde_json::from_value(tasks.clone())
        .map_err(|err| AppError::invalid_data(format!("invalid file format: {err}")))
}

fn check_version(version: &str) -> Result<(), AppError> {
    // Only the major component gates compatibility.
    let major = version.split('.').next().unwrap_or_default();
    if major == "1" {
        Ok(())
    } else {
        Err(AppError::invalid_data(format!(
            "unsupported storage version `{version}`"
        )))
    }
}

pub fn clear(path: &Path) -> Result<(), AppError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

pub fn has_stored_data(path: &Path) -> bool {
    path.exists()
}

pub fn storage_info(path: &Path) -> StorageInfo {
    let empty = StorageInfo {
        last_saved: None,
        task_count: 0,
    };

    let Ok(content) = std::fs::read_to_string(path) else {
        return empty;
    };

    match serde_json::from_str::<EnvelopeSummary>(&content) {
        Ok(summary) => StorageInfo {
            last_saved: summary.last_saved,
            task_count: summary.tasks.len(),
        },
        Err(err) => {
            warn!("unreadable envelope at {}: {}", path.display(), err);
            empty
        }
    }
}

pub fn export_file_name(date: Date) -> Result<String, AppError> {
    Ok(format!(
        "{EXPORT_FILE_PREFIX}-{}.json",
        timestamp::format_date(date)?
    ))
}

pub fn export_to_file(tasks: &[Task], dir: &Path) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(export_file_name(Timestamp::now().date())?);
    let content = serde_json::to_string_pretty(&envelope(tasks))?;
    std::fs::write(&path, content)?;

    Ok(path)
}

pub fn import_from_file(path: &Path) -> Result<Vec<Task>, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("failed to read file: {err}")))?;
    parse_envelope(&content)
}
