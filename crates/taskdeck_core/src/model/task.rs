use crate::error::AppError;
use crate::model::timestamp::{self, Timestamp};
use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Rank used for descending priority sorts: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Field names follow the storage envelope, which uses camelCase keys so
/// backups written by other clients of the same format import unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "timestamp::due_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Form input for creating a task; ids and timestamps are assigned by the
/// store, never by callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<Date>,
}

impl TaskDraft {
    /// Boundary validation: returns the trimmed title, or rejects a draft
    /// whose title is empty after trimming before any `Task` is constructed.
    pub fn validated_title(&self) -> Result<&str, AppError> {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }
        Ok(trimmed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskSort {
    #[default]
    CreatedAt,
    DueDate,
    Priority,
    Title,
}
