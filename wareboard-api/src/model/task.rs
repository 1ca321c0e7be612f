//! Warehouse task models

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Kind of floor work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Pick,
    Putaway,
    Count,
}

impl TaskType {
    pub fn label(self) -> &'static str {
        match self {
            TaskType::Pick => "Pick",
            TaskType::Putaway => "Putaway",
            TaskType::Count => "Count",
        }
    }
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Wire value used in filter parameters and status updates.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

/// A unit of warehouse floor work shown on the Tasks page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseTask {
    pub id: String,
    pub task_type: TaskType,
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    pub location_code: String,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
}
