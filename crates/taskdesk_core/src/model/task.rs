use crate::model::User;
use serde::{Deserialize, Serialize};

/// A task as read back from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub task_progress: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub hours: u64,
    #[serde(default)]
    pub is_ready: Option<String>,
    pub user: User,
}

impl Task {
    /// The photo URL, treating an empty string the same as no photo.
    pub fn photo(&self) -> Option<&str> {
        self.photo_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Reference to an assignee by id, the only part of a user sent on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
}

/// Body of the create and update calls. Update resends the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub task_progress: String,
    pub priority: String,
    pub photo_url: String,
    pub hours: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ready: Option<String>,
    pub user: UserRef,
}
