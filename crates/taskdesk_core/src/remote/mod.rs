//! Access to the Remote Task Service.
//!
//! [`TaskService`] is the seam the flows are written against; [`HttpTaskService`]
//! is the `reqwest` implementation talking to the real endpoints.

mod http;

pub use http::{ClientConfig, DEFAULT_BASE_URL, HttpTaskService};

use crate::error::AppError;
use crate::media::PhotoUpload;
use crate::model::{Task, TaskPayload, User};
use async_trait::async_trait;

pub const LIST_TASKS_PATH: &str = "task/listar";
pub const LIST_USERS_PATH: &str = "user/listar";
pub const CREATE_TASK_PATH: &str = "task/agregar";
pub const UPDATE_TASK_PATH: &str = "task/actualizar";
pub const DELETE_TASK_PATH: &str = "task/delete";
pub const UPLOAD_PHOTO_PATH: &str = "task/upload";

#[async_trait]
pub trait TaskService: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Returns the created task when the service echoes one back.
    async fn create_task(&self, payload: &TaskPayload) -> Result<Option<Task>, AppError>;

    /// Returns the updated task when the service echoes one back.
    async fn update_task(&self, payload: &TaskPayload) -> Result<Option<Task>, AppError>;

    async fn delete_task(&self, id: i64) -> Result<(), AppError>;

    /// Uploads a photo and returns the URL the service stored it under.
    async fn upload_photo(&self, photo: PhotoUpload) -> Result<String, AppError>;
}
