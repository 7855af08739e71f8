use crate::error::AppError;
use crate::media::PhotoUpload;
use crate::model::{Task, TaskPayload, User};
use crate::remote::{
    CREATE_TASK_PATH, DELETE_TASK_PATH, LIST_TASKS_PATH, LIST_USERS_PATH, TaskService,
    UPDATE_TASK_PATH, UPLOAD_PHOTO_PATH,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:1111/";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Debug, Clone)]
pub struct HttpTaskService {
    http_client: Client,
    base_url: Url,
}

impl HttpTaskService {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        Ok(Self {
            http_client,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, AppError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|err| AppError::invalid_input(format!("{endpoint}: {err}")))?;
        tracing::debug!(%method, %url, "sending request");
        Ok(self.http_client.request(method, url))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(%status, error = %err, "failed to read error response body");
                String::new()
            }
        };
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body.trim().to_string()
        };
        Err(AppError::server(status.as_u16(), message))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| AppError::invalid_data(format!("unexpected response body: {err}")))
    }

    // Create and update answer with the stored task, but an empty or
    // differently shaped body still means the write went through.
    async fn send_for_task(&self, builder: RequestBuilder) -> Result<Option<Task>, AppError> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes).ok())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("base url is required"));
    }

    let mut url = Url::parse(trimmed)
        .map_err(|err| AppError::invalid_input(format!("invalid base url {trimmed}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(AppError::invalid_input(format!(
            "invalid base url {trimmed}"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let builder = self.request(Method::GET, LIST_TASKS_PATH)?;
        self.send_json(builder).await
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let builder = self.request(Method::GET, LIST_USERS_PATH)?;
        self.send_json(builder).await
    }

    async fn create_task(&self, payload: &TaskPayload) -> Result<Option<Task>, AppError> {
        let builder = self.request(Method::POST, CREATE_TASK_PATH)?.json(payload);
        self.send_for_task(builder).await
    }

    async fn update_task(&self, payload: &TaskPayload) -> Result<Option<Task>, AppError> {
        let builder = self.request(Method::POST, UPDATE_TASK_PATH)?.json(payload);
        self.send_for_task(builder).await
    }

    async fn delete_task(&self, id: i64) -> Result<(), AppError> {
        let builder = self
            .request(Method::DELETE, DELETE_TASK_PATH)?
            .query(&[("id", id)]);
        self.send(builder).await?;
        Ok(())
    }

    async fn upload_photo(&self, photo: PhotoUpload) -> Result<String, AppError> {
        let part = Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(&photo.content_type)
            .map_err(|err| AppError::invalid_input(err.to_string()))?;
        let form = Form::new().part("file", part);
        let builder = self.request(Method::POST, UPLOAD_PHOTO_PATH)?.multipart(form);

        let response: UploadResponse = self.send_json(builder).await?;
        Ok(response.url)
    }
}
