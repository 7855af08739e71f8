//! Turns a filled-in [`TaskForm`] into a created or updated task.
//!
//! The flow runs strictly in order: validate, upload the picked photo (if
//! any), send the task, then bump the refresh signal. A failing step stops
//! everything after it. One flow serves one form; while a submission is
//! outstanding further calls are rejected with a `busy` error.

use crate::error::AppError;
use crate::form::TaskForm;
use crate::inflight::InFlight;
use crate::media::PhotoUpload;
use crate::model::Task;
use crate::refresh::RefreshSignal;
use crate::remote::TaskService;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub kind: SubmissionKind,
    /// The uploaded URL, else the edited task's stored photo, else empty.
    pub photo_url: String,
    /// The stored task, when the service echoed it back.
    pub task: Option<Task>,
    /// Refresh generation after the bump made by this submission.
    pub generation: u64,
}

pub struct SubmissionFlow {
    service: Arc<dyn TaskService>,
    refresh: RefreshSignal,
    in_flight: InFlight,
}

impl SubmissionFlow {
    pub fn new(service: Arc<dyn TaskService>, refresh: RefreshSignal) -> Self {
        Self {
            service,
            refresh,
            in_flight: InFlight::new(),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub async fn submit(&self, form: &mut TaskForm) -> Result<SubmissionOutcome, AppError> {
        let _guard = self.in_flight.acquire("submission")?;

        form.validate()?;
        form.parsed_hours()?;

        let photo_url = match form.fields.image.as_ref() {
            Some(image) => {
                let photo = PhotoUpload::read(image).await.map_err(|err| {
                    tracing::error!(image = image.as_str(), error = %err, "failed to read picked image");
                    AppError::upload(err)
                })?;
                let url = self.service.upload_photo(photo).await.map_err(|err| {
                    tracing::error!(error = %err, "photo upload failed");
                    AppError::upload(err)
                })?;
                tracing::info!(%url, "photo uploaded");
                url
            }
            None => form.current_photo_url(),
        };

        let payload = form.payload(photo_url.clone())?;
        let (kind, result) = if form.is_update() {
            (
                SubmissionKind::Updated,
                self.service.update_task(&payload).await,
            )
        } else {
            (
                SubmissionKind::Created,
                self.service.create_task(&payload).await,
            )
        };

        let task = result.map_err(|err| {
            tracing::error!(error = %err, ?kind, "task submission failed");
            AppError::submit(err)
        })?;

        let generation = self.refresh.bump();
        if kind == SubmissionKind::Created {
            form.reset();
        }
        tracing::info!(?kind, title = %payload.title, "task submitted");

        Ok(SubmissionOutcome {
            kind,
            photo_url,
            task,
            generation,
        })
    }
}
