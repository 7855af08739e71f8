use crate::board::TaskBoard;
use crate::config::Config;
use crate::deletion::{Confirmer, DeletionFlow, DeletionOutcome, PendingDeletion};
use crate::error::AppError;
use crate::form::TaskForm;
use crate::model::{Task, User};
use crate::notify::{Notice, Notifier};
use crate::refresh::{RefreshSignal, RefreshWatcher};
use crate::remote::{HttpTaskService, TaskService};
use crate::submission::{SubmissionFlow, SubmissionOutcome};
use std::sync::Arc;

/// Top-level container: the task list, the refresh signal, one submission
/// flow per form, the delete flow and the notifier that surfaces outcomes.
pub struct TaskDesk {
    service: Arc<dyn TaskService>,
    board: TaskBoard,
    refresh: RefreshSignal,
    watcher: RefreshWatcher,
    add_flow: SubmissionFlow,
    update_flow: SubmissionFlow,
    deletion: DeletionFlow,
    notifier: Box<dyn Notifier>,
}

impl TaskDesk {
    pub fn new(service: Arc<dyn TaskService>, notifier: Box<dyn Notifier>) -> Self {
        let refresh = RefreshSignal::new();
        Self {
            board: TaskBoard::default(),
            watcher: refresh.watcher(),
            add_flow: SubmissionFlow::new(service.clone(), refresh.clone()),
            update_flow: SubmissionFlow::new(service.clone(), refresh.clone()),
            deletion: DeletionFlow::new(service.clone(), refresh.clone()),
            refresh,
            service,
            notifier,
        }
    }

    pub fn from_config(config: &Config, notifier: Box<dyn Notifier>) -> Result<Self, AppError> {
        let service = HttpTaskService::new(&config.client_config())?;
        Ok(Self::new(Arc::new(service), notifier))
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn refresh_signal(&self) -> &RefreshSignal {
        &self.refresh
    }

    pub async fn refresh_tasks(&mut self) -> Result<&[Task], AppError> {
        self.board.refresh(self.service.as_ref()).await
    }

    /// Re-fetches the list if anything bumped the refresh signal.
    pub async fn sync(&mut self) -> Result<bool, AppError> {
        self.board
            .sync(self.service.as_ref(), &mut self.watcher)
            .await
    }

    pub async fn load_users(&mut self) -> Result<&[User], AppError> {
        self.board
            .users_mut()
            .reload(self.service.as_ref())
            .await
    }

    /// Fetches the current list and returns the task for the detail view.
    pub async fn show_task(&mut self, id: i64) -> Result<Task, AppError> {
        self.refresh_tasks().await?;
        self.board
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::invalid_input("task not found"))
    }

    /// Seeds an update form from the current server copy of a task.
    pub async fn edit_form(&mut self, id: i64) -> Result<TaskForm, AppError> {
        let task = self.show_task(id).await?;
        Ok(TaskForm::update(task))
    }

    pub async fn add_task(&mut self, form: &mut TaskForm) -> Result<SubmissionOutcome, AppError> {
        let result = self.add_flow.submit(form).await;
        self.report(&result, "Task saved successfully", "Error saving task");
        result
    }

    pub async fn update_task(
        &mut self,
        form: &mut TaskForm,
    ) -> Result<SubmissionOutcome, AppError> {
        let result = self.update_flow.submit(form).await;
        self.report(&result, "Task updated successfully", "Error updating task");
        result
    }

    /// First half of a two-step delete; nothing is sent until
    /// [`TaskDesk::confirm_delete`] is called with the returned value.
    pub fn request_delete(&self, id: i64) -> PendingDeletion {
        let pending = self.deletion.request(id);
        tracing::debug!(id = pending.id(), "delete requested");
        pending
    }

    pub async fn confirm_delete(
        &mut self,
        pending: PendingDeletion,
    ) -> Result<DeletionOutcome, AppError> {
        let result = self.deletion.confirm(pending, &mut self.board).await;
        self.report_deletion(&result);
        result
    }

    /// Asks `confirmer` first; nothing is sent unless the user agrees.
    pub async fn delete_task(
        &mut self,
        id: i64,
        confirmer: &mut dyn Confirmer,
    ) -> Result<DeletionOutcome, AppError> {
        let pending = self.request_delete(id);
        let result = self
            .deletion
            .resolve(pending, confirmer, &mut self.board)
            .await;
        self.report_deletion(&result);
        result
    }

    fn report_deletion(&self, result: &Result<DeletionOutcome, AppError>) {
        match result {
            Ok(DeletionOutcome::Deleted(_)) => {
                self.emit(Notice::success("Task deleted successfully"))
            }
            Ok(DeletionOutcome::Cancelled) => {}
            Err(err) => self.emit(failure_notice(err, "Error deleting task")),
        }
    }

    fn report<T>(&self, result: &Result<T, AppError>, success: &str, failure: &str) {
        match result {
            Ok(_) => self.emit(Notice::success(success)),
            Err(err) => self.emit(failure_notice(err, failure)),
        }
    }

    fn emit(&self, notice: Notice) {
        if let Err(err) = self.notifier.notify(&notice) {
            tracing::warn!(error = %err, notice = %notice, "failed to show notice");
        }
    }
}

fn failure_notice(err: &AppError, failure: &str) -> Notice {
    match err {
        AppError::InvalidInput(message) if message.starts_with("missing required fields") => {
            Notice::error("Please fill out all fields")
        }
        AppError::Upload(_) => Notice::error("Error uploading image"),
        AppError::Busy(message) => Notice::error(message.clone()),
        AppError::InvalidInput(message) => Notice::error(message.clone()),
        _ => Notice::error(failure),
    }
}

#[cfg(test)]
mod tests {
    use super::failure_notice;
    use crate::error::AppError;

    #[test]
    fn failure_notice_distinguishes_stages() {
        let missing = AppError::invalid_input("missing required fields: title");
        assert_eq!(
            failure_notice(&missing, "Error saving task").message,
            "Please fill out all fields"
        );

        let upload = AppError::upload(AppError::transport("reset"));
        assert_eq!(
            failure_notice(&upload, "Error saving task").message,
            "Error uploading image"
        );

        let submit = AppError::submit(AppError::server(500, "boom"));
        assert_eq!(
            failure_notice(&submit, "Error saving task").message,
            "Error saving task"
        );

        let hours = AppError::invalid_input("hours must be a whole number, got 'x'");
        assert_eq!(
            failure_notice(&hours, "Error saving task").message,
            "hours must be a whole number, got 'x'"
        );
    }
}
