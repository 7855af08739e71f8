use crate::error::AppError;
use crate::model::{Task, User};
use crate::refresh::RefreshWatcher;
use crate::remote::TaskService;

/// Assignees offered by the forms, loaded on demand rather than implicitly.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub async fn reload(&mut self, service: &dyn TaskService) -> Result<&[User], AppError> {
        let users = service.list_users().await.inspect_err(|err| {
            tracing::error!(error = %err, "failed to load users");
        })?;
        self.users = users;
        Ok(&self.users)
    }
}

/// The task list shown to the user. Replaced wholesale on every refresh.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    users: UserDirectory,
}

impl TaskBoard {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            users: UserDirectory::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn users_mut(&mut self) -> &mut UserDirectory {
        &mut self.users
    }

    pub fn find(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.find(id).is_some()
    }

    /// Drops a task locally. Returns the removed task, if it was listed.
    pub fn remove(&mut self, id: i64) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Re-fetches the list. On failure the previous list stays in place.
    pub async fn refresh(&mut self, service: &dyn TaskService) -> Result<&[Task], AppError> {
        let tasks = service.list_tasks().await.inspect_err(|err| {
            tracing::error!(error = %err, "failed to fetch tasks");
        })?;
        tracing::debug!(count = tasks.len(), "task list refreshed");
        self.tasks = tasks;
        Ok(&self.tasks)
    }

    /// Re-fetches only if the refresh signal moved since the last sync.
    pub async fn sync(
        &mut self,
        service: &dyn TaskService,
        watcher: &mut RefreshWatcher,
    ) -> Result<bool, AppError> {
        if !watcher.take_change() {
            return Ok(false);
        }
        self.refresh(service).await?;
        Ok(true)
    }
}
