use crate::board::TaskBoard;
use crate::error::AppError;
use crate::inflight::InFlight;
use crate::model::Task;
use crate::refresh::RefreshSignal;
use crate::remote::TaskService;
use std::sync::Arc;

pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this task?";

/// Asks the user to confirm or cancel a destructive action.
pub trait Confirmer {
    fn confirm(&mut self, message: &str) -> Result<bool, AppError>;
}

/// Answers every prompt the same way; used for `--yes` and in tests.
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&mut self, _message: &str) -> Result<bool, AppError> {
        Ok(self.0)
    }
}

/// A delete waiting for the user's answer. Nothing has been sent yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PendingDeletion {
    id: i64,
}

impl PendingDeletion {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn message(&self) -> &'static str {
        CONFIRM_DELETE_MESSAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// The service acknowledged; carries the task if it was listed locally.
    Deleted(Option<Task>),
    Cancelled,
}

pub struct DeletionFlow {
    service: Arc<dyn TaskService>,
    refresh: RefreshSignal,
    in_flight: InFlight,
}

impl DeletionFlow {
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

    pub fn request(&self, id: i64) -> PendingDeletion {
        PendingDeletion { id }
    }

    pub fn cancel(&self, pending: PendingDeletion) -> DeletionOutcome {
        tracing::debug!(id = pending.id, "delete cancelled");
        DeletionOutcome::Cancelled
    }

    /// Sends the delete. The local list only changes once the service says yes.
    pub async fn confirm(
        &self,
        pending: PendingDeletion,
        board: &mut TaskBoard,
    ) -> Result<DeletionOutcome, AppError> {
        let guard = self.in_flight.acquire("delete")?;
        let result = self.service.delete_task(pending.id).await;
        drop(guard);

        if let Err(err) = result {
            tracing::error!(id = pending.id, error = %err, "failed to delete task");
            return Err(err);
        }

        let removed = board.remove(pending.id);
        self.refresh.bump();
        tracing::info!(id = pending.id, "task deleted");
        Ok(DeletionOutcome::Deleted(removed))
    }

    /// Prompts through `confirmer`, then confirms or cancels accordingly.
    pub async fn resolve(
        &self,
        pending: PendingDeletion,
        confirmer: &mut dyn Confirmer,
        board: &mut TaskBoard,
    ) -> Result<DeletionOutcome, AppError> {
        if confirmer.confirm(pending.message())? {
            self.confirm(pending, board).await
        } else {
            Ok(self.cancel(pending))
        }
    }
}
