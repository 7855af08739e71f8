use std::sync::Arc;
use tokio::sync::watch;

/// Generation counter telling list views to re-fetch.
///
/// Every bump moves the counter forward; observers react to the change, not
/// to the value. Clones share the same counter.
#[derive(Debug, Clone)]
pub struct RefreshSignal {
    sender: Arc<watch::Sender<u64>>,
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshSignal {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Advances the generation and wakes every subscriber.
    pub fn bump(&self) -> u64 {
        self.sender.send_modify(|generation| {
            *generation = generation.wrapping_add(1);
        });
        let generation = *self.sender.borrow();
        tracing::debug!(generation, "task list refresh requested");
        generation
    }

    pub fn generation(&self) -> u64 {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }

    pub fn watcher(&self) -> RefreshWatcher {
        RefreshWatcher {
            receiver: self.subscribe(),
        }
    }
}

/// Polling view of a [`RefreshSignal`] for loops that are not awaiting it.
#[derive(Debug)]
pub struct RefreshWatcher {
    receiver: watch::Receiver<u64>,
}

impl RefreshWatcher {
    /// True once per batch of bumps made since the last call.
    pub fn take_change(&mut self) -> bool {
        match self.receiver.has_changed() {
            Ok(true) => {
                self.receiver.borrow_and_update();
                true
            }
            _ => false,
        }
    }

    /// Waits for the next bump. Returns the generation it observed.
    pub async fn changed(&mut self) -> u64 {
        if self.receiver.changed().await.is_err() {
            return *self.receiver.borrow();
        }
        *self.receiver.borrow_and_update()
    }
}
