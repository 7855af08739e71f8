use crate::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};

/// One-request-at-a-time latch. The slot frees itself when the guard drops,
/// including when the owning future is dropped mid-request.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: AtomicBool,
}

pub struct InFlightGuard<'a> {
    busy: &'a AtomicBool,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn acquire(&self, what: &str) -> Result<InFlightGuard<'_>, AppError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::busy(format!("a {what} is already in progress")))?;
        Ok(InFlightGuard { busy: &self.busy })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::InFlight;

    #[test]
    fn second_acquire_is_rejected_until_release() {
        let latch = InFlight::new();

        let guard = latch.acquire("submission").unwrap();
        let err = latch.acquire("submission").err().unwrap();
        assert_eq!(err.code(), "busy");
        assert!(latch.is_busy());

        drop(guard);
        assert!(!latch.is_busy());
        assert!(latch.acquire("submission").is_ok());
    }
}
