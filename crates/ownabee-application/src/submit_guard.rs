//! Caller-side guard against duplicate submissions.

use std::sync::atomic::{AtomicBool, Ordering};

use ownabee_core::error::{PortalError, Result};

/// Rejects a second submit while one is in flight.
///
/// Mutations are never deduplicated server-side, so every submit-style
/// action takes a [`SubmitPermit`] for its whole duration.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: AtomicBool,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard, or fails with [`PortalError::AlreadySubmitting`].
    pub fn try_begin(&self) -> Result<SubmitPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PortalError::AlreadySubmitting)?;
        Ok(SubmitPermit { guard: self })
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the guard on drop, including when the submit future is dropped.
#[derive(Debug)]
pub struct SubmitPermit<'a> {
    guard: &'a SubmitGuard,
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_rejected_until_release() {
        let guard = SubmitGuard::new();
        let permit = guard.try_begin().unwrap();
        assert!(guard.is_submitting());
        assert_eq!(guard.try_begin().unwrap_err(), PortalError::AlreadySubmitting);

        drop(permit);
        assert!(!guard.is_submitting());
        assert!(guard.try_begin().is_ok());
    }
}
