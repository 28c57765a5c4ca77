//! Reentrancy guard
//!
//! A value transfer hands control to an external vault implementation,
//! which could call back into the same agreement before the current
//! operation finishes. The guard rejects any such nested entry - and any
//! concurrent entry from another thread - while one guarded operation is
//! executing. Entry never blocks; it either succeeds or fails immediately
//! with `ReentrancyDetected`.

use std::sync::atomic::{AtomicBool, Ordering};
use tripact_types::{AgreementError, Result};

/// One-at-a-time entry flag for an agreement instance
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: AtomicBool,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the guard
    ///
    /// Fails with `ReentrancyDetected` if a guarded operation is already
    /// executing. The returned token releases the guard when dropped.
    pub fn enter(&self) -> Result<GuardEntry<'_>> {
        if self
            .entered
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Ok(GuardEntry { guard: self })
        } else {
            Err(AgreementError::ReentrancyDetected)
        }
    }
}

/// RAII token for an entered guard
pub struct GuardEntry<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardEntry<'_> {
    fn drop(&mut self) {
        self.guard.entered.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_entry_rejected() {
        let guard = ReentrancyGuard::new();

        let entry = guard.enter().unwrap();
        assert!(matches!(
            guard.enter(),
            Err(AgreementError::ReentrancyDetected)
        ));
        drop(entry);
    }

    #[test]
    fn test_guard_released_on_drop() {
        let guard = ReentrancyGuard::new();

        drop(guard.enter().unwrap());
        assert!(guard.enter().is_ok());
    }

    #[test]
    fn test_guard_released_on_error_path() {
        let guard = ReentrancyGuard::new();

        fn failing_op(guard: &ReentrancyGuard) -> Result<()> {
            let _entered = guard.enter()?;
            Err(AgreementError::ReentrancyDetected)
        }

        assert!(failing_op(&guard).is_err());
        assert!(guard.enter().is_ok());
    }
}
