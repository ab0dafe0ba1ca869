//! Single-pending-import guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{PromptfoldError, Result};

/// Allows at most one import to be pending at a time.
#[derive(Debug, Clone, Default)]
pub struct ImportGate {
    busy: Arc<AtomicBool>,
}

impl ImportGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Fails with [`PromptfoldError::ImportInProgress`]
    /// while another ticket is alive.
    pub fn try_begin(&self) -> Result<ImportTicket> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Import rejected: another import is pending");
            return Err(PromptfoldError::ImportInProgress);
        }
        Ok(ImportTicket {
            busy: Arc::clone(&self.busy),
        })
    }

    /// Whether an import is currently pending.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the import gate. Dropping it releases the gate.
#[derive(Debug)]
pub struct ImportTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for ImportTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_rejected() {
        let gate = ImportGate::new();
        let _ticket = gate.try_begin().unwrap();

        let err = gate.try_begin().unwrap_err();
        assert!(matches!(err, PromptfoldError::ImportInProgress));
        assert!(gate.is_busy());
    }

    #[test]
    fn dropping_ticket_releases_gate() {
        let gate = ImportGate::new();
        drop(gate.try_begin().unwrap());

        assert!(!gate.is_busy());
        assert!(gate.try_begin().is_ok());
    }

    #[test]
    fn clones_share_state() {
        let gate = ImportGate::new();
        let other = gate.clone();
        let _ticket = gate.try_begin().unwrap();
        assert!(other.try_begin().is_err());
    }

    #[test]
    fn ticket_can_cross_threads() {
        let gate = ImportGate::new();
        let ticket = gate.try_begin().unwrap();
        std::thread::spawn(move || drop(ticket)).join().unwrap();
        assert!(!gate.is_busy());
    }
}
