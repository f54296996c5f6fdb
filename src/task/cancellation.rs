use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Shared flag telling a chunked computation to stop at its next yield point.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// One logical target (a widget, an output line) that runs at most one
/// long computation at a time.
///
/// `begin` cancels whatever was running for the slot before handing out a
/// fresh token, so a superseded computation never delivers a result.
#[derive(Debug)]
pub struct ComputationSlot {
    name: String,
    current: Option<CancellationToken>,
}

impl ComputationSlot {
    pub fn new(name: impl Into<String>) -> ComputationSlot {
        ComputationSlot { name: name.into(), current: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn begin(&mut self) -> CancellationToken {
        if let Some(previous) = self.current.take() {
            if !previous.is_cancelled() {
                debug!(slot = %self.name, "superseding in-flight computation");
            }
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.current = Some(token.clone());
        token
    }

    /// Cancels the running computation, if any, without starting a new one.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn begin_supersedes_previous_token() {
        let mut slot = ComputationSlot::new("riemann");
        let first = slot.begin();
        let second = slot.begin();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        slot.clear();
        assert!(second.is_cancelled());
    }
}
