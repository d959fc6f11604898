//! Per-operation loading state and supersession tokens.

use crate::error::{Result, VoxError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Loading flag and last error of one kind of operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationState {
    loading: bool,
    error: Option<String>,
}

impl OperationState {
    /// Mark the operation as started; fails if it is already running.
    pub fn begin(&mut self, name: &str) -> Result<()> {
        if self.loading {
            return Err(VoxError::Busy(name.to_string()));
        }
        self.loading = true;
        self.error = None;
        Ok(())
    }

    pub fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Clear without recording an outcome.
    pub fn reset(&mut self) {
        self.loading = false;
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Issues tokens for one kind of operation. Issuing a token supersedes every
/// token issued before it.
#[derive(Debug, Clone, Default)]
pub struct CancellationSource {
    generation: Arc<AtomicU64>,
}

impl CancellationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> CancellationToken {
        let issued = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        CancellationToken {
            generation: Arc::clone(&self.generation),
            issued,
        }
    }

    /// Supersede all outstanding tokens without issuing a new one.
    pub fn cancel_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct CancellationToken {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl CancellationToken {
    pub fn is_cancelled(&self) -> bool {
        self.generation.load(Ordering::SeqCst) != self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_twice_is_busy() {
        let mut state = OperationState::default();
        state.begin("preview").unwrap();

        assert!(matches!(state.begin("preview"), Err(VoxError::Busy(_))));
        state.fail("Failed to generate preview audio");
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some("Failed to generate preview audio"));

        state.begin("preview").unwrap();
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_new_token_supersedes_old() {
        let source = CancellationSource::new();
        let first = source.issue();
        assert!(!first.is_cancelled());

        let second = source.issue();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        source.cancel_all();
        assert!(second.is_cancelled());
    }

    #[test]
    fn test_token_across_threads() {
        let source = CancellationSource::new();
        let token = source.issue();

        let handle = std::thread::spawn({
            let source = source.clone();
            move || source.cancel_all()
        });
        handle.join().unwrap();

        assert!(token.is_cancelled());
    }
}
