//! Cooperative cancellation for long-running generation.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A shared flag that asks a running generation to stop.
///
/// Clones share the same flag, so one clone can be handed to the worker
/// doing the generation while another stays with the caller. Checking is
/// cheap; the generator polls between attempts.
///
/// # Examples
///
/// ```
/// use nonomine_generator::CancelToken;
///
/// let token = CancelToken::new();
/// let worker_token = token.clone();
/// assert!(!worker_token.is_cancelled());
///
/// token.cancel();
/// assert!(worker_token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Irrevocable.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on
    /// any clone of this token.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_independent_tokens() {
        let a = CancelToken::new();
        let b = CancelToken::new();
        a.cancel();
        assert!(!b.is_cancelled());
    }
}
