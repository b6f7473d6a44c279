//! Progress reporting and coarse-grained cancellation.

use std::fmt::Debug;

/// Trait for progress monitors passed through every long-running phase.
///
/// The engine polls `is_canceled` between input entries.
pub trait ProgressMonitor: Send + Sync + Debug {
    /// Announce the start of a named task with the given amount of work.
    fn begin_task(&self, _name: &str, _total_work: usize) {}

    /// Report that `work` units of the current task are done.
    fn worked(&self, _work: usize) {}

    fn is_canceled(&self) -> bool {
        false
    }
}

/// A monitor that ignores progress and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressMonitor;

impl ProgressMonitor for NullProgressMonitor {}

/// A monitor that can be canceled from another thread.
///
/// Clones share the cancellation state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    token: tokio_util::sync::CancellationToken,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Get the underlying token, e.g. to share it with async code.
    pub fn inner(&self) -> &tokio_util::sync::CancellationToken {
        &self.token
    }
}

impl From<tokio_util::sync::CancellationToken> for CancellationToken {
    fn from(token: tokio_util::sync::CancellationToken) -> Self {
        Self { token }
    }
}

impl ProgressMonitor for CancellationToken {
    fn is_canceled(&self) -> bool {
        self.token.is_cancelled()
    }
}
