//! Fire-and-forget handling of write-through results.

use scorm_core::Result;

/// Logs a failed engine operation and carries on.
///
/// ```ignore
/// engine.set_location("page-4").await.log_and_continue("set_location");
/// ```
pub trait LogAndContinue {
    type Output;

    /// Returns the value on success. On failure logs the error (warn for
    /// `NotReady`, error otherwise) and returns `None`.
    fn log_and_continue(self, operation: &str) -> Option<Self::Output>;
}

impl<T> LogAndContinue for Result<T> {
    type Output = T;

    fn log_and_continue(self, operation: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) if e.is_not_ready() => {
                tracing::warn!("[SyncEngine] {} skipped: {}", operation, e);
                None
            }
            Err(e) => {
                tracing::error!("[SyncEngine] {} failed: {}", operation, e);
                None
            }
        }
    }
}
