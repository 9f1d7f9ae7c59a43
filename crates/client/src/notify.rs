//! User-facing failure notifications
//!
//! The pipeline reports unexpected failures through [`Notifier`]; a UI
//! layer implements it as a toast.

/// Generic message shown for transport and server failures
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";

pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Notifier that only logs, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(notification = message, "User notification");
    }
}
