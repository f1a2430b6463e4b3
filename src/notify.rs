use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
    Info,
}

impl ToastKind {
    pub fn duration(self) -> Duration {
        match self {
            ToastKind::Error => Duration::from_millis(6000),
            ToastKind::Success | ToastKind::Info => Duration::from_millis(4000),
        }
    }
}

/// Default duration for toasts shown without an explicit kind duration
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Fire-and-forget user notifications
pub trait Notifier: Send + Sync {
    fn show(&self, kind: ToastKind, message: &str, duration: Duration);

    fn show_error(&self, message: &str) {
        self.show(ToastKind::Error, message, ToastKind::Error.duration());
    }

    fn show_success(&self, message: &str) {
        self.show(ToastKind::Success, message, ToastKind::Success.duration());
    }

    fn show_info(&self, message: &str) {
        self.show(ToastKind::Info, message, ToastKind::Info.duration());
    }
}

/// Writes toasts to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, kind: ToastKind, message: &str, duration: Duration) {
        let ms = duration.as_millis() as u64;
        match kind {
            ToastKind::Error => warn!(duration_ms = ms, "❌ {}", message),
            ToastKind::Success => info!(duration_ms = ms, "✅ {}", message),
            ToastKind::Info => info!(duration_ms = ms, "ℹ️  {}", message),
        }
    }
}
