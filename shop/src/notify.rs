//! Notification and confirmation seam.
//!
//! Store operations that talk to the user (toasts, "are you sure?") do it
//! through an injected [`Notifier`]. The browser renders toasts and calls
//! `window.confirm`; the CLI writes to stderr and reads a y/N answer.

/// Severity of a notice; selects toast styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

pub trait Notifier {
    fn notify(&self, message: &str, kind: NoticeKind);

    /// Ask the user a yes/no question. `false` cancels the pending action.
    fn confirm(&self, prompt: &str) -> bool;

    fn success(&self, message: &str) {
        self.notify(message, NoticeKind::Success);
    }

    fn error(&self, message: &str) {
        self.notify(message, NoticeKind::Error);
    }
}
