//! Local UI chrome state: the toast queue.
//!
//! DESIGN
//! ======
//! Toasts are plain data in `UiState` so queue rules stay testable. The
//! [`UiNotifier`] adapter pushes toasts into the context signal and schedules
//! their dismissal; it is what shop store operations receive as their
//! notifier in the browser.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use leptos::prelude::*;
use shop::{NoticeKind, Notifier};

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u64 = 2_500;
/// Oldest toasts are dropped past this many.
pub const MAX_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl UiState {
    /// Queue a toast and return its id.
    pub fn push_toast(&mut self, message: impl Into<String>, kind: NoticeKind) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast { id, message: message.into(), kind });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

/// Toast-and-`window.confirm` notifier over the UI context signal.
#[derive(Clone, Copy, Debug)]
pub struct UiNotifier {
    ui: RwSignal<UiState>,
}

impl UiNotifier {
    pub fn new(ui: RwSignal<UiState>) -> Self {
        Self { ui }
    }

    /// Notifier over the `UiState` context.
    pub fn from_context() -> Self {
        Self::new(expect_context::<RwSignal<UiState>>())
    }
}

impl Notifier for UiNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        let Some(id) = self.ui.try_update(|ui| ui.push_toast(message, kind)) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let ui = self.ui;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(TOAST_DURATION_MS)).await;
                ui.update(|ui| ui.dismiss_toast(id));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window().is_some_and(|w| w.confirm_with_message(prompt).unwrap_or(false))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = prompt;
            false
        }
    }
}
