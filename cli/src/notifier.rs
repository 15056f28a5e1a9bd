//! Terminal notifier: notices on stderr, confirmations as a y/N prompt.

#[cfg(test)]
#[path = "notifier_test.rs"]
mod notifier_test;

use std::io::{self, BufRead, Write};

use shop::{NoticeKind, Notifier};

#[derive(Clone, Copy, Debug, Default)]
pub struct StderrNotifier {
    /// Answer every confirmation with yes (`--yes`).
    pub assume_yes: bool,
}

/// `y`/`yes` in any case; anything else declines.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn notice_line(message: &str, kind: NoticeKind) -> String {
    format!("[{}] {message}", kind.as_str())
}

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        eprintln!("{}", notice_line(message, kind));
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "could not read confirmation");
                false
            }
        }
    }
}
