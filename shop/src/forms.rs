//! Shared form-validation primitives.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use std::sync::LazyLock;

use regex::Regex;

pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email";

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Loose `local@domain.tld` shape check on the trimmed input.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_ok_and(|re| re.is_match(email.trim()))
}

/// Validation failures keyed by field name, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing an earlier one.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field, message)),
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    /// The first recorded message; what a single-line alert shows.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `Ok(())` when nothing was recorded, otherwise the first message.
    ///
    /// # Errors
    ///
    /// Returns the first recorded message.
    pub fn into_result(self) -> Result<(), String> {
        match self.entries.into_iter().next() {
            Some((_, message)) => Err(message),
            None => Ok(()),
        }
    }
}
