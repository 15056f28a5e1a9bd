//! Error taxonomy and server error-payload normalization.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is scoped to the operation that triggered it. Callers get a
//! normalized, human-readable message; nothing here is retried.
//!
//! The server reports failures in several shapes:
//! - `{ "error": "code", "message": "text" }`
//! - `{ "error": "code", "message": ["a", "b"] }`
//! - `{ "errors": { "field": ["msg", ...] } }` (field-keyed validation map)
//! - `{ "errors": ["msg", ...] }`
//!
//! [`ErrorBody::message`] folds all of them into one line of text.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;
use serde_json::Value;

pub const EMAIL_TAKEN_MESSAGE: &str = "This email is already registered";
pub const LOGIN_FALLBACK_MESSAGE: &str = "Invalid email or password";
pub const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed";

/// Parsed body of a non-2xx response. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl ErrorBody {
    /// Parse a raw response body; anything that is not a JSON object yields
    /// an empty body.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Server error code (`"error"` field) when it is a string.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error.as_ref().and_then(Value::as_str)
    }

    /// Human-readable message carried by the body, if any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match &self.message {
            Some(Value::Array(parts)) => {
                let joined = join_strings(parts);
                if !joined.is_empty() {
                    return Some(joined);
                }
            }
            Some(Value::String(text)) if !text.trim().is_empty() => return Some(text.clone()),
            _ => {}
        }

        match &self.errors {
            Some(Value::Object(fields)) => {
                if let Some(first) = fields.get("email").and_then(first_string) {
                    if first.to_lowercase().contains("taken") {
                        return Some(EMAIL_TAKEN_MESSAGE.to_owned());
                    }
                    return Some(format!("Email {first}"));
                }
                let (field, messages) = fields.iter().next()?;
                first_string(messages).map(|first| format!("{field} {first}"))
            }
            Some(Value::Array(parts)) => {
                let joined = join_strings(parts);
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        }
    }
}

fn first_string(value: &Value) -> Option<&str> {
    match value {
        Value::Array(items) => items.first().and_then(Value::as_str),
        Value::String(text) => Some(text.as_str()),
        _ => None,
    }
}

fn join_strings(parts: &[Value]) -> String {
    parts
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure of a single REST operation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("{}", describe_status(.status, .body))]
    Status { status: u16, body: ErrorBody },
    /// A 2xx body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Client-side validation rejected the input before any request was sent.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Status { status, body } => *status == 401 || body.code() == Some("unauthorized"),
            _ => false,
        }
    }

    /// The server-supplied message, ignoring status-line fallbacks.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Status { body, .. } => body.message(),
            _ => None,
        }
    }

    /// Display text, or `fallback` when the error renders blank.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        let text = self.to_string();
        if text.trim().is_empty() { fallback.to_owned() } else { text }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn describe_status(status: &u16, body: &ErrorBody) -> String {
    body.message().unwrap_or_else(|| status_line(*status))
}

/// `"<code> <reason>"`, e.g. `"404 Not Found"`.
#[must_use]
pub fn status_line(status: u16) -> String {
    let reason = match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    };
    format!("{status} {reason}").trim_end().to_owned()
}

/// Which authentication flow failed; selects the fallback wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    fn fallback(self) -> &'static str {
        match self {
            Self::Login => LOGIN_FALLBACK_MESSAGE,
            Self::Register => REGISTER_FALLBACK_MESSAGE,
        }
    }
}

/// Login or registration failure with a message ready for display.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    pub status: Option<u16>,
}

impl AuthError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), status: None }
    }
}

/// Turn an API failure from a login/register flow into an [`AuthError`].
#[must_use]
pub fn normalize_auth_error(err: &ApiError, action: AuthAction) -> AuthError {
    let message = match err {
        ApiError::Status { body, .. } => body.message().unwrap_or_else(|| {
            if err.is_unauthorized() {
                match action {
                    AuthAction::Login => LOGIN_FALLBACK_MESSAGE.to_owned(),
                    AuthAction::Register => "Unauthorized".to_owned(),
                }
            } else {
                action.fallback().to_owned()
            }
        }),
        ApiError::Transport(_) | ApiError::Decode(_) | ApiError::Validation(_) => err.to_string(),
    };
    AuthError { message, status: err.status() }
}
