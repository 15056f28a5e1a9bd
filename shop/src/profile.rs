//! Profile editing and account self-deletion.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::error::ApiError;
use crate::forms::{FieldErrors, INVALID_EMAIL_MESSAGE, is_valid_email};
use crate::notify::{NoticeKind, Notifier};
use crate::session::{NOT_SIGNED_IN_MESSAGE, SessionStore};
use crate::storage::KeyValueStore;
use crate::transport::Transport;
use crate::types::{ProfilePatch, User};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const SHORT_PASSWORD_MESSAGE: &str = "Password must be at least 6 characters";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
pub const NOTHING_TO_UPDATE_MESSAGE: &str = "Nothing to update";
pub const PROFILE_SAVED_MESSAGE: &str = "Profile saved";
pub const PROFILE_SAVE_FALLBACK_MESSAGE: &str = "Failed to update profile";
pub const CONFIRM_EMAIL_MISMATCH_MESSAGE: &str = "Email confirmation does not match";
pub const ACCOUNT_DELETED_MESSAGE: &str = "Account deleted";

/// Editable copy of the signed-in user's profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// What submitting the form should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileSubmission {
    Invalid(FieldErrors),
    Unchanged,
    Patch(ProfilePatch),
}

impl ProfileForm {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            email: user.email.clone(),
            ..Self::default()
        }
    }

    fn wants_password_change(&self) -> bool {
        !self.password.is_empty() || !self.password_confirmation.is_empty()
    }

    /// Live validation. Password rules only apply once either password
    /// field has been touched.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if !is_valid_email(&self.email) {
            errors.insert("email", INVALID_EMAIL_MESSAGE);
        }
        if self.wants_password_change() {
            if self.password.chars().count() < MIN_PASSWORD_LEN {
                errors.insert("password", SHORT_PASSWORD_MESSAGE);
            }
            if self.password != self.password_confirmation {
                errors.insert("password_confirmation", PASSWORD_MISMATCH_MESSAGE);
            }
        }
        errors
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.email.trim().is_empty() && self.validate().is_empty()
    }

    /// Fields that differ from `current`, plus both password fields when a
    /// password change was requested.
    #[must_use]
    pub fn diff(&self, current: &User) -> ProfilePatch {
        let changed = |form: &str, held: Option<&str>| {
            (form != held.unwrap_or_default()).then(|| form.to_owned())
        };
        let email = self.email.trim();
        let mut patch = ProfilePatch {
            first_name: changed(&self.first_name, current.first_name.as_deref()),
            last_name: changed(&self.last_name, current.last_name.as_deref()),
            email: changed(email, Some(current.email.as_str())),
            ..ProfilePatch::default()
        };
        if self.wants_password_change() {
            patch.password = Some(self.password.clone());
            patch.password_confirmation = Some(self.password_confirmation.clone());
        }
        patch
    }

    #[must_use]
    pub fn submission(&self, current: &User) -> ProfileSubmission {
        let errors = self.validate();
        if !errors.is_empty() {
            return ProfileSubmission::Invalid(errors);
        }
        let patch = self.diff(current);
        if patch.is_empty() { ProfileSubmission::Unchanged } else { ProfileSubmission::Patch(patch) }
    }

    pub fn clear_passwords(&mut self) {
        self.password.clear();
        self.password_confirmation.clear();
    }
}

/// Validate, diff and send the form. Notices are raised for every outcome.
/// Returns the updated user, or `None` when there was nothing to send.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for local failures, or the request
/// failure. The password fields are cleared only after a successful save.
pub async fn save_profile<T, S>(
    session: &mut SessionStore<T, S>,
    form: &mut ProfileForm,
    notifier: &impl Notifier,
) -> Result<Option<User>, ApiError>
where
    T: Transport,
    S: KeyValueStore,
{
    let Some(current) = session.user().cloned() else {
        return Err(ApiError::Validation(NOT_SIGNED_IN_MESSAGE.to_owned()));
    };

    match form.submission(&current) {
        ProfileSubmission::Invalid(errors) => {
            let message = errors.first().unwrap_or(INVALID_EMAIL_MESSAGE).to_owned();
            notifier.error(&message);
            Err(ApiError::Validation(message))
        }
        ProfileSubmission::Unchanged => {
            notifier.notify(NOTHING_TO_UPDATE_MESSAGE, NoticeKind::Info);
            Ok(None)
        }
        ProfileSubmission::Patch(patch) => match session.update_profile(&patch).await {
            Ok(user) => {
                notifier.success(PROFILE_SAVED_MESSAGE);
                form.clear_passwords();
                Ok(Some(user))
            }
            Err(err) => {
                notifier.error(&err.message_or(PROFILE_SAVE_FALLBACK_MESSAGE));
                Err(err)
            }
        },
    }
}

/// Case-insensitive, whitespace-trimmed comparison of the typed
/// confirmation against the account email.
#[must_use]
pub fn confirm_email_matches(typed: &str, account_email: &str) -> bool {
    let typed = typed.trim();
    !typed.is_empty() && typed.to_lowercase() == account_email.trim().to_lowercase()
}

/// Display text for a failed account deletion. A server-supplied message
/// wins over the per-status wording.
#[must_use]
pub fn account_delete_error_message(err: &ApiError) -> String {
    if let Some(message) = err.server_message() {
        return message;
    }
    match err {
        ApiError::Status { status: 422, .. } => CONFIRM_EMAIL_MISMATCH_MESSAGE.to_owned(),
        ApiError::Status { status: 403, .. } => {
            "Forbidden (you cannot delete this account)".to_owned()
        }
        ApiError::Status { status: 404, .. } => "User not found".to_owned(),
        ApiError::Status { .. } => "Failed to delete account (ask administrator)".to_owned(),
        _ => err.to_string(),
    }
}

/// Delete the signed-in account, then sign out locally.
///
/// # Errors
///
/// A confirmation that does not match the account email fails locally
/// without a request. Request failures keep the session and are reported
/// through the notifier using [`account_delete_error_message`].
pub async fn delete_account<T, S>(
    session: &mut SessionStore<T, S>,
    typed_email: &str,
    notifier: &impl Notifier,
) -> Result<(), ApiError>
where
    T: Transport,
    S: KeyValueStore,
{
    let Some(user) = session.user().cloned() else {
        return Err(ApiError::Validation(NOT_SIGNED_IN_MESSAGE.to_owned()));
    };
    if !confirm_email_matches(typed_email, &user.email) {
        notifier.error(CONFIRM_EMAIL_MISMATCH_MESSAGE);
        return Err(ApiError::Validation(CONFIRM_EMAIL_MISMATCH_MESSAGE.to_owned()));
    }

    match session.client().delete_user(user.id, Some(typed_email.trim())).await {
        Ok(()) => {
            tracing::info!(user_id = user.id, "account deleted");
            notifier.success(ACCOUNT_DELETED_MESSAGE);
            session.logout();
            Ok(())
        }
        Err(err) => {
            notifier.error(&account_delete_error_message(&err));
            Err(err)
        }
    }
}
