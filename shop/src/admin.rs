//! Admin item and user management rules.
//!
//! The server enforces authorization; these helpers only validate forms,
//! filter lists, and ask for confirmation before destructive calls.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use rust_decimal::Decimal;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::money::parse_price;
use crate::notify::{NoticeKind, Notifier};
use crate::storage::KeyValueStore;
use crate::transport::Transport;
use crate::types::{Item, ItemDraft, ItemId, Role, User, UserDraft, UserId};

pub const NAME_REQUIRED_MESSAGE: &str = "Name is required";
pub const INVALID_PRICE_MESSAGE: &str = "Price must be a non-negative number";
pub const PASSWORDS_REQUIRED_MESSAGE: &str = "Password and confirmation are required";
pub const PASSWORD_PAIR_MESSAGE: &str = "Enter both password and confirmation";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Password confirmation does not match";
pub const SELF_DELETE_MESSAGE: &str = "You can't delete yourself";
pub const SAVE_FALLBACK_MESSAGE: &str = "Save failed";
pub const DELETE_FALLBACK_MESSAGE: &str = "Delete failed";

/// Whether an editor is creating a record or editing an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

/// What a delete flow ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    Refused,
}

// =============================================================================
// Items
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ItemForm {
    #[must_use]
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.normalize().to_string(),
        }
    }

    /// Trimmed draft with the price rounded to cents; blank price is zero.
    ///
    /// # Errors
    ///
    /// Returns the message for the first failing field.
    pub fn to_draft(&self) -> Result<ItemDraft, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(NAME_REQUIRED_MESSAGE.to_owned());
        }
        let price = match parse_price(&self.price) {
            Some(price) if price >= Decimal::ZERO => price,
            _ => return Err(INVALID_PRICE_MESSAGE.to_owned()),
        };
        Ok(ItemDraft { name: name.to_owned(), description: self.description.trim().to_owned(), price })
    }
}

/// Validate and create or update an item, notifying on success.
///
/// # Errors
///
/// [`ApiError::Validation`] for form errors (no request sent), otherwise the
/// request failure.
pub async fn save_item<T, S>(
    client: &ApiClient<T, S>,
    mode: FormMode<ItemId>,
    form: &ItemForm,
    notifier: &impl Notifier,
) -> Result<(), ApiError>
where
    T: Transport,
    S: KeyValueStore,
{
    let draft = form.to_draft().map_err(ApiError::Validation)?;
    match mode {
        FormMode::Create => {
            client.create_item(&draft).await?;
            notifier.success("Item created");
        }
        FormMode::Edit(id) => {
            client.update_item(id, &draft).await?;
            notifier.success("Item updated");
        }
    }
    tracing::info!(?mode, name = %draft.name, "item saved");
    Ok(())
}

/// Confirm, then delete an item.
///
/// # Errors
///
/// Returns the request failure after reporting it through the notifier.
pub async fn delete_item<T, S>(
    client: &ApiClient<T, S>,
    item: &Item,
    notifier: &impl Notifier,
) -> Result<DeleteOutcome, ApiError>
where
    T: Transport,
    S: KeyValueStore,
{
    if !notifier.confirm(&format!("Delete item \"{}\"?", item.name)) {
        return Ok(DeleteOutcome::Cancelled);
    }
    match client.delete_item(item.id).await {
        Ok(()) => {
            notifier.success("Item deleted");
            Ok(DeleteOutcome::Deleted)
        }
        Err(err) => {
            notifier.error(&err.message_or(DELETE_FALLBACK_MESSAGE));
            Err(err)
        }
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub password_confirmation: String,
}

impl UserForm {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            email: user.email.clone(),
            role: user.role.clone(),
            ..Self::default()
        }
    }

    /// Build the request body. Creating requires both password fields;
    /// editing requires both or neither.
    ///
    /// # Errors
    ///
    /// Returns the message for the first failing rule.
    pub fn to_draft(&self, creating: bool) -> Result<UserDraft, String> {
        let password = self.password.trim();
        let confirmation = self.password_confirmation.trim();

        let credentials = if creating {
            if password.is_empty() || confirmation.is_empty() {
                return Err(PASSWORDS_REQUIRED_MESSAGE.to_owned());
            }
            Some((password, confirmation))
        } else if password.is_empty() && confirmation.is_empty() {
            None
        } else if password.is_empty() || confirmation.is_empty() {
            return Err(PASSWORD_PAIR_MESSAGE.to_owned());
        } else {
            Some((password, confirmation))
        };

        if let Some((password, confirmation)) = credentials {
            if password != confirmation {
                return Err(PASSWORD_MISMATCH_MESSAGE.to_owned());
            }
        }

        Ok(UserDraft {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            role: self.role.clone(),
            password: credentials.map(|(p, _)| p.to_owned()),
            password_confirmation: credentials.map(|(_, c)| c.to_owned()),
        })
    }
}

/// Case-insensitive substring search over `"first last email role"`.
#[must_use]
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let needle = query.trim().to_lowercase();
    users
        .iter()
        .filter(|user| needle.is_empty() || search_text(user).contains(&needle))
        .collect()
}

fn search_text(user: &User) -> String {
    format!(
        "{} {} {} {}",
        user.first_name.as_deref().unwrap_or_default(),
        user.last_name.as_deref().unwrap_or_default(),
        user.email,
        user.role.as_str()
    )
    .to_lowercase()
}

/// Validate and create or update a user, notifying on success.
///
/// # Errors
///
/// [`ApiError::Validation`] for form errors (no request sent), otherwise the
/// request failure.
pub async fn save_user<T, S>(
    client: &ApiClient<T, S>,
    mode: FormMode<UserId>,
    form: &UserForm,
    notifier: &impl Notifier,
) -> Result<(), ApiError>
where
    T: Transport,
    S: KeyValueStore,
{
    let draft = form.to_draft(mode == FormMode::Create).map_err(ApiError::Validation)?;
    match mode {
        FormMode::Create => {
            client.create_user(&draft).await?;
            notifier.success("User created");
        }
        FormMode::Edit(id) => {
            client.update_user(id, &draft).await?;
            notifier.success("User updated");
        }
    }
    tracing::info!(?mode, email = %draft.email, "user saved");
    Ok(())
}

/// Refuse self-deletion, confirm, then delete a user. The confirmed
/// target's email goes out as `confirm_email`.
///
/// # Errors
///
/// Returns the request failure after reporting it through the notifier.
pub async fn delete_user<T, S>(
    client: &ApiClient<T, S>,
    target: &User,
    current_user_id: Option<UserId>,
    notifier: &impl Notifier,
) -> Result<DeleteOutcome, ApiError>
where
    T: Transport,
    S: KeyValueStore,
{
    if current_user_id == Some(target.id) {
        notifier.notify(SELF_DELETE_MESSAGE, NoticeKind::Warning);
        return Ok(DeleteOutcome::Refused);
    }
    if !notifier.confirm(&format!("Delete user {}?", target.email)) {
        return Ok(DeleteOutcome::Cancelled);
    }
    match client.delete_user(target.id, Some(&target.email)).await {
        Ok(()) => {
            notifier.success("User deleted");
            Ok(DeleteOutcome::Deleted)
        }
        Err(err) => {
            notifier.error(&err.message_or(DELETE_FALLBACK_MESSAGE));
            Err(err)
        }
    }
}
