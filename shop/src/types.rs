//! REST DTOs for the storefront API.
//!
//! DESIGN
//! ======
//! Response types are lenient: optional text fields default to `None`,
//! prices accept JSON numbers or strings, and order lines accept either of
//! the two collection names the server has used. Request types skip unset
//! fields so PATCH bodies only carry what changed.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ItemId = u64;
pub type UserId = u64;
pub type OrderId = u64;

/// Account role as reported by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    User,
    Admin,
    /// Any role string this client does not know. Never grants admin access.
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "user" => Self::User,
            "admin" => Self::Admin,
            _ => Self::Other(raw),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

/// The authenticated account profile (`GET /api/v1/profile`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// `"First Last"` trimmed, or the email when both names are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let full = full.trim();
        if full.is_empty() { self.email.clone() } else { full.to_owned() }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Either `{ "user": {...} }` or a bare user object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum UserPayload {
    Wrapped { user: User },
    Bare(User),
}

impl UserPayload {
    #[must_use]
    pub fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

/// A catalog product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
}

/// Body for admin item create/update.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// A placed order as returned by `GET /api/v1/orders[/:id]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub amount: Decimal,
    /// Server timestamp as sent; shown verbatim.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, rename = "order_descriptions", alias = "order_items")]
    pub lines: Vec<OrderLine>,
}

/// An order as returned by `POST /orders`: either bare or `{ "order": ... }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OrderPayload {
    Wrapped { order: Order },
    Bare(Order),
}

impl OrderPayload {
    #[must_use]
    pub fn into_order(self) -> Order {
        match self {
            Self::Wrapped { order } | Self::Bare(order) => order,
        }
    }
}

/// One product row inside an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: u64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub item: Option<Item>,
}

impl OrderLine {
    /// Unit price times quantity; zero when the item was not embedded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item
            .as_ref()
            .map_or(Decimal::ZERO, |item| item.price * Decimal::from(self.quantity))
    }
}

/// One `{item_id, quantity}` pair of an order-creation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Body of `POST /users/sign_in`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /users`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial update for `PATCH /api/v1/profile`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

impl ProfilePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.password_confirmation.is_none()
    }
}

/// Body for admin user create/update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}
