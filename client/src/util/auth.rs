//! Shared route-guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route applies the same rule: wait while the session is
//! bootstrapping, send anonymous visitors to `/auth`, and send signed-in
//! non-admins away from admin screens to `/catalog`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos_router::NavigateOptions;
use shop::SessionState;

pub const SIGN_IN_PATH: &str = "/auth";
pub const CATALOG_PATH: &str = "/catalog";

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Bootstrap has not settled; render a placeholder.
    Loading,
    SignIn,
    Forbidden,
    Allowed,
}

impl RouteAccess {
    /// Where a denied visitor is sent, if anywhere.
    #[must_use]
    pub fn redirect_to(self) -> Option<&'static str> {
        match self {
            Self::SignIn => Some(SIGN_IN_PATH),
            Self::Forbidden => Some(CATALOG_PATH),
            Self::Loading | Self::Allowed => None,
        }
    }
}

#[must_use]
pub fn route_access(state: &SessionState, admin_only: bool) -> RouteAccess {
    if state.is_loading() {
        RouteAccess::Loading
    } else if !state.is_authenticated() {
        RouteAccess::SignIn
    } else if admin_only && !state.is_admin() {
        RouteAccess::Forbidden
    } else {
        RouteAccess::Allowed
    }
}

/// Landing target for `/`: the catalog once signed in, otherwise sign-in.
/// `None` while bootstrap is pending.
#[must_use]
pub fn home_target(state: &SessionState) -> Option<&'static str> {
    if state.is_loading() {
        None
    } else if state.is_authenticated() {
        Some(CATALOG_PATH)
    } else {
        Some(SIGN_IN_PATH)
    }
}

/// Navigation that replaces the current history entry.
#[must_use]
pub fn replace_history() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}
