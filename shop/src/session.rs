//! Session store: bearer token plus the authenticated profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! A session is only valid once the profile fetch for its token succeeded.
//! The store starts `Uninitialized`, moves to `Loading` while
//! [`SessionStore::bootstrap`] checks a persisted token, and settles in
//! `Authenticated` or `Anonymous`. Any profile-fetch rejection drops back to
//! `Anonymous` and forgets the token; nothing is retried.
//!
//! DESIGN
//! ======
//! The store owns its [`ApiClient`] and a plain [`SessionState`] snapshot.
//! UI layers keep the snapshot in their own reactive cell and rebuild a store
//! around it with [`SessionStore::with_state`] for each action.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde_json::Value;

use crate::api::ApiClient;
use crate::error::{ApiError, AuthAction, AuthError, normalize_auth_error};
use crate::storage::KeyValueStore;
use crate::transport::Transport;
use crate::types::{Credentials, ProfilePatch, Registration, User};

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Password confirmation does not match";
pub const NOT_SIGNED_IN_MESSAGE: &str = "Not signed in";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Loading,
    Authenticated,
    Anonymous,
}

/// Snapshot of the session. `user` is only set while `token` is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub token: Option<String>,
    pub user: Option<User>,
}

impl SessionState {
    #[must_use]
    pub fn anonymous() -> Self {
        Self { phase: SessionPhase::Anonymous, token: None, user: None }
    }

    #[must_use]
    pub fn loading() -> Self {
        Self { phase: SessionPhase::Loading, token: None, user: None }
    }

    #[must_use]
    pub fn authenticated(token: Option<String>, user: User) -> Self {
        Self { phase: SessionPhase::Authenticated, token, user: Some(user) }
    }

    /// True until bootstrap has settled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Uninitialized | SessionPhase::Loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated && self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.user.as_ref().is_some_and(User::is_admin)
    }
}

pub struct SessionStore<T, S> {
    client: ApiClient<T, S>,
    state: SessionState,
}

impl<T: Transport, S: KeyValueStore> SessionStore<T, S> {
    /// A store that has not looked at persisted state yet.
    pub fn new(client: ApiClient<T, S>) -> Self {
        Self { client, state: SessionState::default() }
    }

    /// Rebuild a store around a previously captured snapshot.
    pub fn with_state(client: ApiClient<T, S>, state: SessionState) -> Self {
        Self { client, state }
    }

    /// Construct and bootstrap in one step.
    pub async fn open(client: ApiClient<T, S>) -> Self {
        let mut store = Self::new(client);
        store.bootstrap().await;
        store
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient<T, S> {
        &self.client
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.is_admin()
    }

    /// Resolve a persisted token into a session. A missing token settles
    /// `Anonymous` without a request; a rejected profile fetch forgets it.
    pub async fn bootstrap(&mut self) -> &SessionState {
        self.state = SessionState::loading();

        let Some(token) = self.client.token() else {
            tracing::debug!("no persisted token; session is anonymous");
            self.state = SessionState::anonymous();
            return &self.state;
        };

        match self.client.profile().await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "session restored");
                let token = self.client.token().or(Some(token));
                self.state = SessionState::authenticated(token, user);
            }
            Err(err) => {
                tracing::info!(error = %err, "persisted token rejected; clearing session");
                self.clear();
            }
        }
        &self.state
    }

    /// Sign in and load the profile.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] with a display-ready message. The session is
    /// cleared on every failure path.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let credentials = Credentials { email: email.trim().to_owned(), password: password.to_owned() };
        if let Err(err) = self.client.sign_in(&credentials).await {
            self.clear();
            return Err(normalize_auth_error(&err, AuthAction::Login));
        }
        self.finish_sign_in(AuthAction::Login).await
    }

    /// Create an account, then sign in as it.
    ///
    /// # Errors
    ///
    /// A confirmation mismatch fails locally without touching the session or
    /// sending a request. Server failures clear the session.
    pub async fn register(&mut self, registration: &Registration) -> Result<User, AuthError> {
        if registration.password != registration.password_confirmation {
            return Err(AuthError::new(PASSWORD_MISMATCH_MESSAGE));
        }
        if let Err(err) = self.client.sign_up(registration).await {
            self.clear();
            return Err(normalize_auth_error(&err, AuthAction::Register));
        }
        self.finish_sign_in(AuthAction::Register).await
    }

    async fn finish_sign_in(&mut self, action: AuthAction) -> Result<User, AuthError> {
        match self.client.profile().await {
            Ok(user) => {
                tracing::info!(user_id = user.id, ?action, "signed in");
                self.state = SessionState::authenticated(self.client.token(), user.clone());
                Ok(user)
            }
            Err(err) => {
                self.clear();
                Err(normalize_auth_error(&err, action))
            }
        }
    }

    /// Forget the token and user. Navigation is left to the caller.
    pub fn logout(&mut self) {
        tracing::info!("signed out");
        self.clear();
    }

    /// [`Self::logout`] and hand back the token that was active, so the
    /// caller can pass it to [`revoke_token`] later.
    pub fn end_session(&mut self) -> Option<String> {
        let token = self.client.token();
        self.logout();
        token
    }

    /// [`Self::end_session`], then revoke the old token server-side. Local
    /// state is already cleared when the request goes out.
    pub async fn sign_out(&mut self) {
        if let Some(token) = self.end_session() {
            revoke_token(&self.client, &token).await;
        }
    }

    /// Re-fetch the profile for the current token.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; the session is cleared when it happens.
    pub async fn refresh_profile(&mut self) -> Result<User, ApiError> {
        match self.client.profile().await {
            Ok(user) => {
                self.state = SessionState::authenticated(self.client.token(), user.clone());
                Ok(user)
            }
            Err(err) => {
                tracing::info!(error = %err, "profile refresh rejected; clearing session");
                self.clear();
                Err(err)
            }
        }
    }

    /// Send a profile patch and fold the result into the held user. Fields
    /// returned by the server are applied first, then the sent fields.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::Validation`] when nobody is signed in, or with
    /// the request failure. The session is kept on request failure.
    pub async fn update_profile(&mut self, patch: &ProfilePatch) -> Result<User, ApiError> {
        let Some(current) = self.state.user.clone() else {
            return Err(ApiError::Validation(NOT_SIGNED_IN_MESSAGE.to_owned()));
        };
        let response = self.client.update_profile(patch).await?;
        let merged = merge_user(&current, &response, patch);
        self.state = SessionState::authenticated(self.client.token(), merged.clone());
        Ok(merged)
    }

    fn clear(&mut self) {
        self.client.set_token(None);
        self.state = SessionState::anonymous();
    }
}

/// Best-effort `DELETE /users/sign_out` for a token already forgotten
/// locally. Failures are logged and dropped.
pub async fn revoke_token<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>, token: &str) {
    if let Err(err) = client.sign_out(token).await {
        tracing::warn!(error = %err, "server sign-out failed");
    }
}

/// Overlay the server response (`{user:{..}}` or bare) and then the patch
/// onto `current`. Falls back to `current` if the overlay no longer decodes.
fn merge_user(current: &User, response: &Value, patch: &ProfilePatch) -> User {
    let Ok(Value::Object(mut base)) = serde_json::to_value(current) else {
        return current.clone();
    };

    let returned = match response.get("user") {
        Some(Value::Object(user)) => Some(user),
        _ => response.as_object(),
    };
    if let Some(fields) = returned {
        for (key, value) in fields {
            base.insert(key.clone(), value.clone());
        }
    }
    if let Ok(Value::Object(sent)) = serde_json::to_value(patch) {
        for (key, value) in sent {
            base.insert(key, value);
        }
    }

    match serde_json::from_value(Value::Object(base)) {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(error = %err, "profile response did not merge; keeping previous user");
            current.clone()
        }
    }
}
