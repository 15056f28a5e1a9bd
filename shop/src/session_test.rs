use super::*;

use serde_json::json;

use crate::storage::TOKEN_KEY;
use crate::support::{ScriptedTransport, client};
use crate::transport::Method;
use crate::types::Role;

fn profile_json() -> Value {
    json!({"id": 5, "email": "ann@shop.test", "first_name": "Ann", "last_name": "Lee", "role": "user"})
}

fn store_with(
    transport: &ScriptedTransport,
) -> (SessionStore<ScriptedTransport, crate::MemoryStore>, crate::MemoryStore) {
    let (api, _t, store) = client();
    let api = ApiClient::new(api.base_url(), transport.clone(), store.clone());
    (SessionStore::new(api), store)
}

// =============================================================
// Bootstrap
// =============================================================

#[tokio::test]
async fn bootstrap_without_token_is_anonymous_and_sends_nothing() {
    let transport = ScriptedTransport::new();
    let (mut session, _store) = store_with(&transport);
    assert_eq!(session.state().phase, SessionPhase::Uninitialized);
    assert!(session.state().is_loading());

    session.bootstrap().await;

    assert_eq!(session.state(), &SessionState::anonymous());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn bootstrap_with_valid_token_authenticates() {
    let transport = ScriptedTransport::new();
    transport.reply(200, profile_json());
    let (api, _t, store) = client();
    store.set(TOKEN_KEY, "persisted").unwrap();
    let api = ApiClient::new(api.base_url(), transport.clone(), store.clone());

    let session = SessionStore::open(api).await;

    assert_eq!(session.state().phase, SessionPhase::Authenticated);
    assert_eq!(session.state().token.as_deref(), Some("persisted"));
    assert_eq!(session.user().map(|u| u.id), Some(5));
    assert_eq!(transport.requests()[0].bearer.as_deref(), Some("persisted"));
}

#[tokio::test]
async fn bootstrap_with_rejected_token_clears_it_without_retry() {
    let transport = ScriptedTransport::new();
    transport.reply(401, json!({"error": "unauthorized"}));
    let (mut session, store) = store_with(&transport);
    store.set(TOKEN_KEY, "expired").unwrap();

    session.bootstrap().await;

    assert_eq!(session.state(), &SessionState::anonymous());
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(transport.requests().len(), 1);
}

// =============================================================
// Login / register
// =============================================================

#[tokio::test]
async fn login_stores_token_and_loads_profile() {
    let transport = ScriptedTransport::new();
    transport.reply_with_token(200, "tok", json!({})).reply(200, profile_json());
    let (mut session, store) = store_with(&transport);

    let user = session.login(" ann@shop.test ", "secret1").await.unwrap();

    assert_eq!(user.display_name(), "Ann Lee");
    assert!(session.state().is_authenticated());
    assert_eq!(session.state().token.as_deref(), Some("tok"));
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok"));
    assert_eq!(
        transport.calls(),
        vec![(Method::Post, "/users/sign_in".to_owned()), (Method::Get, "/api/v1/profile".to_owned())]
    );
    assert_eq!(
        transport.requests()[0].body,
        Some(json!({"user": {"email": "ann@shop.test", "password": "secret1"}}))
    );
}

#[tokio::test]
async fn invalid_login_leaves_session_empty_with_fallback_message() {
    let transport = ScriptedTransport::new();
    transport.reply(401, json!({"error": "Invalid Email or password."}));
    let (mut session, store) = store_with(&transport);
    store.set(TOKEN_KEY, "stale").unwrap();

    let err = session.login("ann@shop.test", "wrong").await.unwrap_err();

    assert_eq!(err.message, "Invalid email or password");
    assert_eq!(session.state().token, None);
    assert_eq!(session.state().user, None);
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn invalid_login_surfaces_server_message() {
    let transport = ScriptedTransport::new();
    transport.reply(401, json!({"message": "Account locked"}));
    let (mut session, _store) = store_with(&transport);

    let err = session.login("ann@shop.test", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Account locked");
    assert_eq!(err.status, Some(401));
}

#[tokio::test]
async fn profile_failure_after_sign_in_is_a_login_failure() {
    let transport = ScriptedTransport::new();
    transport.reply_with_token(200, "tok", json!({})).reply(500, json!({}));
    let (mut session, store) = store_with(&transport);

    let err = session.login("ann@shop.test", "secret1").await.unwrap_err();

    assert_eq!(err.message, "Invalid email or password");
    assert_eq!(session.state(), &SessionState::anonymous());
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn register_rejects_mismatched_confirmation_locally() {
    let transport = ScriptedTransport::new();
    let (mut session, _store) = store_with(&transport);
    let registration = Registration {
        email: "new@shop.test".to_owned(),
        password: "secret1".to_owned(),
        password_confirmation: "secret2".to_owned(),
        ..Registration::default()
    };

    let err = session.register(&registration).await.unwrap_err();

    assert_eq!(err.message, PASSWORD_MISMATCH_MESSAGE);
    assert!(transport.requests().is_empty());
    assert_eq!(session.state().phase, SessionPhase::Uninitialized);
}

#[tokio::test]
async fn register_surfaces_taken_email() {
    let transport = ScriptedTransport::new();
    transport.reply(422, json!({"errors": {"email": ["has already been taken"]}}));
    let (mut session, _store) = store_with(&transport);
    let registration = Registration {
        email: "ann@shop.test".to_owned(),
        password: "secret1".to_owned(),
        password_confirmation: "secret1".to_owned(),
        ..Registration::default()
    };

    let err = session.register(&registration).await.unwrap_err();

    assert_eq!(err.message, "This email is already registered");
    assert_eq!(session.state(), &SessionState::anonymous());
}

#[tokio::test]
async fn register_then_profile_authenticates() {
    let transport = ScriptedTransport::new();
    transport.reply_with_token(201, "new-tok", json!({})).reply(200, profile_json());
    let (mut session, _store) = store_with(&transport);
    let registration = Registration {
        email: "ann@shop.test".to_owned(),
        password: "secret1".to_owned(),
        password_confirmation: "secret1".to_owned(),
        first_name: "Ann".to_owned(),
        last_name: "Lee".to_owned(),
    };

    session.register(&registration).await.unwrap();

    assert!(session.state().is_authenticated());
    assert_eq!(transport.calls()[0], (Method::Post, "/users".to_owned()));
}

// =============================================================
// Logout / refresh / update
// =============================================================

#[tokio::test]
async fn logout_always_yields_empty_session() {
    let transport = ScriptedTransport::new();
    transport.reply_with_token(200, "tok", json!({})).reply(200, profile_json());
    let (mut session, store) = store_with(&transport);
    session.login("ann@shop.test", "secret1").await.unwrap();

    session.logout();

    assert_eq!(session.state().token, None);
    assert_eq!(session.state().user, None);
    assert_eq!(store.get(TOKEN_KEY), None);

    session.logout();
    assert_eq!(session.state(), &SessionState::anonymous());
}

#[tokio::test]
async fn sign_out_clears_locally_even_if_server_fails() {
    let transport = ScriptedTransport::new();
    transport.fail("offline");
    let (api, _t, store) = client();
    store.set(TOKEN_KEY, "tok").unwrap();
    let api = ApiClient::new(api.base_url(), transport.clone(), store.clone());
    let mut session = SessionStore::with_state(api, SessionState::default());

    session.sign_out().await;

    assert_eq!(transport.calls(), vec![(Method::Delete, "/users/sign_out".to_owned())]);
    assert_eq!(session.state(), &SessionState::anonymous());
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn sign_out_revokes_the_token_it_just_cleared() {
    let transport = ScriptedTransport::new();
    transport.reply(204, json!({}));
    let (api, _t, store) = client();
    store.set(TOKEN_KEY, "tok").unwrap();
    let api = ApiClient::new(api.base_url(), transport.clone(), store.clone());
    let mut session = SessionStore::with_state(api, SessionState::default());

    session.sign_out().await;

    assert_eq!(transport.requests()[0].bearer.as_deref(), Some("tok"));
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn end_session_clears_before_any_request() {
    let transport = ScriptedTransport::new();
    let (api, _t, store) = client();
    store.set(TOKEN_KEY, "tok").unwrap();
    let api = ApiClient::new(api.base_url(), transport.clone(), store.clone());
    let mut session = SessionStore::with_state(api.clone(), SessionState::default());

    let token = session.end_session();

    assert_eq!(token.as_deref(), Some("tok"));
    assert_eq!(session.state(), &SessionState::anonymous());
    assert_eq!(store.get(TOKEN_KEY), None);
    assert!(transport.requests().is_empty());

    transport.fail("offline");
    revoke_token(&api, "tok").await;
    assert_eq!(transport.requests()[0].bearer.as_deref(), Some("tok"));
}

#[tokio::test]
async fn sign_out_without_token_sends_nothing() {
    let transport = ScriptedTransport::new();
    let (api, _t, store) = client();
    let api = ApiClient::new(api.base_url(), transport.clone(), store);
    let mut session = SessionStore::with_state(api, SessionState::default());

    session.sign_out().await;

    assert!(transport.requests().is_empty());
    assert_eq!(session.state(), &SessionState::anonymous());
}

#[tokio::test]
async fn refresh_failure_drops_to_anonymous() {
    let transport = ScriptedTransport::new();
    transport.reply(401, json!({}));
    let (api, _t, store) = client();
    let api = ApiClient::new(api.base_url(), transport.clone(), store.clone());
    let user: User = serde_json::from_value(profile_json()).unwrap();
    let mut session =
        SessionStore::with_state(api, SessionState::authenticated(Some("tok".to_owned()), user));

    assert!(session.refresh_profile().await.is_err());
    assert_eq!(session.state(), &SessionState::anonymous());
}

#[tokio::test]
async fn update_profile_merges_response_then_sent_fields() {
    let transport = ScriptedTransport::new();
    transport.reply(
        200,
        json!({"user": {"id": 5, "email": "ann@shop.test", "first_name": "Server", "role": "admin"}}),
    );
    let (api, _t, store) = client();
    let api = ApiClient::new(api.base_url(), transport.clone(), store.clone());
    let user: User = serde_json::from_value(profile_json()).unwrap();
    let mut session = SessionStore::with_state(api, SessionState::authenticated(None, user));
    let patch = ProfilePatch { first_name: Some("Annie".to_owned()), ..ProfilePatch::default() };

    let updated = session.update_profile(&patch).await.unwrap();

    assert_eq!(updated.first_name.as_deref(), Some("Annie"));
    assert_eq!(updated.last_name.as_deref(), Some("Lee"));
    assert_eq!(updated.role, Role::Admin);
    assert!(session.is_admin());
}

#[tokio::test]
async fn update_profile_requires_session() {
    let transport = ScriptedTransport::new();
    let (mut session, _store) = store_with(&transport);

    let err = session.update_profile(&ProfilePatch::default()).await.unwrap_err();

    assert_eq!(err, ApiError::Validation(NOT_SIGNED_IN_MESSAGE.to_owned()));
    assert!(transport.requests().is_empty());
}

#[test]
fn admin_requires_authenticated_admin_role() {
    let mut admin: User = serde_json::from_value(profile_json()).unwrap();
    admin.role = Role::Admin;
    assert!(SessionState::authenticated(None, admin.clone()).is_admin());

    let loading = SessionState { user: Some(admin), ..SessionState::loading() };
    assert!(!loading.is_admin());
    assert!(!SessionState::anonymous().is_admin());
}
