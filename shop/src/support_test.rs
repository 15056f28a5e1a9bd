//! Test doubles shared by the store tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::api::ApiClient;
use crate::notify::{NoticeKind, Notifier};
use crate::storage::MemoryStore;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

pub const BASE: &str = "http://api.test";

/// Replays queued responses in order and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, String>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.push(Ok(HttpResponse { status, authorization: None, body: body.to_string() }))
    }

    pub fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse { status, authorization: None, body: body.to_owned() }))
    }

    pub fn reply_with_token(&self, status: u16, token: &str, body: Value) -> &Self {
        self.push(Ok(HttpResponse {
            status,
            authorization: Some(format!("Bearer {token}")),
            body: body.to_string(),
        }))
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.push(Err(message.to_owned()))
    }

    fn push(&self, response: Result<HttpResponse, String>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<(Method, String)> {
        self.requests()
            .into_iter()
            .map(|r| (r.method, r.url.trim_start_matches(BASE).to_owned()))
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_owned()))
    }
}

pub fn client() -> (ApiClient<ScriptedTransport, MemoryStore>, ScriptedTransport, MemoryStore) {
    let transport = ScriptedTransport::new();
    let store = MemoryStore::new();
    (ApiClient::new(BASE, transport.clone(), store.clone()), transport, store)
}

/// Records notices; answers every confirm with a fixed value.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(String, NoticeKind)>>,
    pub prompts: Mutex<Vec<String>>,
    pub answer: bool,
}

impl RecordingNotifier {
    pub fn confirming() -> Self {
        Self { answer: true, ..Self::default() }
    }

    pub fn declining() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(String, NoticeKind)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        self.notices.lock().unwrap().push((message.to_owned(), kind));
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.answer
    }
}
