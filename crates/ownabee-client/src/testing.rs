//! Transport doubles for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ownabee_core::error::{PortalError, Result};
use ownabee_core::http::{HttpRequest, HttpResponse, Transport};

enum Reply {
    Response(HttpResponse),
    NetworkError(String),
}

/// Replays queued responses in order and records every request.
///
/// Running out of replies is reported as an internal error so a test
/// that issues an unexpected call fails loudly.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: HttpResponse) {
        lock(&self.replies).push_back(Reply::Response(response));
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_response(HttpResponse::json_body(status, &body));
    }

    pub fn push_status(&self, status: u16) {
        self.push_response(HttpResponse::new(status, Vec::new()));
    }

    pub fn push_network_error(&self, message: impl Into<String>) {
        lock(&self.replies).push_back(Reply::NetworkError(message.into()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests whose URL path ends with `suffix` (query ignored).
    pub fn requests_to(&self, suffix: &str) -> Vec<HttpRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.url.split('?').next().unwrap_or_default().ends_with(suffix))
            .cloned()
            .collect()
    }

    pub fn remaining_replies(&self) -> usize {
        lock(&self.replies).len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let description = format!("{} {}", request.method, request.url);
        lock(&self.requests).push(request);
        match lock(&self.replies).pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::NetworkError(message)) => Err(PortalError::network(message)),
            None => Err(PortalError::internal(format!(
                "No scripted response for {}",
                description
            ))),
        }
    }
}

type Responder = dyn Fn(&HttpRequest) -> HttpResponse + Send + Sync;

/// Answers each request with a closure, yielding to the scheduler first so
/// concurrent callers interleave the way real network calls do.
pub struct FnTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FnTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn requests_to(&self, suffix: &str) -> Vec<HttpRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.url.split('?').next().unwrap_or_default().ends_with(suffix))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for FnTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        tokio::task::yield_now().await;
        let response = (self.responder)(&request);
        lock(&self.requests).push(request);
        Ok(response)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
