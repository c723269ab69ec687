//! Scripted transport for tests
//!
//! Responses are served in the order they were queued and every request is
//! recorded, so a test can assert both what the device "said" and exactly
//! which envelopes were sent.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{HttpRequest, HttpResponse, HttpTransport, SoapError};

#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<HttpResponse, SoapError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(Ok(HttpResponse {
            status,
            body: body.into(),
        }))
    }

    /// Queue a transport-level failure
    pub fn fail(&self, error: SoapError) -> &Self {
        self.push(Err(error))
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// The `SOAPACTION` header of every request received so far
    pub fn actions(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.header("SOAPACTION").map(str::to_string))
            .collect()
    }

    /// Number of scripted responses not yet consumed
    pub fn pending(&self) -> usize {
        self.script.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn push(&self, entry: Result<HttpResponse, SoapError>) -> &Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(entry);
        }
        self
    }
}

impl HttpTransport for MockTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, SoapError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| Err(SoapError::Network("connection refused (mock script exhausted)".to_string())))
    }
}
