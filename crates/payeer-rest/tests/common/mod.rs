//! Shared test fixtures: an in-process transport double

use async_trait::async_trait;
use parking_lot::Mutex;
use payeer_rest::{HttpRequest, HttpTransport, TransportError};
use std::collections::VecDeque;
use std::sync::Arc;

/// Transport double that records every request and replays canned responses
///
/// Responses are consumed in FIFO order; once the queue is empty, further
/// requests get an empty body.
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        })
    }

    /// Queue a response body
    pub fn respond(&self, body: &str) {
        self.responses.lock().push_back(Ok(body.to_string()));
    }

    /// Queue a transport-level failure
    pub fn fail_with_timeout(&self) {
        self.responses.lock().push_back(Err(TransportError::Timeout));
    }

    /// All requests seen so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<String, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}
