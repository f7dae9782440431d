//! # Mock Transport for Testing
//!
//! Replays canned responses and records every request it receives, so tests
//! can assert on exactly what would have gone over the wire.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::TransportError;

use super::{HttpRequest, HttpResponse, Transport};

/// Type alias for the shared request history
type RequestHistory = Arc<Mutex<Vec<HttpRequest>>>;

type CannedResult = Result<HttpResponse, TransportError>;

/// Transport that never touches the network
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<CannedResult>>,
    requests: RequestHistory,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body
    pub fn push_response(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push_result(Ok(HttpResponse::new(status, Vec::new(), body)))
    }

    /// Queue a fully specified response
    pub fn push_http_response(&self, response: HttpResponse) -> &Self {
        self.push_result(Ok(response))
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) -> &Self {
        self.push_result(Err(error))
    }

    fn push_result(&self, result: CannedResult) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
        self
    }

    /// Every request sent so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Shared handle to the request history, usable after the mock has been
    /// moved into an executor
    pub fn request_log(&self) -> Arc<Mutex<Vec<HttpRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no canned response left in mock")))
    }
}
