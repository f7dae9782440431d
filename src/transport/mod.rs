//! # Transport Abstraction
//!
//! The one place the executor touches the network. Everything the executor
//! needs back from an HTTP call (status, headers, body) is returned as a
//! value, so failure diagnostics never depend on ambient state.
//!
//! ```text
//! Production:  RequestExecutor ──▶ ReqwestTransport ──▶ reqwest::blocking::Client
//!
//! Testing:     RequestExecutor ──▶ MockTransport    ──▶ VecDeque<canned response>
//!                                                  └─▶ Vec<HttpRequest> (recorded)
//! ```

use crate::error::TransportError;
use crate::request::Method;

pub mod blocking;
pub mod mock;

pub use blocking::ReqwestTransport;
pub use mock::MockTransport;

/// Synchronous HTTP call
///
/// Implementations return non-2xx responses as `Ok`; only failures that
/// leave no response to inspect are `Err`. The response body must be the
/// exact bytes received; a body that is not UTF-8 is an `Err`, not a lossy
/// decode.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Fully assembled outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl HttpRequest {
    pub fn new(
        method: Method,
        url: String,
        headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value with the given name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Headers rendered as `Name: Value` lines, in send order
    pub fn header_lines(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Response metadata and body as returned by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl HttpResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// 2xx. Anything at or above 300 counts as a rejection.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_parts(self) -> (u16, Vec<(String, String)>, String) {
        (self.status, self.headers, self.body)
    }
}
