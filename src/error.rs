//! # Error Types
//!
//! Everything a request execution or a profile lookup can fail with.

use std::error::Error as _;
use std::fmt;

use crate::request::RequestSnapshot;

/// Result type returned by [`crate::ServiceRequest::execute`]
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by request execution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The access token could not be turned into an `Authorization` header
    #[error(transparent)]
    MalformedToken(#[from] MalformedTokenError),

    /// The request was sent but failed, or the server rejected it
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl Error {
    /// The request snapshot, when the failure happened after the request was built
    pub fn snapshot(&self) -> Option<&RequestSnapshot> {
        match self {
            Self::MalformedToken(_) => None,
            Self::Request(e) => Some(e.snapshot()),
        }
    }
}

/// The descriptor's access token is not a JSON object with an `access_token` string.
///
/// Not retryable: the caller has to re-authenticate.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("malformed access token: {reason}")]
pub struct MalformedTokenError {
    reason: String,
}

impl MalformedTokenError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Failure of the underlying HTTP call (connect, TLS, timeout, body read)
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    timed_out: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Walk the source chain; reqwest's top-level message hides the cause.
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {cause}"));
            source = cause.source();
        }

        if err.is_timeout() {
            Self::timeout(message)
        } else {
            Self::new(message)
        }
    }
}

/// What went wrong with a request that was actually dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureDetail {
    /// No usable response came back
    Transport(TransportError),
    /// The server answered with a status of 300 or above
    Status {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport failure: {e}"),
            Self::Status {
                status, headers, ..
            } => {
                write!(f, "server responded with status {status}")?;
                for (name, value) in headers {
                    write!(f, "\n  {name}: {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// A dispatched request failed.
///
/// Carries a copy of the request as it was before the descriptor got reset,
/// so callers can log or retry it.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Error in request {snapshot}: {detail}")]
pub struct RequestError {
    snapshot: RequestSnapshot,
    detail: FailureDetail,
}

impl RequestError {
    pub fn new(snapshot: RequestSnapshot, detail: FailureDetail) -> Self {
        Self { snapshot, detail }
    }

    pub fn snapshot(&self) -> &RequestSnapshot {
        &self.snapshot
    }

    pub fn detail(&self) -> &FailureDetail {
        &self.detail
    }

    /// HTTP status of the rejected response, `None` for transport failures
    pub fn status(&self) -> Option<u16> {
        match &self.detail {
            FailureDetail::Status { status, .. } => Some(*status),
            FailureDetail::Transport(_) => None,
        }
    }

    /// Response body of the rejected response, if there was one
    pub fn body(&self) -> Option<&str> {
        match &self.detail {
            FailureDetail::Status { body, .. } => Some(body),
            FailureDetail::Transport(_) => None,
        }
    }
}

/// Failure while loading an executor profile
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read profile file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for '{key}' in profile '{profile}': {value}")]
    InvalidValue {
        profile: String,
        key: String,
        value: String,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
