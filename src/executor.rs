//! # Request Executor
//!
//! Turns a [`RequestDescriptor`] into one HTTP call and hands back the raw
//! response body.
//!
//! Each call runs the same fixed sequence:
//!
//! 1. caller headers, in the order they were set
//! 2. `Authorization: OAuth <token>` appended last
//! 3. body attached for POST/PUT only
//! 4. one blocking send through the [`Transport`]
//! 5. descriptor reset, whatever the outcome

use crate::error::{Error, FailureDetail, RequestError, Result};
use crate::request::RequestDescriptor;
use crate::token::{AccessToken, AUTHORIZATION_HEADER};
use crate::transport::{HttpRequest, Transport};

/// Capability of executing a configured request against the service.
///
/// Lets callers swap the real executor for a test double.
pub trait ServiceRequest {
    /// Send the request described by `descriptor` and return the response
    /// body unparsed. The descriptor is reset before this returns.
    fn execute(&self, descriptor: &mut RequestDescriptor) -> Result<String>;
}

/// Default [`ServiceRequest`] implementation on top of a [`Transport`]
#[derive(Debug, Clone)]
pub struct RequestExecutor<T> {
    transport: T,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<String> {
        let token = AccessToken::parse(descriptor.access_token())?;

        let mut headers = descriptor.headers().to_vec();
        headers.push((
            AUTHORIZATION_HEADER.to_string(),
            token.authorization_value(),
        ));

        let method = descriptor.method();
        let body = method.sends_body().then(|| descriptor.post().to_string());
        let request = HttpRequest::new(method, descriptor.resolved_url(), headers, body);

        tracing::debug!(
            "Sending {} {} with {} header(s)",
            request.method(),
            request.url(),
            request.headers().len()
        );

        let response = self.transport.send(&request).map_err(|e| {
            tracing::warn!("{} {} failed: {}", request.method(), request.url(), e);
            RequestError::new(descriptor.snapshot(), FailureDetail::Transport(e))
        })?;

        if !response.is_success() {
            tracing::warn!(
                "{} {} rejected with status {}",
                request.method(),
                request.url(),
                response.status()
            );
            let (status, headers, body) = response.into_parts();
            return Err(Error::Request(RequestError::new(
                descriptor.snapshot(),
                FailureDetail::Status {
                    status,
                    headers,
                    body,
                },
            )));
        }

        tracing::debug!(
            "{} {} returned {} ({} bytes)",
            request.method(),
            request.url(),
            response.status(),
            response.body().len()
        );

        let (_, _, body) = response.into_parts();
        Ok(body)
    }
}

impl<T: Transport> ServiceRequest for RequestExecutor<T> {
    #[tracing::instrument(level = "trace", skip_all)]
    fn execute(&self, descriptor: &mut RequestDescriptor) -> Result<String> {
        let result = self.dispatch(descriptor);
        descriptor.reset();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use crate::transport::MockTransport;

    const TOKEN: &str = r#"{"access_token":"abc123"}"#;

    fn executor() -> RequestExecutor<MockTransport> {
        RequestExecutor::new(MockTransport::new())
    }

    #[test]
    fn execute_should_return_body_unchanged() {
        let executor = executor();
        executor.transport().push_response(200, "<feed>ok</feed>");
        let mut descriptor = RequestDescriptor::new(TOKEN);
        descriptor.set_endpoint("feeds/spreadsheets/private/full");

        let body = executor.execute(&mut descriptor).unwrap();

        assert_eq!(body, "<feed>ok</feed>");
    }

    #[test]
    fn execute_should_append_oauth_header_last() {
        let executor = executor();
        executor.transport().push_response(200, "");
        let mut descriptor = RequestDescriptor::new(TOKEN);
        descriptor
            .set_header("GData-Version", "3.0")
            .set_header("Content-Type", "application/atom+xml");

        executor.execute(&mut descriptor).unwrap();

        let sent = executor.transport().last_request().unwrap();
        assert_eq!(
            sent.header_lines(),
            vec![
                "GData-Version: 3.0",
                "Content-Type: application/atom+xml",
                "Authorization: OAuth abc123",
            ]
        );
    }

    #[test]
    fn malformed_token_should_fail_before_sending() {
        let executor = executor();
        let mut descriptor = RequestDescriptor::new("not-json");
        descriptor.set_method(Method::Post).set_post("<entry/>");

        let err = executor.execute(&mut descriptor).unwrap_err();

        assert!(matches!(err, Error::MalformedToken(_)));
        assert!(executor.transport().requests().is_empty());
        assert!(descriptor.is_reset());
    }

    #[test]
    fn redirect_status_should_count_as_rejection() {
        let executor = executor();
        executor.transport().push_response(302, "");
        let mut descriptor = RequestDescriptor::new(TOKEN);

        let err = executor.execute(&mut descriptor).unwrap_err();

        match err {
            Error::Request(e) => assert_eq!(e.status(), Some(302)),
            other => panic!("Expected request error, got {other:?}"),
        }
    }
}
