//! Blocking reqwest transport

use crate::config::ExecutorConfig;
use crate::error::{ConfigError, TransportError};

use super::{HttpRequest, HttpResponse, Transport};

/// Sends requests with a `reqwest::blocking::Client`.
///
/// Must not be used from inside an async runtime; the blocking client
/// spins up its own.
///
/// The body is handed back byte for byte. A body that is not valid UTF-8 is
/// a [`TransportError`], never decoded lossily.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ExecutorConfig) -> Result<Self, ConfigError> {
        tracing::debug!(
            "Building HTTP client: timeout={:?}, connect_timeout={:?}",
            config.timeout(),
            config.connect_timeout()
        );

        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method().into(), request.url());

        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body() {
            builder = builder.body(body.to_owned());
        }

        let response = builder.send()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let bytes = response.bytes()?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|e| {
            TransportError::new(format!("response body is not valid UTF-8: {e}"))
        })?;

        Ok(HttpResponse::new(status, headers, body))
    }
}
