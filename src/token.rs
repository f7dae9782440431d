//! # Access Token
//!
//! The descriptor stores the OAuth token the way the token endpoint returned
//! it: a JSON object. Only `access_token` is needed to sign a request.

use serde::Deserialize;

use crate::error::MalformedTokenError;

/// Scheme used in the `Authorization` header
pub const AUTHORIZATION_SCHEME: &str = "OAuth";

/// Header name the token is sent under
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Token payload as issued by the OAuth server
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    created: Option<u64>,
}

impl AccessToken {
    /// Parse a JSON-encoded token
    pub fn parse(raw: &str) -> Result<Self, MalformedTokenError> {
        let token: AccessToken = serde_json::from_str(raw)
            .map_err(|e| MalformedTokenError::new(format!("not a valid token object: {e}")))?;

        if token.access_token.trim().is_empty() {
            return Err(MalformedTokenError::new("access_token is empty"));
        }

        Ok(token)
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Unix timestamp after which the token is no longer valid, when the
    /// issuer reported both `created` and `expires_in`
    pub fn expires_at(&self) -> Option<u64> {
        Some(self.created? + self.expires_in?)
    }

    /// Value for the `Authorization` header
    pub fn authorization_value(&self) -> String {
        format!("{AUTHORIZATION_SCHEME} {}", self.access_token)
    }
}
