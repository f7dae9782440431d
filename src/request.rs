//! # Request Descriptor
//!
//! Caller-owned description of one pending call: method, target, headers,
//! body and access token. The executor reads it, sends it, then resets the
//! per-call fields so the same descriptor can be configured again.

use std::fmt;
use std::str::FromStr;

/// Base every endpoint is resolved against unless configured otherwise
pub const DEFAULT_BASE_URL: &str = "https://spreadsheets.google.com/";

/// HTTP verbs the service accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Only POST and PUT carry the descriptor's body
    pub fn sends_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("unsupported HTTP method: {other}")),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One pending call against the spreadsheet service.
///
/// `base_url` and `access_token` survive [`RequestDescriptor::reset`]; every
/// other field is per-call state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    base_url: String,
    url: Option<String>,
    endpoint: String,
    headers: Vec<(String, String)>,
    post: String,
    access_token: String,
}

impl Default for RequestDescriptor {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl RequestDescriptor {
    /// Create a descriptor holding the given JSON-encoded access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            base_url: DEFAULT_BASE_URL.to_string(),
            url: None,
            endpoint: String::new(),
            headers: Vec::new(),
            post: String::new(),
            access_token: access_token.into(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    /// Explicit full URL, if one was set
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_full_url(&mut self, url: Option<String>) -> &mut Self {
        self.url = url;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> &mut Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Replace all headers at once
    pub fn set_headers(&mut self, headers: Vec<(String, String)>) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Set a single header. An existing header with the same name
    /// (case-insensitive) keeps its position and gets the new value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    pub fn post(&self) -> &str {
        &self.post
    }

    pub fn set_post(&mut self, post: impl Into<String>) -> &mut Self {
        self.post = post.into();
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn set_access_token(&mut self, access_token: impl Into<String>) -> &mut Self {
        self.access_token = access_token.into();
        self
    }

    /// The URL the request goes to: the explicit URL when set, otherwise the
    /// endpoint joined onto the base URL.
    pub fn resolved_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let base = self.base_url.trim_end_matches('/');
        let endpoint = self.endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{endpoint}")
        }
    }

    /// Copy of what identifies this request, for error reports
    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot::new(self.method, self.resolved_url(), self.headers.clone())
    }

    /// Clear the per-call fields so a reused descriptor never replays
    /// stale parameters.
    pub fn reset(&mut self) {
        self.method = Method::Get;
        self.post.clear();
        self.url = None;
        self.endpoint.clear();
        self.headers.clear();
    }

    /// True when no per-call field is set
    pub fn is_reset(&self) -> bool {
        self.method == Method::Get
            && self.post.is_empty()
            && self.url.is_none()
            && self.endpoint.is_empty()
            && self.headers.is_empty()
    }
}

/// Pre-reset copy of a request, attached to [`crate::RequestError`].
///
/// Holds only caller headers; the `Authorization` header is never copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSnapshot {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
}

impl RequestSnapshot {
    pub fn new(method: Method, url: String, headers: Vec<(String, String)>) -> Self {
        Self {
            method,
            url,
            headers,
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
}

impl fmt::Display for RequestSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_descriptor_should_default_to_get() {
        let descriptor = RequestDescriptor::new("{}");
        assert_eq!(descriptor.method(), Method::Get);
        assert!(descriptor.is_reset());
        assert_eq!(descriptor.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn method_should_parse_case_insensitively() {
        assert_eq!("post".parse::<Method>(), Ok(Method::Post));
        assert_eq!(" Put ".parse::<Method>(), Ok(Method::Put));
        assert_eq!("DELETE".parse::<Method>(), Ok(Method::Delete));
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn only_post_and_put_should_send_body() {
        assert!(!Method::Get.sends_body());
        assert!(!Method::Delete.sends_body());
        assert!(Method::Post.sends_body());
        assert!(Method::Put.sends_body());
    }

    #[test]
    fn explicit_url_should_take_precedence_over_endpoint() {
        let mut descriptor = RequestDescriptor::new("{}");
        descriptor
            .set_endpoint("feeds/spreadsheets/private/full")
            .set_full_url(Some("https://example.com/custom".to_string()));

        assert_eq!(descriptor.resolved_url(), "https://example.com/custom");
    }

    #[test]
    fn endpoint_should_join_base_url_with_single_slash() {
        let mut descriptor = RequestDescriptor::new("{}");
        descriptor.set_endpoint("/feeds/worksheets/key/private/full");
        assert_eq!(
            descriptor.resolved_url(),
            "https://spreadsheets.google.com/feeds/worksheets/key/private/full"
        );

        descriptor.set_base_url("http://localhost:8080");
        descriptor.set_endpoint("feeds/list");
        assert_eq!(descriptor.resolved_url(), "http://localhost:8080/feeds/list");
    }

    #[test]
    fn set_header_should_replace_in_place_and_keep_order() {
        let mut descriptor = RequestDescriptor::new("{}");
        descriptor
            .set_header("Content-Type", "application/atom+xml")
            .set_header("GData-Version", "3.0")
            .set_header("content-type", "text/xml");

        assert_eq!(
            descriptor.headers(),
            &[
                ("Content-Type".to_string(), "text/xml".to_string()),
                ("GData-Version".to_string(), "3.0".to_string()),
            ]
        );
    }

    #[test]
    fn reset_should_clear_per_call_fields_only() {
        let mut descriptor = RequestDescriptor::new(r#"{"access_token":"abc"}"#);
        descriptor
            .set_method(Method::Put)
            .set_base_url("http://localhost:1234/")
            .set_full_url(Some("http://localhost:1234/x".to_string()))
            .set_endpoint("feeds/x")
            .set_header("If-Match", "*")
            .set_post("<entry/>");

        descriptor.reset();

        assert!(descriptor.is_reset());
        assert_eq!(descriptor.method(), Method::Get);
        assert_eq!(descriptor.post(), "");
        assert_eq!(descriptor.url(), None);
        assert_eq!(descriptor.endpoint(), "");
        assert!(descriptor.headers().is_empty());
        assert_eq!(descriptor.access_token(), r#"{"access_token":"abc"}"#);
        assert_eq!(descriptor.base_url(), "http://localhost:1234/");
    }

    #[test]
    fn snapshot_should_capture_resolved_url_and_headers() {
        let mut descriptor = RequestDescriptor::new("{}");
        descriptor
            .set_method(Method::Delete)
            .set_endpoint("feeds/cells/key/od6/private/full/R1C1")
            .set_header("If-Match", "*");

        let snapshot = descriptor.snapshot();
        descriptor.reset();

        assert_eq!(snapshot.method(), Method::Delete);
        assert_eq!(
            snapshot.url(),
            "https://spreadsheets.google.com/feeds/cells/key/od6/private/full/R1C1"
        );
        assert_eq!(snapshot.headers().len(), 1);
        assert_eq!(
            snapshot.to_string(),
            "DELETE https://spreadsheets.google.com/feeds/cells/key/od6/private/full/R1C1"
        );
    }
}
