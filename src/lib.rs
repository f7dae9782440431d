//! # Sheetline - Request Executor for Spreadsheet Web Service APIs
//!
//! Sends one OAuth-signed HTTP request per call and returns the raw response
//! body. Parsing the body (Atom XML, JSON) is left to the caller.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────┐  &mut   ┌──────────────────┐  HttpRequest  ┌─────────────┐
//! │ RequestDescriptor │────────▶│ RequestExecutor  │──────────────▶│  Transport  │
//! │                   │         │                  │               │             │
//! │ - method, url     │◀────────│ - headers        │◀──────────────│ - reqwest   │
//! │ - headers, post   │  reset  │ - OAuth token    │  HttpResponse │ - mock      │
//! │ - access token    │         │ - status check   │               │             │
//! └───────────────────┘         └──────────────────┘               └─────────────┘
//! ```
//!
//! ```no_run
//! use sheetline::{ExecutorConfig, Method, RequestDescriptor, RequestExecutor,
//!                 ReqwestTransport, ServiceRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::new(&ExecutorConfig::default())?;
//! let executor = RequestExecutor::new(transport);
//!
//! let mut request = RequestDescriptor::new(r#"{"access_token":"ya29.token"}"#);
//! request
//!     .set_method(Method::Get)
//!     .set_endpoint("feeds/spreadsheets/private/full");
//!
//! let feed = executor.execute(&mut request)?;
//! println!("{feed}");
//! # Ok(())
//! # }
//! ```

pub mod cmd_args;
pub mod config;
pub mod error;
pub mod executor;
pub mod request;
pub mod token;
pub mod transport;

// Re-export main types for easy access
pub use config::{ExecutorConfig, IniProfileStore};
pub use error::{
    ConfigError, Error, FailureDetail, MalformedTokenError, RequestError, Result, TransportError,
};
pub use executor::{RequestExecutor, ServiceRequest};
pub use request::{Method, RequestDescriptor, RequestSnapshot};
pub use token::AccessToken;
pub use transport::{HttpRequest, HttpResponse, MockTransport, ReqwestTransport, Transport};
