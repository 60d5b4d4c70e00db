//! Minimal outbound HTTP client core
//!
//! This crate issues GET/POST/PUT/PATCH/DELETE requests and normalizes every
//! completed round trip (2xx and error statuses alike) into a single
//! [`Response`] shape. Only transport-level failures surface as errors;
//! a 4xx/5xx with a diagnostic body is a normal result the caller inspects
//! via [`Response::is`] / [`Response::not`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod request;
pub mod response;
pub mod task;

pub use client::{HttpClient, HttpClientConfig, TlsTrust};
pub use request::{Method, Request};
pub use response::Response;
pub use task::{spawn, Outcome, RequestHandle};

/// Result type for request execution
pub type Result<T> = std::result::Result<T, RequestError>;

/// Status code reported when a request fails before any HTTP status
/// was obtained from the remote end.
pub const DEFAULT_ERROR_CODE: u16 = 500;

/// The single error type surfaced by the executor.
///
/// `code` carries the last HTTP status captured before the failure, or
/// [`DEFAULT_ERROR_CODE`] if the transport never produced one. Non-2xx
/// responses are NOT represented here; they come back as [`Response`] values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request failed ({code}): {message}")]
pub struct RequestError {
    /// Last known HTTP status, or the 500 sentinel
    pub code: u16,
    /// Description of the underlying failure
    pub message: String,
}

impl RequestError {
    /// Create a new request error
    pub fn new(code: u16, message: impl ToString) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}
