//! Inbound request introspection helpers
//!
//! Server-side companions to the outbound client: resolve the originating
//! client address behind reverse proxies, test it against an IP/CIDR
//! allow-list, verify Basic-Auth credentials, and derive the effective
//! scheme and domain of a proxied request. The helpers read from any server
//! request through the [`InboundRequest`] capability trait; no server is
//! implemented here.
//!
//! "Not matched" conditions (unknown IP, wrong credentials) are plain
//! `false` results. Only structurally invalid configuration, such as a
//! malformed CIDR entry, surfaces as a [`GuardError`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allowlist;
pub mod basic_auth;
pub mod client_ip;
pub mod logging;
pub mod request;

pub use allowlist::{is_ip_allowed, Subnet};
pub use basic_auth::check_basic_auth;
pub use client_ip::{client_ip, resolve_domain, resolve_scheme};
pub use logging::request_span;
pub use request::{user_agent, InboundRequest};

/// Result type for guard operations
pub type Result<T> = std::result::Result<T, GuardError>;

/// Errors for structurally invalid guard configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    /// An allow-list entry could not be parsed as an address or CIDR range
    #[error("invalid allow-list entry '{entry}': {reason}")]
    InvalidEntry {
        /// The offending entry as configured
        entry: String,
        /// Why the entry failed to parse
        reason: String,
    },

    /// The candidate IP address could not be parsed
    #[error("invalid IP address '{0}'")]
    InvalidIp(String),
}

impl GuardError {
    pub(crate) fn invalid_entry(entry: &str, reason: &str) -> Self {
        Self::InvalidEntry {
            entry: entry.to_string(),
            reason: reason.to_string(),
        }
    }
}
