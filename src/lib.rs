//! HTTP toolkit
//!
//! Aggregate crate re-exporting the outbound client core and the inbound
//! request-guard helpers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use http_client;
pub use request_guard;
