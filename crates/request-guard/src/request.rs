//! Abstract inbound server request
//!
//! The guard helpers only need a narrow slice of what a server framework
//! exposes; [`InboundRequest`] captures that slice so the helpers stay
//! framework-agnostic and trivially mockable.

/// Capability set the guard helpers read from an inbound HTTP request.
///
/// Implement this once per server framework; the methods mirror what any
/// server request type already provides.
#[cfg_attr(test, mockall::automock)]
pub trait InboundRequest {
    /// Value of the named header, or `None` if absent
    fn header(&self, name: &str) -> Option<String>;

    /// HTTP method of the request
    fn method(&self) -> String;

    /// Request URI path
    fn uri(&self) -> String;

    /// Raw query string, if any
    fn query_string(&self) -> Option<String>;

    /// Scheme the transport saw (before any reverse-proxy rewriting)
    fn scheme(&self) -> String;

    /// Server host name the request was addressed to
    fn server_name(&self) -> String;

    /// Transport-level remote address, if known
    fn remote_addr(&self) -> Option<String>;

    /// Authenticated user principal, if any
    fn user(&self) -> Option<String>;
}

/// The request's `User-Agent` header, if present
pub fn user_agent<R: InboundRequest + ?Sized>(request: &R) -> Option<String> {
    request.header("User-Agent")
}
