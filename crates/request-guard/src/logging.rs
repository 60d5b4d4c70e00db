//! Request-scoped tracing context
//!
//! Builds a tracing span carrying the same request fields the rest of the
//! crate resolves: client address, effective scheme, domain and so on.
//! Enter the span before handling a request so every log line emitted
//! while serving it carries the request context.

use tracing::Span;
use uuid::Uuid;

use crate::client_ip::{client_ip, resolve_domain, resolve_scheme};
use crate::request::{user_agent, InboundRequest};

/// Build a span describing an inbound request.
///
/// A fresh random request id is generated per call. Fields that cannot be
/// resolved are recorded as empty strings so the span shape stays uniform.
pub fn request_span<R: InboundRequest + ?Sized>(request: &R) -> Span {
    let request_id = Uuid::new_v4();
    let method = request.method();
    let path = request.uri();
    let host = request.server_name();
    let ip = client_ip(request).unwrap_or_default();
    let scheme = resolve_scheme(request).unwrap_or_default();
    let domain = resolve_domain(request).unwrap_or_default();
    let agent = user_agent(request).unwrap_or_default();
    let query = request.query_string().unwrap_or_default();
    let user = request.user().unwrap_or_default();

    tracing::info_span!(
        "inbound_request",
        %request_id,
        %method,
        %path,
        %host,
        %ip,
        %scheme,
        %domain,
        user_agent = %agent,
        %query,
        %user,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MockInboundRequest;

    fn full_request() -> MockInboundRequest {
        let mut request = MockInboundRequest::new();
        request.expect_header().returning(|name| match name {
            "X-Forwarded-For" => Some("203.0.113.7".to_string()),
            "X-Forwarded-Proto" => Some("https".to_string()),
            "User-Agent" => Some("Agent".to_string()),
            _ => None,
        });
        request.expect_method().returning(|| "GET".to_string());
        request.expect_uri().returning(|| "/api/items".to_string());
        request
            .expect_server_name()
            .returning(|| "api.example.com".to_string());
        request
            .expect_query_string()
            .returning(|| Some("page=2".to_string()));
        request.expect_user().returning(|| None);
        request
    }

    #[test]
    fn span_is_built_from_request_fields() {
        // no subscriber installed; building the span must still resolve
        // every field without panicking
        let _span = request_span(&full_request());
    }

    #[test]
    fn span_handles_missing_fields() {
        let mut request = MockInboundRequest::new();
        request.expect_header().returning(|_| None);
        request.expect_method().returning(|| "POST".to_string());
        request.expect_uri().returning(|| "/".to_string());
        request.expect_server_name().returning(String::new);
        request.expect_scheme().returning(String::new);
        request.expect_remote_addr().returning(|| None);
        request.expect_query_string().returning(|| None);
        request.expect_user().returning(|| None);

        // must not panic with nothing resolvable
        let _span = request_span(&request);
    }
}
