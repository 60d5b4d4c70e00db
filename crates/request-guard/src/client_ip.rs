//! Client address, scheme and domain resolution behind reverse proxies
//!
//! All three resolvers trust intermediary-supplied headers before falling
//! back to what the transport saw. The headers are client-controlled
//! unless a proxy in front strips them, so the resolved values are only as
//! trustworthy as the proxy topology. This is a known spoofing limitation,
//! not a bug.

use std::net::IpAddr;

use crate::request::InboundRequest;

/// Proxy headers consulted for the originating client address, in
/// decreasing order of trust.
pub const PROXY_IP_HEADERS: [&str; 5] = [
    "X-Forwarded-For",
    "Proxy-Client-IP",
    "WL-Proxy-Client-IP",
    "HTTP_CLIENT_IP",
    "HTTP_X_FORWARDED_FOR",
];

/// Resolve the originating client address.
///
/// Each header in [`PROXY_IP_HEADERS`] is tried in order; an empty value
/// or the literal `"unknown"` (case-insensitive) falls through to the next
/// candidate. The final fallback is the transport-level remote address.
pub fn client_ip<R: InboundRequest + ?Sized>(request: &R) -> Option<String> {
    for header in PROXY_IP_HEADERS {
        if let Some(value) = request.header(header) {
            if is_present(&value) {
                return Some(value);
            }
        }
    }

    request.remote_addr()
}

fn is_present(value: &str) -> bool {
    !value.is_empty() && !value.eq_ignore_ascii_case("unknown")
}

/// Effective request scheme, honoring `X-Forwarded-Proto`.
///
/// A reverse proxy terminating TLS reports the original scheme in
/// `X-Forwarded-Proto` while the transport sees plain `http`; the header
/// wins when it carries a non-blank value. The result is trimmed and
/// lowercased.
pub fn resolve_scheme<R: InboundRequest + ?Sized>(request: &R) -> Option<String> {
    let scheme = match request.header("X-Forwarded-Proto") {
        Some(value) if !value.trim().is_empty() => value,
        _ => request.scheme(),
    };

    let scheme = scheme.trim().to_ascii_lowercase();
    if scheme.is_empty() {
        None
    } else {
        Some(scheme)
    }
}

/// Registrable domain of the host the request was addressed to
pub fn resolve_domain<R: InboundRequest + ?Sized>(request: &R) -> Option<String> {
    domain_of(&request.server_name())
}

/// Derive the registrable domain from a host name.
///
/// IP literals and hosts with at most two labels pass through unchanged;
/// deeper host names reduce to their last two labels.
pub fn domain_of(host: &str) -> Option<String> {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }

    if host.parse::<IpAddr>().is_ok() {
        return Some(host);
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return Some(host);
    }

    Some(labels[labels.len() - 2..].join("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MockInboundRequest;

    #[test]
    fn forwarded_for_wins_when_present() {
        let mut request = MockInboundRequest::new();
        request.expect_header().returning(|name| match name {
            "X-Forwarded-For" => Some("203.0.113.7".to_string()),
            "Proxy-Client-IP" => Some("10.0.0.1".to_string()),
            _ => None,
        });

        assert_eq!(client_ip(&request), Some("203.0.113.7".to_string()));
    }

    #[test]
    fn unknown_and_empty_fall_through_to_next_header() {
        let mut request = MockInboundRequest::new();
        request.expect_header().returning(|name| match name {
            "X-Forwarded-For" => Some("UnKnOwN".to_string()),
            "Proxy-Client-IP" => Some("".to_string()),
            "WL-Proxy-Client-IP" => Some("10.0.0.2".to_string()),
            _ => None,
        });

        assert_eq!(client_ip(&request), Some("10.0.0.2".to_string()));
    }

    #[test]
    fn proxy_client_ip_used_when_forwarded_for_absent() {
        let mut request = MockInboundRequest::new();
        request.expect_header().returning(|name| match name {
            "Proxy-Client-IP" => Some("10.0.0.1".to_string()),
            _ => None,
        });

        assert_eq!(client_ip(&request), Some("10.0.0.1".to_string()));
    }

    #[test]
    fn remote_addr_is_the_final_fallback() {
        let mut request = MockInboundRequest::new();
        request.expect_header().returning(|_| None);
        request
            .expect_remote_addr()
            .returning(|| Some("192.0.2.1".to_string()));

        assert_eq!(client_ip(&request), Some("192.0.2.1".to_string()));
    }

    #[test]
    fn no_address_at_all_resolves_to_none() {
        let mut request = MockInboundRequest::new();
        request.expect_header().returning(|_| None);
        request.expect_remote_addr().returning(|| None);

        assert_eq!(client_ip(&request), None);
    }

    #[test]
    fn forwarded_proto_overrides_transport_scheme() {
        let mut request = MockInboundRequest::new();
        request.expect_header().returning(|name| match name {
            "X-Forwarded-Proto" => Some(" HTTPS ".to_string()),
            _ => None,
        });

        assert_eq!(resolve_scheme(&request), Some("https".to_string()));
    }

    #[test]
    fn blank_forwarded_proto_falls_back_to_transport() {
        let mut request = MockInboundRequest::new();
        request.expect_header().returning(|name| match name {
            "X-Forwarded-Proto" => Some("  ".to_string()),
            _ => None,
        });
        request.expect_scheme().returning(|| "http".to_string());

        assert_eq!(resolve_scheme(&request), Some("http".to_string()));
    }

    #[test]
    fn domain_of_strips_subdomains() {
        assert_eq!(domain_of("www.example.com"), Some("example.com".to_string()));
        assert_eq!(
            domain_of("a.b.example.co"),
            Some("example.co".to_string())
        );
        assert_eq!(domain_of("example.com"), Some("example.com".to_string()));
        assert_eq!(domain_of("localhost"), Some("localhost".to_string()));
    }

    #[test]
    fn domain_of_passes_ip_literals_through() {
        assert_eq!(domain_of("192.0.2.1"), Some("192.0.2.1".to_string()));
        assert_eq!(domain_of("2001:db8::1"), Some("2001:db8::1".to_string()));
    }

    #[test]
    fn domain_of_empty_host_is_none() {
        assert_eq!(domain_of(""), None);
        assert_eq!(domain_of("   "), None);
    }

    #[test]
    fn resolve_domain_reads_server_name() {
        let mut request = MockInboundRequest::new();
        request
            .expect_server_name()
            .returning(|| "api.Example.COM".to_string());

        assert_eq!(resolve_domain(&request), Some("example.com".to_string()));
    }
}
