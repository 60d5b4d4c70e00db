//! Basic-Auth verification
//!
//! Checks an `Authorization: Basic <base64>` header against expected
//! credentials. Comparison is plain string equality, not timing-safe;
//! suitable for low-stakes endpoints such as internal cron triggers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::request::InboundRequest;

/// Verify the request carries matching Basic-Auth credentials.
///
/// The `Authorization` header must start with the case-sensitive prefix
/// `"Basic "`; the remainder is trimmed, decoded from standard Base64 into
/// UTF-8 text and split on the first `:` into username and password. Any
/// malformed shape (missing header, different scheme, undecodable
/// payload, no colon) is `false`, never an error.
///
/// # Examples
/// ```
/// use request_guard::{check_basic_auth, InboundRequest};
/// # struct Req;
/// # impl InboundRequest for Req {
/// #     fn header(&self, name: &str) -> Option<String> {
/// #         (name == "Authorization").then(|| "Basic VVNFUk5BTUU6UEFTU1dPUkQ=".to_string())
/// #     }
/// #     fn method(&self) -> String { "GET".to_string() }
/// #     fn uri(&self) -> String { "/".to_string() }
/// #     fn query_string(&self) -> Option<String> { None }
/// #     fn scheme(&self) -> String { "http".to_string() }
/// #     fn server_name(&self) -> String { "localhost".to_string() }
/// #     fn remote_addr(&self) -> Option<String> { None }
/// #     fn user(&self) -> Option<String> { None }
/// # }
/// let request = Req;
/// assert!(check_basic_auth(&request, "USERNAME", "PASSWORD"));
/// assert!(!check_basic_auth(&request, "USERNAME", "wrong"));
/// ```
pub fn check_basic_auth<R: InboundRequest + ?Sized>(
    request: &R,
    username: &str,
    password: &str,
) -> bool {
    let Some(header) = request.header("Authorization") else {
        return false;
    };

    let Some(encoded) = header.strip_prefix("Basic ") else {
        return false;
    };

    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };

    let Ok(credentials) = String::from_utf8(decoded) else {
        return false;
    };

    let Some((user, pass)) = credentials.split_once(':') else {
        return false;
    };

    user == username && pass == password
}
