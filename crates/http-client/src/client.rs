//! Request executor
//!
//! [`HttpClient`] performs a single round trip per call: merge query
//! parameters into the URL, apply method/headers/timeouts, write the
//! optional body, and read the result back into a [`Response`] regardless
//! of status class. Redirects are not followed; 3xx statuses come back as
//! normal responses for the caller to act on.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::Url;

use crate::request::Request;
use crate::response::Response;
use crate::{RequestError, Result, DEFAULT_ERROR_CODE};

/// Default connect timeout applied when the config does not override it
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Default read timeout applied when the config does not override it
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(5000);

/// TLS certificate-validation policy for `https` requests.
///
/// This replaces a process-wide mutable trust override with an explicit
/// value injected at client construction, so concurrent requests always
/// observe the policy their client was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsTrust {
    /// Validate server certificates against the system trust roots
    #[default]
    Validate,
    /// Accept any server certificate. Not for production use; intended
    /// for tests against self-signed endpoints.
    TrustAny,
}

/// Configuration for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Connect timeout, default 3000 ms
    pub connect_timeout: Duration,
    /// Read timeout, default 5000 ms
    pub read_timeout: Duration,
    /// TLS trust policy
    pub trust: TlsTrust,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            trust: TlsTrust::default(),
        }
    }
}

impl HttpClientConfig {
    /// Create a config with default timeouts and validating TLS trust
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the TLS trust policy
    pub fn with_trust(mut self, trust: TlsTrust) -> Self {
        self.trust = trust;
        self
    }
}

/// HTTP client executing one blocking round trip per call.
///
/// The client holds no mutable state; it is cheap to clone and safe to
/// share across tasks.
///
/// # Examples
/// ```no_run
/// use http_client::{HttpClient, Request};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = HttpClient::with_defaults()?;
///     let response = client.get("https://example.com/status").await?;
///
///     if response.is(&[200]) {
///         println!("body: {}", response.body());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Underlying transport
    client: reqwest::Client,
    /// Configuration the client was built with
    config: HttpClientConfig,
}

impl HttpClient {
    /// Build a client from the given configuration.
    ///
    /// Redirects are disabled; 3xx responses are surfaced to the caller
    /// rather than followed.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .redirect(Policy::none());

        if config.trust == TlsTrust::TrustAny {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| RequestError::new(DEFAULT_ERROR_CODE, e))?;

        Ok(Self { client, config })
    }

    /// Build a client with default timeouts and validating TLS trust
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpClientConfig::default())
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Execute a request and normalize the result into a [`Response`].
    ///
    /// Any status code, including 4xx/5xx, yields `Ok(Response)` with the
    /// error body read the same way as a success body. Only transport
    /// failures (malformed URL, refused connection, timeout, I/O error)
    /// return a [`RequestError`]; its `code` is the last status captured,
    /// or the 500 sentinel when the failure happened before one existed.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let url = compose_url(&request.url, &request.query)?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(RequestError::new(
                    DEFAULT_ERROR_CODE,
                    format!("unsupported URL scheme '{other}' in {url}"),
                ));
            }
        }

        let mut builder = self.client.request(request.method.into(), url.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = request.body {
            // Content-Length is derived from the UTF-8 byte length of the
            // body; requests without a body carry neither.
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "failed to execute request");
            RequestError::new(DEFAULT_ERROR_CODE, e)
        })?;

        let code = response.status().as_u16();
        let headers = collect_headers(response.headers());

        // Success and error streams collapse into the same shape; the body
        // text is preserved verbatim, internal line breaks included.
        let body = response.text().await.map_err(|e| {
            tracing::error!(url = %url, code, error = %e, "failed to read response body");
            RequestError::new(code, e)
        })?;

        tracing::debug!(url = %url, code, body_len = body.len(), "request completed");

        Ok(Response::new(code, body, headers))
    }

    /// Execute a GET request
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.execute(Request::get(url)).await
    }

    /// Execute a POST request with an optional body
    pub async fn post(&self, url: &str, body: Option<&str>) -> Result<Response> {
        let mut request = Request::post(url);
        if let Some(body) = body {
            request = request.body(body);
        }
        self.execute(request).await
    }

    /// Execute a PUT request with an optional body
    pub async fn put(&self, url: &str, body: Option<&str>) -> Result<Response> {
        let mut request = Request::put(url);
        if let Some(body) = body {
            request = request.body(body);
        }
        self.execute(request).await
    }

    /// Execute a PATCH request with an optional body
    pub async fn patch(&self, url: &str, body: Option<&str>) -> Result<Response> {
        let mut request = Request::patch(url);
        if let Some(body) = body {
            request = request.body(body);
        }
        self.execute(request).await
    }

    /// Execute a DELETE request
    pub async fn delete(&self, url: &str) -> Result<Response> {
        self.execute(Request::delete(url)).await
    }
}

/// Merge query parameters into the base URL.
///
/// Escaping and parameter encoding are delegated to the `url` crate.
fn compose_url(base: &str, query: &HashMap<String, String>) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| RequestError::new(DEFAULT_ERROR_CODE, format!("invalid URL '{base}': {e}")))?;

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Collect response headers into a multi-valued map, preserving repeated
/// headers in order. Values that are not valid UTF-8 are skipped.
fn collect_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            map.entry(name.as_str().to_string())
                .or_default()
                .push(value.to_string());
        }
    }
    map
}
