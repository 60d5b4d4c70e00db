//! Task-based async adapter
//!
//! Runs the synchronous request flow on a tokio task and reports one of
//! three outcomes as a tagged value: completed, failed, or cancelled.
//! There is no shared queue and no backpressure; each spawned request runs
//! independently, bounded only by what the runtime enforces.

use tokio::task::JoinHandle;

use crate::client::HttpClient;
use crate::request::Request;
use crate::response::Response;
use crate::{RequestError, Result, DEFAULT_ERROR_CODE};

/// Final state of a spawned request
#[derive(Debug)]
pub enum Outcome {
    /// The round trip finished; any status class counts as completed
    Completed(Response),
    /// The transport failed before a response could be produced
    Failed(RequestError),
    /// The task was aborted before completion
    Cancelled,
}

impl Outcome {
    /// The response, if the request completed
    pub fn response(self) -> Option<Response> {
        match self {
            Outcome::Completed(response) => Some(response),
            _ => None,
        }
    }

    /// True when the task was cancelled before completion
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

/// Handle to a request running on a tokio task
#[derive(Debug)]
pub struct RequestHandle {
    task: JoinHandle<Result<Response>>,
}

impl RequestHandle {
    /// Abort the underlying task. A request aborted before completion
    /// resolves to [`Outcome::Cancelled`].
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the request to reach its final state
    pub async fn outcome(self) -> Outcome {
        match self.task.await {
            Ok(Ok(response)) => Outcome::Completed(response),
            Ok(Err(err)) => Outcome::Failed(err),
            Err(join_err) if join_err.is_cancelled() => Outcome::Cancelled,
            Err(join_err) => {
                tracing::error!(error = %join_err, "request task failed to join");
                Outcome::Failed(RequestError::new(DEFAULT_ERROR_CODE, join_err))
            }
        }
    }
}

/// Schedule a request on a tokio task without blocking the caller.
///
/// The per-request timeouts baked into the client and request still apply;
/// completion latency has no other upper bound.
///
/// # Examples
/// ```no_run
/// use http_client::{spawn, HttpClient, Outcome, Request};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = HttpClient::with_defaults()?;
///     let handle = spawn(&client, Request::get("https://example.com/slow"));
///
///     match handle.outcome().await {
///         Outcome::Completed(response) => println!("status {}", response.code()),
///         Outcome::Failed(err) => eprintln!("{err}"),
///         Outcome::Cancelled => eprintln!("aborted"),
///     }
///     Ok(())
/// }
/// ```
pub fn spawn(client: &HttpClient, request: Request) -> RequestHandle {
    let client = client.clone();
    let task = tokio::spawn(async move { client.execute(request).await });
    RequestHandle { task }
}
