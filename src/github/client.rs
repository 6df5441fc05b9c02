// GitHub API HTTP client.
// Handles authentication headers, per-attempt timeouts, retry with backoff,
// and cooperative cancellation.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{FolioError, Result};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Fixed retry budget per URL.
pub const MAX_ATTEMPTS: u32 = 3;
/// Deadline for a single attempt; elapsing counts as a failed attempt.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

const RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(5000);
const GENERIC_BACKOFF: Duration = Duration::from_millis(1000);

/// Signals cancellation to an in-flight fetch. Dropping the handle without
/// calling `cancel` leaves the fetch running to completion.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Cancellation observer, checked at await points (request send, backoff
/// sleeps). Cancellation is cooperative, never preemptive.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn pair() -> (CancelHandle, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelToken { rx })
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is signalled. Never resolves if the handle
    /// was dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// GitHub API client with retry-aware fetching.
pub struct GitHubClient {
    client: Client,
}

impl GitHubClient {
    /// Create a new client, optionally authenticated with a token.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("folio-cli"));

        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("ignoring token with invalid header characters"),
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FolioError::Network)?;

        Ok(Self { client })
    }

    /// Create a client using the optional GITHUB_TOKEN environment variable.
    /// Public endpoints work without a token; a token raises the rate limit.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN").ok();
        Self::new(token.as_deref())
    }

    /// GET a URL with the fixed retry budget.
    ///
    /// Rate-limited attempts (HTTP 403) wait linearly (`5s * attempt`);
    /// other failures wait exponentially (`1s * 2^attempt`). No wait is
    /// inserted after the final attempt. Not-found responses and
    /// cancellation short-circuit immediately. The error from the last
    /// attempt is what propagates.
    pub async fn fetch_with_retry(&self, url: &str, cancel: &CancelToken) -> Result<Response> {
        for attempt in 1..MAX_ATTEMPTS {
            match self.attempt(url, cancel).await {
                Ok(response) => return Ok(response),
                Err(err @ (FolioError::NotFound(_) | FolioError::Cancelled)) => return Err(err),
                Err(err) => {
                    let delay = backoff_delay(attempt, matches!(err, FolioError::RateLimited));
                    warn!(url, attempt, error = %err, "fetch attempt failed");
                    self.wait(delay, cancel).await?;
                }
            }
        }
        self.attempt(url, cancel).await
    }

    /// A single bounded attempt, raced against the cancellation token.
    async fn attempt(&self, url: &str, cancel: &CancelToken) -> Result<Response> {
        let request = self.client.get(url).send();
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(FolioError::Cancelled),
            outcome = tokio::time::timeout(ATTEMPT_TIMEOUT, request) => match outcome {
                Ok(Ok(response)) => response,
                Ok(Err(err)) => return Err(FolioError::Network(err)),
                Err(_) => return Err(FolioError::Timeout(ATTEMPT_TIMEOUT)),
            },
        };
        check_response(response)
    }

    /// Sleep before the next attempt, observing cancellation.
    async fn wait(&self, delay: Duration, cancel: &CancelToken) -> Result<()> {
        debug!(?delay, "backing off before retry");
        tokio::select! {
            _ = cancel.cancelled() => Err(FolioError::Cancelled),
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

/// Map response status to the error taxonomy.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::FORBIDDEN => Err(FolioError::RateLimited),
        StatusCode::NOT_FOUND => Err(FolioError::NotFound(response.url().to_string())),
        status => Err(FolioError::Http(status)),
    }
}

/// Delay before the attempt following `attempt` (1-based).
fn backoff_delay(attempt: u32, rate_limited: bool) -> Duration {
    if rate_limited {
        RATE_LIMIT_BACKOFF * attempt
    } else {
        GENERIC_BACKOFF * 2u32.pow(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_backoff_is_linear() {
        assert_eq!(backoff_delay(1, true), Duration::from_secs(5));
        assert_eq!(backoff_delay(2, true), Duration::from_secs(10));
        assert_eq!(backoff_delay(3, true), Duration::from_secs(15));
    }

    #[test]
    fn test_generic_backoff_is_exponential() {
        assert_eq!(backoff_delay(1, false), Duration::from_secs(2));
        assert_eq!(backoff_delay(2, false), Duration::from_secs(4));
        assert_eq!(backoff_delay(3, false), Duration::from_secs(8));
    }

    #[tokio::test]
    async fn test_cancel_token_observes_handle() {
        let (handle, token) = CancelToken::pair();
        assert!(!token.is_cancelled());

        handle.cancel();
        assert!(token.is_cancelled());
        // Must resolve promptly once cancelled.
        token.cancelled().await;
    }

    #[tokio::test]
    async fn test_wait_is_interrupted_by_cancellation() {
        let (handle, token) = CancelToken::pair();
        let client = GitHubClient::new(None).unwrap();

        handle.cancel();
        let result = client.wait(Duration::from_secs(60), &token).await;
        assert!(matches!(result, Err(FolioError::Cancelled)));
    }
}
