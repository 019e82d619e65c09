use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::OracleError;
use super::{
    FilterOracle, IdentifierOracle, JudgeOracle, Oracle, Proposal, ProposalRequest,
    RelevanceOracle,
};
use crate::constants::{DEFAULT_MAX_RETRY, DEFAULT_RETRY_BACKOFF_MS};

/// Runs `call` up to `attempts` times, returning the first success.
///
/// Every failure is retried regardless of kind; after the last one the result degrades to
/// `None` so the caller can continue with an empty round.
pub async fn attempt<T, F, Fut>(attempts: usize, operation: &'static str, mut call: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, OracleError>>,
{
    for n in 1..=attempts {
        match call().await {
            Ok(value) => return Some(value),
            Err(e) => {
                warn!(
                    operation = operation,
                    attempt = n,
                    attempts = attempts,
                    error = %e,
                    "Oracle call failed"
                );
            }
        }
    }

    warn!(
        operation = operation,
        attempts = attempts,
        "Oracle attempts exhausted, using empty result"
    );
    None
}

/// Retries transient failures of the wrapped oracle.
///
/// `max_retry` is the total number of calls made for one request (at least one). Errors that
/// are not [`OracleError::Transient`] are returned immediately.
#[derive(Debug, Clone)]
pub struct RetryingOracle<O> {
    inner: O,
    max_retry: usize,
    backoff: Duration,
}

impl<O> RetryingOracle<O> {
    pub fn new(inner: O, max_retry: usize) -> Self {
        Self {
            inner,
            max_retry,
            backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        }
    }

    /// Wraps `inner` with the default retry budget.
    pub fn with_default_budget(inner: O) -> Self {
        Self::new(inner, DEFAULT_MAX_RETRY)
    }

    /// Sets the pause between attempts.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// The wrapped oracle.
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Total calls allowed per request.
    pub fn max_retry(&self) -> usize {
        self.max_retry
    }

    async fn call_with_retry<T, F, Fut>(
        &self,
        operation: &'static str,
        mut call: F,
    ) -> Result<T, OracleError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, OracleError>>,
    {
        let attempts = self.max_retry.max(1);
        let mut n = 1;

        loop {
            match call().await {
                Ok(value) => {
                    if n > 1 {
                        debug!(operation = operation, attempt = n, "Oracle call recovered");
                    }
                    return Ok(value);
                }
                Err(e) if e.is_transient() && n < attempts => {
                    warn!(
                        operation = operation,
                        attempt = n,
                        attempts = attempts,
                        error = %e,
                        "Transient oracle failure, retrying"
                    );
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                    n += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl<O: Oracle> Oracle for RetryingOracle<O> {
    async fn propose(&self, request: &ProposalRequest<'_>) -> Result<Proposal, OracleError> {
        self.call_with_retry("propose", || self.inner.propose(request))
            .await
    }
}

impl<O: FilterOracle> FilterOracle for RetryingOracle<O> {
    async fn filter(&self, scenario: &str, candidates: &str) -> Result<Vec<String>, OracleError> {
        self.call_with_retry("filter", || self.inner.filter(scenario, candidates))
            .await
    }
}

impl<O: JudgeOracle> JudgeOracle for RetryingOracle<O> {
    async fn judge(&self, scenario: &str, references: &str) -> Result<String, OracleError> {
        self.call_with_retry("judge", || self.inner.judge(scenario, references))
            .await
    }
}

impl<O: IdentifierOracle> IdentifierOracle for RetryingOracle<O> {
    async fn generate(&self, scenario: &str, count: usize) -> Result<Vec<String>, OracleError> {
        self.call_with_retry("generate", || self.inner.generate(scenario, count))
            .await
    }
}

impl<O: RelevanceOracle> RelevanceOracle for RetryingOracle<O> {
    async fn is_relevant(&self, scenario: &str, candidate: &str) -> Result<bool, OracleError> {
        self.call_with_retry("is_relevant", || self.inner.is_relevant(scenario, candidate))
            .await
    }
}
