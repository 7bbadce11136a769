//! Bounded-time reachability probes
//!
//! A [`Prober`] turns one [`Endpoint`] into exactly one [`ProbeOutcome`].
//! The actual check is delegated to a [`ReachabilityCheck`] implementation,
//! so the probing logic works the same for the HTTP checker and for test
//! doubles.
//!
//! # Outcome rules
//!
//! - status in `200..=299` -> `Success`
//! - any other status -> `Failure(UnexpectedStatus)`
//! - transport error -> `Failure` with the checker's error
//! - no answer within the timeout -> `Failure(Timeout)`

pub mod error;
pub mod http;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::{Endpoint, ProbeOutcome};

pub use error::ProbeError;
pub use http::HttpChecker;

/// Capability to check whether an address answers
///
/// Implement this trait to probe with something other than HTTP GET.
#[async_trait]
pub trait ReachabilityCheck: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Perform a single attempt and report the status code the target
    /// answered with. Transport problems are reported as errors.
    async fn check(&self, address: &str, timeout: Duration) -> Result<u16, ProbeError>;
}

/// Returns true for statuses that count as reachable
pub fn is_accepted_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Runs one reachability check per endpoint with a hard deadline
#[derive(Clone)]
pub struct Prober {
    checker: Arc<dyn ReachabilityCheck>,
    timeout: Duration,
}

impl std::fmt::Debug for Prober {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prober")
            .field("checker", &self.checker.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Prober {
    pub fn new(checker: Arc<dyn ReachabilityCheck>, timeout: Duration) -> Self {
        Self { checker, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn checker_name(&self) -> &str {
        self.checker.name()
    }

    /// Probe a single endpoint
    ///
    /// Never returns an error: every failure is captured in the outcome.
    pub async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        let start = Instant::now();

        // The checker gets the timeout too, but the deadline is enforced here
        // regardless of how the checker behaves.
        let checked = tokio::time::timeout(
            self.timeout,
            self.checker.check(endpoint.address(), self.timeout),
        )
        .await;

        let result = match checked {
            Ok(Ok(status)) if is_accepted_status(status) => Ok(status),
            Ok(Ok(status)) => Err(ProbeError::UnexpectedStatus(status)),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(status) => {
                tracing::debug!(
                    address = %endpoint.address(),
                    priority = endpoint.priority(),
                    status,
                    elapsed_ms,
                    "Probe succeeded"
                );
                ProbeOutcome::Success(endpoint.clone())
            }
            Err(error) => {
                tracing::warn!(
                    address = %endpoint.address(),
                    priority = endpoint.priority(),
                    checker = self.checker.name(),
                    elapsed_ms,
                    error = %error,
                    "Probe failed"
                );
                ProbeOutcome::failure(endpoint.clone(), error)
            }
        }
    }
}
