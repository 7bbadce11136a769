//! Concurrent probe fan-out and server selection
//!
//! [`ServerFinder`] probes every candidate at once, waits until all probes
//! have settled, and hands the outcomes to [`crate::selector::select`] in the
//! order the candidates were declared.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::AbortHandle;

use crate::config::{Config, ProbeConfig};
use crate::error::Result;
use crate::models::{Endpoint, ProbeOutcome};
use crate::prober::{HttpChecker, ProbeError, Prober, ReachabilityCheck};
use crate::selector::select;

/// Aborts still-running probe tasks when the join is dropped early
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Probes a candidate set and picks the best reachable endpoint
#[derive(Debug, Clone)]
pub struct ServerFinder {
    prober: Prober,
}

impl ServerFinder {
    pub fn new(prober: Prober) -> Self {
        Self { prober }
    }

    /// Create a finder that probes over HTTP GET
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be created
    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        let checker = HttpChecker::new(config)?;
        Ok(Self::with_checker(Arc::new(checker), config))
    }

    /// Create a finder with a custom checker and the configured timeout
    pub fn with_checker(checker: Arc<dyn ReachabilityCheck>, config: &ProbeConfig) -> Self {
        Self::new(Prober::new(checker, config.timeout()))
    }

    pub fn prober(&self) -> &Prober {
        &self.prober
    }

    /// Probe every candidate concurrently
    ///
    /// Returns one outcome per candidate, in candidate order. Each probe runs
    /// in its own task; a probe that panics settles as
    /// [`ProbeError::Aborted`] without disturbing the others. Dropping the
    /// returned future cancels every probe still in flight.
    pub async fn probe_all(&self, candidates: &[Endpoint]) -> Vec<ProbeOutcome> {
        let handles: Vec<_> = candidates
            .iter()
            .cloned()
            .map(|endpoint| {
                let prober = self.prober.clone();
                tokio::spawn(async move { prober.probe(&endpoint).await })
            })
            .collect();

        let _guard = AbortOnDrop(handles.iter().map(|h| h.abort_handle()).collect());

        join_all(handles)
            .await
            .into_iter()
            .zip(candidates)
            .map(|(joined, endpoint)| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(
                        address = %endpoint.address(),
                        error = %e,
                        "Probe task did not complete"
                    );
                    ProbeOutcome::failure(endpoint.clone(), ProbeError::Aborted(e.to_string()))
                }
            })
            .collect()
    }

    /// Probe all candidates and return the reachable one with the lowest
    /// priority
    ///
    /// # Errors
    ///
    /// Returns `Error::NoServerAvailable` if no candidate is reachable or the
    /// candidate list is empty
    pub async fn find(&self, candidates: &[Endpoint]) -> Result<Endpoint> {
        let start = Instant::now();
        let outcomes = self.probe_all(candidates).await;
        let reachable = outcomes.iter().filter(|o| o.is_success()).count();

        let result = select(&outcomes).into_result();

        match &result {
            Ok(endpoint) => tracing::info!(
                candidates = candidates.len(),
                reachable,
                address = %endpoint.address(),
                priority = endpoint.priority(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Selected server"
            ),
            Err(_) => tracing::warn!(
                candidates = candidates.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "No server is online"
            ),
        }

        result
    }
}

/// Probe the configured servers over HTTP and return the preferred online
/// one
///
/// # Errors
///
/// Returns `Error::Config` for invalid settings, `Error::Http` if the client
/// cannot be built, and `Error::NoServerAvailable` if nothing answered
pub async fn find_server(config: &Config) -> Result<Endpoint> {
    config.validate()?;

    let finder = ServerFinder::from_config(&config.probe)?;
    finder.find(&config.servers).await
}
