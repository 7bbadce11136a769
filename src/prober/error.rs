//! Error types for reachability probes

use std::time::Duration;
use thiserror::Error;

/// Reasons a single probe can fail
///
/// Every variant is absorbed into a [`crate::models::ProbeOutcome::Failure`];
/// none of them abort sibling probes.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// HTTP transport error (TLS, protocol, body, redirect loop)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection could not be established (refused, DNS, unreachable)
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Check did not settle within the probe timeout
    #[error("Probe timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Server answered outside the accepted 2xx range
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    /// Address could not be turned into a request target
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Probe task panicked or was cancelled before settling
    #[error("Probe aborted: {0}")]
    Aborted(String),
}

impl ProbeError {
    /// Map a reqwest error onto the probe taxonomy
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_builder() {
            Self::InvalidAddress(err.to_string())
        } else {
            Self::Http(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
