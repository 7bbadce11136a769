//! HTTP GET reachability checker
//!
//! Issues a single GET per check and reports the final status code. Redirects
//! are followed up to `max_redirects` hops, so a 3xx that leads to a 2xx
//! counts as reachable; with `max_redirects = 0` the 3xx itself is reported.
//! Certificate validation is always on.

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

use super::error::ProbeError;
use super::ReachabilityCheck;
use crate::config::ProbeConfig;
use crate::error::Result;

/// Reachability checker backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpChecker {
    /// HTTP client with configured timeout and redirect policy
    client: Client,
}

impl HttpChecker {
    /// Create a checker from probe settings
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be created
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let redirect = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .redirect(redirect)
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }
}

/// Only absolute http(s) URLs can be probed
fn parse_target(address: &str) -> std::result::Result<Url, ProbeError> {
    let url = Url::parse(address)
        .map_err(|e| ProbeError::InvalidAddress(format!("{address}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ProbeError::InvalidAddress(format!(
            "{address}: unsupported scheme '{scheme}'"
        ))),
    }
}

#[async_trait]
impl ReachabilityCheck for HttpChecker {
    fn name(&self) -> &str {
        "http"
    }

    async fn check(
        &self,
        address: &str,
        timeout: Duration,
    ) -> std::result::Result<u16, ProbeError> {
        let url = parse_target(address)?;

        tracing::trace!(url = %url, "Sending probe request");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, timeout))?;

        Ok(response.status().as_u16())
    }
}
