// Core data structures for server selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::prober::error::ProbeError;

/// Candidate server with a preference priority
///
/// Lower `priority` values are preferred. Fields are private so an endpoint
/// cannot change while it is being probed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(alias = "url")]
    address: String,
    priority: i64,
}

impl Endpoint {
    pub fn new(address: impl Into<String>, priority: i64) -> Self {
        Self {
            address: address.into(),
            priority,
        }
    }

    /// Connection target (usually a URL)
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (priority {})", self.address, self.priority)
    }
}

/// Parses `"<priority>=<address>"`, e.g. `"1=https://gitlab.com"`
impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (priority, address) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <priority>=<address>, got '{s}'"))?;

        let priority = priority
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid priority '{}': {e}", priority.trim()))?;

        let address = address.trim();
        if address.is_empty() {
            return Err(format!("missing address in '{s}'"));
        }

        Ok(Self::new(address, priority))
    }
}

/// Settled result of probing one endpoint
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The endpoint answered with an accepted status
    Success(Endpoint),

    /// The endpoint could not be reached. The error is kept for diagnostics
    /// only and never influences selection.
    Failure { endpoint: Endpoint, error: ProbeError },
}

impl ProbeOutcome {
    pub fn failure(endpoint: Endpoint, error: ProbeError) -> Self {
        Self::Failure { endpoint, error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Endpoint this outcome was produced for
    pub fn endpoint(&self) -> &Endpoint {
        match self {
            Self::Success(endpoint) => endpoint,
            Self::Failure { endpoint, .. } => endpoint,
        }
    }

    pub fn error(&self) -> Option<&ProbeError> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(endpoint) => write!(f, "[ONLINE] {endpoint}"),
            Self::Failure { endpoint, error } => write!(f, "[OFFLINE] {endpoint}: {error}"),
        }
    }
}

/// Serializable view of an outcome for reports
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeReport {
    pub address: String,
    pub priority: i64,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ProbeOutcome> for OutcomeReport {
    fn from(outcome: &ProbeOutcome) -> Self {
        let endpoint = outcome.endpoint();
        Self {
            address: endpoint.address().to_string(),
            priority: endpoint.priority(),
            reachable: outcome.is_success(),
            error: outcome.error().map(|e| e.to_string()),
        }
    }
}

/// Result of reducing a full outcome set to a single winner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    Selected(Endpoint),
    NoneAvailable,
}

impl SelectionResult {
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        match self {
            Self::Selected(endpoint) => Some(endpoint),
            Self::NoneAvailable => None,
        }
    }

    /// Convert into the caller-facing result
    ///
    /// `NoneAvailable` becomes [`crate::error::Error::NoServerAvailable`].
    pub fn into_result(self) -> crate::error::Result<Endpoint> {
        match self {
            Self::Selected(endpoint) => Ok(endpoint),
            Self::NoneAvailable => Err(crate::error::Error::NoServerAvailable),
        }
    }
}
