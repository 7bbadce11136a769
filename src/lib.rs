//! findserver - pick the preferred online server
//!
//! Probes a list of candidate servers concurrently and returns the reachable
//! one with the lowest priority value.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and the candidate server list
//! - [`models`] - Endpoints, probe outcomes and selection results
//! - [`prober`] - Bounded-time reachability checks (HTTP GET by default)
//! - [`selector`] - Deterministic reduction of outcomes to one winner
//! - [`finder`] - Concurrent fan-out tying probing and selection together
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use findserver::config::Config;
//! use findserver::error::Error;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     match findserver::find_server(&config).await {
//!         Ok(server) => println!("Using {server}"),
//!         Err(Error::NoServerAvailable) => eprintln!("No server is online"),
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod finder;
pub mod models;
pub mod prober;
pub mod selector;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ProbeConfig};
    pub use crate::error::{Error, ErrorCategory, FindServerErrorTrait, Result};
    pub use crate::finder::{find_server, ServerFinder};
    pub use crate::models::{Endpoint, ProbeOutcome, SelectionResult};
    pub use crate::prober::{HttpChecker, ProbeError, Prober, ReachabilityCheck};
    pub use crate::selector::select;
}

// Direct re-exports for convenience
pub use finder::{find_server, ServerFinder};
pub use models::{Endpoint, ProbeOutcome, SelectionResult};
