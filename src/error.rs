//! Unified error handling for the findserver crate
//!
//! Probe failures are recorded inside [`crate::models::ProbeOutcome`] and
//! never surface on their own. The error a caller of
//! [`crate::finder::ServerFinder::find`] has to handle is
//! [`Error::NoServerAvailable`]; the remaining variants cover setup problems
//! (configuration, HTTP client construction, reading the config file).
//!
//! # Usage
//!
//! ```rust,ignore
//! use findserver::error::{Error, FindServerErrorTrait};
//!
//! match finder.find(&servers).await {
//!     Ok(server) => println!("using {server}"),
//!     Err(Error::NoServerAvailable) => eprintln!("no server is online"),
//!     Err(e) if e.is_recoverable() => eprintln!("try again later: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::prober::error::ProbeError;

/// Common trait for findserver error types
pub trait FindServerErrorTrait: std::error::Error {
    /// Check if this error is likely to go away on a later attempt
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, connection)
    Network,
    /// No candidate could be selected
    Selection,
    /// Configuration and validation errors
    Config,
    /// Config file could not be read
    Storage,
    /// Config file is not valid TOML
    Parsing,
    /// Probe task panicked or was cancelled
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Selection => "selection",
            Self::Config => "config",
            Self::Storage => "storage",
            Self::Parsing => "parsing",
            Self::Other => "other",
        }
    }
}

impl FindServerErrorTrait for ProbeError {
    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidAddress(_))
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAddress(_) => ErrorCategory::Config,
            Self::Aborted(_) => ErrorCategory::Other,
            _ => ErrorCategory::Network,
        }
    }
}

/// Unified error type for the findserver crate
#[derive(Error, Debug)]
pub enum Error {
    /// Every candidate failed its probe, or there were no candidates
    #[error("No server is online")]
    NoServerAvailable,

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl FindServerErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            // Servers may come back online
            Self::NoServerAvailable => true,
            Self::Http(_) => true,
            Self::Io(_) => true,
            Self::Config(_) | Self::Toml(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::NoServerAvailable => ErrorCategory::Selection,
            Self::Http(_) => ErrorCategory::Network,
            Self::Config(_) => ErrorCategory::Config,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Toml(_) => ErrorCategory::Parsing,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_no_server_available(&self) -> bool {
        matches!(self, Self::NoServerAvailable)
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
