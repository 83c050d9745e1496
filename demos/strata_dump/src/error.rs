//! Error types for the `strata-dump` demo.
//!
//! Library failures are kept whole so `color-eyre` can print the full
//! context chain reported by `strata_config`.
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while assembling or printing a configuration.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Wraps source construction, merge and query failures.
    #[error("failed to build configuration: {0}")]
    Configuration(#[from] Arc<strata_config::StrataError>),
    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Convenience alias for results returned by the demo.
pub type Result<T> = std::result::Result<T, DumpError>;
