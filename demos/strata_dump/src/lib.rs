//! Library facade for the `strata-dump` demo so integration tests can drive
//! the layering pipeline without spawning the binary.

pub mod cli;
pub mod dump;
pub mod error;
