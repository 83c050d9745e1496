//! Extensions for mapping errors to `StrataResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting parser errors into the crate's
//! `StrataResult<T>` alias (`Result<T, Arc<StrataError>>`).
//!
//! # Examples
//!
//! ```
//! use strata_config::{StrataResult, StrataResultExt};
//!
//! fn first_event(text: &str) -> StrataResult<String> {
//!     let mut reader = quick_xml::Reader::from_str(text);
//!     // quick_xml::Error implements Into<StrataError>
//!     let event = reader.read_event().into_strata()?;
//!     Ok(format!("{event:?}"))
//! }
//! # assert!(first_event("<a/>").is_ok());
//! ```

use std::sync::Arc;

use crate::{SourceAction, StrataError, StrataResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<StrataError>`
/// into a `StrataResult<T>`.
pub trait StrataResultExt<T, E> {
    /// Convert `Result<T, E>` into `StrataResult<T>` using `Into<StrataError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<StrataError>`.
    fn into_strata(self) -> StrataResult<T>;
}

impl<T, E> StrataResultExt<T, E> for Result<T, E>
where
    E: Into<StrataError>,
{
    fn into_strata(self) -> StrataResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Wraps failures of a source construction step with the source's name.
pub(crate) trait SourceContextExt<T> {
    /// Wrap the error in [`StrataError::Source`].
    fn source_context(self, action: SourceAction, source_name: &str) -> StrataResult<T>;
}

impl<T> SourceContextExt<T> for StrataResult<T> {
    fn source_context(self, action: SourceAction, source_name: &str) -> StrataResult<T> {
        self.map_err(|e| Arc::new(StrataError::wrap_source(action, source_name, e)))
    }
}
