//! Core crate for the `strata_config` layered configuration engine.
//!
//! Configuration arrives as hierarchical documents from several independent
//! sources (files, inline strings, `name=value` command-line strings). Each
//! document is normalised and validated into an immutable [`ConfigSource`],
//! then merged in order into a [`Config`] for one application and an optional
//! instance. Once [`Config::lock`] has been called the merged tree is frozen
//! and can be queried through cheap, shareable [`ConfigNode`] views.
//!
//! ```rust
//! use strata_config::{Config, ConfigSource};
//!
//! # fn main() -> strata_config::StrataResult<()> {
//! let defaults = ConfigSource::parse("<default><db host='localhost' port='5432'/></default>")?;
//! let app = ConfigSource::parse("<billing><db port='6432'/></billing>")?;
//!
//! let mut config = Config::new("billing")?;
//! config.merge(&defaults)?;
//! config.merge(&app)?;
//! config.lock()?;
//!
//! assert_eq!(config.get("db.host")?, "localhost");
//! assert_eq!(config.get_as::<u16>("db.port")?, 6432);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod keywords;
mod merge;
mod normalize;
mod reader;
mod result_ext;
mod source;
mod tree;
mod validate;

pub use config::{Config, ConfigNode};
pub use error::{
    DuplicateKind, ErrorKind, ErrorRecord, ShorthandProblem, SourceAction, StrataError,
    StructureRule,
};
pub use merge::merge_tree;
pub use normalize::{FileNameStyle, TreeNormalizer, normalize};
pub use reader::InputFormat;
pub use result_ext::StrataResultExt;
pub use source::{ConfigSource, NaiveSourceBuilder, SourceBuilder};
pub use tree::{OutputStyle, RawTree};
pub use validate::{TreeValidator, validate};

/// Result alias used throughout the crate.
///
/// Errors are shared through [`std::sync::Arc`] so callers can clone and
/// store them without re-allocating the diagnostic payload.
pub type StrataResult<T> = Result<T, std::sync::Arc<StrataError>>;
