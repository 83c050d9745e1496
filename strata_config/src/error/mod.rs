//! Error types produced while building, merging and querying configuration.

mod constructors;
mod conversions;
mod kind;
mod types;

pub use kind::{ErrorKind, ErrorRecord};
pub use types::{DuplicateKind, ShorthandProblem, SourceAction, StrataError, StructureRule};

pub(crate) use constructors::prune_value;
