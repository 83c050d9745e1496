//! Convenience constructors for `StrataError`.

use std::sync::Arc;

use super::{DuplicateKind, ShorthandProblem, SourceAction, StrataError, StructureRule};

/// Longest scalar quoted verbatim in a diagnostic.
const MAX_QUOTED_LEN: usize = 10;
/// Characters kept from a scalar that exceeds [`MAX_QUOTED_LEN`].
const PRUNED_PREFIX_LEN: usize = 7;

/// Shortens long scalar payloads before they are quoted in a message.
pub(crate) fn prune_value(value: &str) -> String {
    if value.chars().count() > MAX_QUOTED_LEN {
        let mut pruned: String = value.chars().take(PRUNED_PREFIX_LEN).collect();
        pruned.push_str("...");
        pruned
    } else {
        value.to_owned()
    }
}

impl StrataError {
    /// Construct a parse error from a parser diagnostic.
    #[must_use]
    pub fn parse(message: impl Into<String>, position: Option<u64>) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }

    /// Construct a structural violation for the node at `path`.
    #[must_use]
    pub fn structure(
        source_name: impl Into<String>,
        path: impl Into<String>,
        rule: StructureRule,
    ) -> Self {
        Self::Structure {
            source_name: source_name.into(),
            path: path.into(),
            rule,
        }
    }

    /// Construct a duplicate definition error.
    #[must_use]
    pub fn duplicate(
        source_name: impl Into<String>,
        path: impl Into<String>,
        kind: DuplicateKind,
    ) -> Self {
        Self::Duplicate {
            source_name: source_name.into(),
            path: path.into(),
            kind,
        }
    }

    /// Construct an instance shorthand error for `element`.
    #[must_use]
    pub fn shorthand(
        source_name: impl Into<String>,
        element: impl Into<String>,
        problem: ShorthandProblem,
    ) -> Self {
        Self::Shorthand {
            source_name: source_name.into(),
            element: element.into(),
            problem,
        }
    }

    /// Wraps `source` as the cause of a failed source construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use strata_config::{ErrorKind, SourceAction, StrataError};
    ///
    /// let inner = Arc::new(StrataError::parse("unexpected end", Some(3)));
    /// let err = StrataError::wrap_source(SourceAction::Parse, "app.xml", inner);
    /// assert_eq!(err.kind(), ErrorKind::Parse);
    /// assert!(err.to_string().starts_with("Couldn't parse config 'app.xml'"));
    /// ```
    #[must_use]
    pub fn wrap_source(
        action: SourceAction,
        source_name: impl Into<String>,
        source: Arc<Self>,
    ) -> Self {
        Self::Source {
            action,
            source_name: source_name.into(),
            source,
        }
    }
}
