//! Classification of errors and flattening of wrapper chains.

use std::fmt;

use super::StrataError;

/// Coarse classification of a [`StrataError`].
///
/// Wrapper variants report the kind of the failure they wrap, so callers can
/// branch on the root cause without unpicking the chain themselves.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed input document.
    Parse,
    /// A document without any content.
    EmptySource,
    /// A validator rule failed.
    StructuralViolation,
    /// A malformed `app..instance` element name.
    ShorthandFormat,
    /// A duplicate attribute or node definition.
    DuplicateDefinition,
    /// Repeated siblings cannot be merged.
    AmbiguousMerge,
    /// Merge after lock or query before lock.
    LockState,
    /// Missing property or child node.
    NotFound,
    /// Scalar requested from a node with children.
    IntermediateNode,
    /// Stored value does not parse as the requested type.
    TypeConversion,
    /// Malformed `name=value` token.
    InvalidProperty,
    /// Empty application or config name.
    InvalidName,
    /// Reading a document failed.
    Io,
    /// The requested input format is not available.
    UnsupportedFormat,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parse => "parse error",
            Self::EmptySource => "empty source",
            Self::StructuralViolation => "structural violation",
            Self::ShorthandFormat => "instance shorthand format",
            Self::DuplicateDefinition => "duplicate definition",
            Self::AmbiguousMerge => "ambiguous merge",
            Self::LockState => "lock state",
            Self::NotFound => "not found",
            Self::IntermediateNode => "intermediate node",
            Self::TypeConversion => "type conversion",
            Self::InvalidProperty => "invalid property",
            Self::InvalidName => "invalid name",
            Self::Io => "i/o",
            Self::UnsupportedFormat => "unsupported format",
        })
    }
}

/// One link of an error chain as returned by [`StrataError::trail`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ErrorRecord {
    /// Classification of this link.
    pub kind: ErrorKind,
    /// Source, config or file the link refers to, when known.
    pub location: Option<String>,
    /// Message of this link alone, without the messages of its causes.
    pub message: String,
}

impl StrataError {
    /// Classifies the error, looking through [`StrataError::Source`] wrappers.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::EmptySource { .. } => ErrorKind::EmptySource,
            Self::Structure { .. } => ErrorKind::StructuralViolation,
            Self::Shorthand { .. } => ErrorKind::ShorthandFormat,
            Self::Duplicate { .. } => ErrorKind::DuplicateDefinition,
            Self::AmbiguousMerge { .. } => ErrorKind::AmbiguousMerge,
            Self::Locked { .. } | Self::NotFinished { .. } => ErrorKind::LockState,
            Self::NotFound { .. } | Self::MissingChild { .. } => ErrorKind::NotFound,
            Self::IntermediateNode { .. } => ErrorKind::IntermediateNode,
            Self::Conversion { .. } => ErrorKind::TypeConversion,
            Self::InvalidProperty { .. } => ErrorKind::InvalidProperty,
            Self::EmptyAppName { .. } | Self::EmptyConfigName => ErrorKind::InvalidName,
            Self::Io { .. } => ErrorKind::Io,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::Source { source, .. } => source.kind(),
        }
    }

    /// Returns the source, config or file this error refers to.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::EmptySource { source_name }
            | Self::Structure { source_name, .. }
            | Self::Shorthand { source_name, .. }
            | Self::Duplicate { source_name, .. }
            | Self::InvalidProperty { source_name, .. }
            | Self::Source { source_name, .. } => Some(source_name),
            Self::AmbiguousMerge { config_name, .. }
            | Self::Locked { config_name }
            | Self::NotFinished { config_name }
            | Self::NotFound { config_name, .. }
            | Self::MissingChild { config_name, .. }
            | Self::Conversion { config_name, .. } => Some(config_name),
            Self::IntermediateNode { path } => Some(path),
            Self::EmptyAppName { origin } => Some(origin),
            Self::Io { path, .. } => Some(path.as_str()),
            Self::Parse { .. } | Self::EmptyConfigName | Self::UnsupportedFormat { .. } => None,
        }
    }

    /// Flattens the wrapper chain into records, outermost first.
    ///
    /// The last record describes the root cause and carries its full message.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::{ConfigSource, ErrorKind};
    ///
    /// let err = ConfigSource::parse("<config><a>1<b/></a></config>").unwrap_err();
    /// let trail = err.trail();
    /// assert_eq!(trail.len(), 2);
    /// assert_eq!(trail[1].kind, ErrorKind::StructuralViolation);
    /// ```
    #[must_use]
    pub fn trail(&self) -> Vec<ErrorRecord> {
        let mut records = Vec::new();
        let mut current = self;
        while let Self::Source {
            action,
            source_name,
            source,
        } = current
        {
            records.push(ErrorRecord {
                kind: source.kind(),
                location: Some(source_name.clone()),
                message: format!("Couldn't {action} '{source_name}'"),
            });
            current = source;
        }
        records.push(ErrorRecord {
            kind: current.kind(),
            location: current.location().map(str::to_owned),
            message: current.to_string(),
        });
        records
    }

    /// Returns the innermost error, looking through [`StrataError::Source`].
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Source { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
