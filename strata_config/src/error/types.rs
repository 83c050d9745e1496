//! Primary error enum and the subkinds carried by its variants.

use std::fmt;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while building, merging or querying configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrataError {
    /// The input document is not well formed.
    #[error("Malformed document: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
        /// Byte offset reported by the parser, when known.
        position: Option<u64>,
    },

    /// The document produced no nodes at all.
    #[error("Config source '{source_name}' is empty")]
    EmptySource {
        /// Display name of the empty source.
        source_name: String,
    },

    /// A structural rule of normalised trees was violated.
    #[error("Invalid config source '{source_name}' at '{path}': {rule}")]
    Structure {
        /// Display name of the offending source.
        source_name: String,
        /// Dotted path of the offending node.
        path: String,
        /// The rule that failed.
        rule: StructureRule,
    },

    /// An `app..instance` element name is malformed.
    #[error("Invalid instance shorthand '{element}' in config source '{source_name}': {problem}")]
    Shorthand {
        /// Display name of the offending source.
        source_name: String,
        /// Element name as written in the document.
        element: String,
        /// What is wrong with the element name.
        problem: ShorthandProblem,
    },

    /// A node or attribute that must be unique is defined more than once.
    #[error("Duplicate {kind} '{path}' in config source '{source_name}'")]
    Duplicate {
        /// Display name of the offending source.
        source_name: String,
        /// Path or name of the duplicated node.
        path: String,
        /// Which uniqueness rule was broken.
        kind: DuplicateKind,
    },

    /// Repeated sibling nodes cannot be paired unambiguously during a merge.
    #[error(
        "Can't do ambiguous merge of node '{node}' from config source '{source_name}' to config '{config_name}'"
    )]
    AmbiguousMerge {
        /// Name of the repeated node.
        node: String,
        /// Source being merged.
        source_name: String,
        /// Config receiving the merge.
        config_name: String,
    },

    /// A merge was attempted after the config was locked.
    #[error("config '{config_name}' is locked")]
    Locked {
        /// Name of the locked config.
        config_name: String,
    },

    /// A query was attempted before the config was locked.
    #[error("Initialization of config '{config_name}' is not finished")]
    NotFinished {
        /// Name of the unlocked config.
        config_name: String,
    },

    /// The requested property does not exist.
    #[error("Can't find property '{path}' in config '{config_name}'")]
    NotFound {
        /// Name of the config or view that was queried.
        config_name: String,
        /// Requested path, relative to the queried view.
        path: String,
    },

    /// The requested child node does not exist.
    #[error("config '{config_name}' doesn't have child '{path}'")]
    MissingChild {
        /// Name of the config or view that was queried.
        config_name: String,
        /// Requested path, relative to the queried view.
        path: String,
    },

    /// A scalar was requested from a node that holds children.
    #[error("Node '{path}' is intermediate node without value")]
    IntermediateNode {
        /// Fully qualified name of the node.
        path: String,
    },

    /// A stored value could not be converted to the requested type.
    #[error(
        "Can't convert value '{value}' of a property '{attribute}' in config '{config_name}' to {target}: {reason}"
    )]
    Conversion {
        /// Name of the config or view that was queried.
        config_name: String,
        /// Requested attribute path.
        attribute: String,
        /// Stored string value.
        value: String,
        /// Name of the requested type.
        target: &'static str,
        /// Parser diagnostic for the requested type.
        reason: String,
    },

    /// A `name=value` token of the naive form is malformed.
    #[error("Invalid property '{property}' in config source '{source_name}'")]
    InvalidProperty {
        /// Offending token, trimmed.
        property: String,
        /// The complete property string.
        source_name: String,
    },

    /// An application name is empty after trimming.
    #[error("Empty application name. Couldn't create configuration from '{origin}'")]
    EmptyAppName {
        /// Input that required the application name.
        origin: String,
    },

    /// A config was created without an application name.
    #[error("Empty config name")]
    EmptyConfigName,

    /// Reading a configuration document failed.
    #[error("Failed to read config source '{path}': {source}")]
    Io {
        /// Path (or display name) of the document.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The requested input format cannot be parsed by this build.
    #[error("Parsing of {format} config sources is not supported: {reason}")]
    UnsupportedFormat {
        /// Name of the requested format.
        format: &'static str,
        /// Why the format is unavailable.
        reason: &'static str,
    },

    /// Building a config source failed; wraps the underlying failure.
    #[error("Couldn't {action} '{source_name}': {source}")]
    Source {
        /// Which construction step failed.
        action: SourceAction,
        /// Display name of the source.
        source_name: String,
        /// Underlying failure.
        #[source]
        source: Arc<StrataError>,
    },
}

/// Structural rules enforced on every normalised tree.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum StructureRule {
    /// A node holds both a scalar value and child nodes.
    MixedContent,
    /// The root node carries scalar data.
    RootData {
        /// Pruned scalar payload.
        data: String,
    },
    /// The `default` node carries scalar data.
    DefaultData {
        /// Pruned scalar payload.
        data: String,
    },
    /// An application node carries scalar data.
    AppData {
        /// Pruned scalar payload.
        data: String,
    },
    /// A named instance node carries scalar data.
    InstanceData {
        /// Pruned scalar payload.
        data: String,
    },
    /// The `default` node contains an `instance` node.
    InstanceUnderDefault {
        /// Node name as written in the document.
        node: String,
    },
    /// The `default` node contains a scalar property directly.
    DirectDefaultProperty {
        /// Name of the property.
        property: String,
    },
    /// The root keyword appears somewhere other than at the top of the tree.
    RootNotOnTop,
}

impl fmt::Display for StructureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MixedContent => f.write_str("element contains both value and child attributes"),
            Self::RootData { data } => write!(f, "invalid data node '{data}' under 'config' node"),
            Self::DefaultData { data } => {
                write!(f, "invalid data node '{data}' under 'default' node")
            }
            Self::AppData { data } => {
                write!(f, "invalid data node '{data}' under application node")
            }
            Self::InstanceData { data } => {
                write!(f, "invalid data node '{data}' under instance node")
            }
            Self::InstanceUnderDefault { node } => {
                write!(f, "'default' node can not contain '{node}' node")
            }
            Self::DirectDefaultProperty { property } => write!(
                f,
                "'default' node can not contain direct properties. See 'default.{property}' property"
            ),
            Self::RootNotOnTop => f.write_str("'config' must be root node"),
        }
    }
}

/// Problems detected in `app..instance` element names.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ShorthandProblem {
    /// Either the application or the instance part is empty.
    MissingPart,
    /// The application part names the `default` section.
    DefaultInstance,
}

impl fmt::Display for ShorthandProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPart => f.write_str("expected format 'app_name..instance_name'"),
            Self::DefaultInstance => f.write_str("default node can't have instance"),
        }
    }
}

/// Uniqueness rules whose violation yields [`StrataError::Duplicate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum DuplicateKind {
    /// Two attributes with the same name on one element.
    Attribute,
    /// More than one `default` node.
    DefaultNode,
    /// Two children of `default` with the same name.
    DefaultChild,
    /// Two application nodes with the same name.
    AppNode,
    /// More than one `instance` wrapper under an application node.
    InstanceWrapper,
    /// Two instances with the same name under one application.
    Instance,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attribute => "definition of attribute",
            Self::DefaultNode => "default node",
            Self::DefaultChild => "default child node",
            Self::AppNode | Self::Instance => "node",
            Self::InstanceWrapper => "instance node under",
        })
    }
}

/// Construction step reported by [`StrataError::Source`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceAction {
    /// Parsing a document (string, stream or file).
    Parse,
    /// Building a source from the naive `name=value` form.
    Create,
}

impl fmt::Display for SourceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parse => "parse config",
            Self::Create => "create configuration from",
        })
    }
}
