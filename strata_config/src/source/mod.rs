//! Immutable, validated configuration layers.
//!
//! A [`ConfigSource`] is one normalised and validated document. Sources are
//! built from strings, streams, files or the naive `name=value` form and are
//! merged into a [`crate::Config`] in order.

mod builder;
mod naive;

pub use builder::SourceBuilder;
pub use naive::NaiveSourceBuilder;

use std::sync::Arc;

use camino::Utf8Path;

use crate::keywords::ROOT_NODE;
use crate::{FileNameStyle, OutputStyle, RawTree, StrataResult, normalize, validate};

/// A named, normalised and validated configuration layer.
///
/// Cloning is cheap: clones share the same immutable tree.
///
/// # Examples
///
/// ```
/// use strata_config::{ConfigSource, OutputStyle};
///
/// let source = ConfigSource::parse("<app> <attr> value</attr></app> ")?;
/// assert_eq!(source.name(), "unknown");
/// assert_eq!(
///     source.to_string(OutputStyle::OneLine),
///     "<config><app><attr>value</attr></app></config>"
/// );
/// # Ok::<(), std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    inner: Arc<SourceInner>,
}

#[derive(Debug, Eq, PartialEq)]
struct SourceInner {
    name: String,
    root: RawTree,
}

impl ConfigSource {
    /// Parses an XML document named `"unknown"`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::StrataError::Source`] wrapping the parse,
    /// normalisation or validation failure.
    pub fn parse(text: &str) -> StrataResult<Self> {
        SourceBuilder::new().parse_str(text)
    }

    /// Loads a document from `path`, named after the path.
    ///
    /// The format is chosen from the file extension.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::StrataError::Source`] wrapping the I/O, parse,
    /// normalisation or validation failure.
    pub fn from_file(path: impl AsRef<Utf8Path>) -> StrataResult<Self> {
        SourceBuilder::new().load_file(path)
    }

    /// Starts configuring how a document is read.
    #[must_use]
    pub fn builder() -> SourceBuilder {
        SourceBuilder::new()
    }

    /// Starts building a source from `name=value` pairs separated by `:`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::ConfigSource;
    ///
    /// let source = ConfigSource::naive("db.host=localhost:db.port=5432", "app").build()?;
    /// assert_eq!(source.name(), "db.host=localhost:db.port=5432");
    /// # Ok::<(), std::sync::Arc<strata_config::StrataError>>(())
    /// ```
    #[must_use]
    pub fn naive(properties: impl Into<String>, app_name: impl Into<String>) -> NaiveSourceBuilder {
        NaiveSourceBuilder::new(properties, app_name)
    }

    /// Normalises and validates an already parsed tree.
    ///
    /// # Errors
    ///
    /// Returns the first normalisation or validation failure, unwrapped.
    pub fn from_tree(
        raw: RawTree,
        name: impl Into<String>,
        style: FileNameStyle,
    ) -> StrataResult<Self> {
        let source_name = name.into();
        let root = normalize(raw, &source_name, style)?;
        validate(&source_name, &root)?;
        tracing::debug!(
            source = %source_name,
            nodes = root.find(ROOT_NODE).map_or(0, RawTree::len),
            "config source ready"
        );
        Ok(Self {
            inner: Arc::new(SourceInner {
                name: source_name,
                root,
            }),
        })
    }

    /// Returns the display name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the normalised document, whose only child is `config`.
    #[must_use]
    pub fn root(&self) -> &RawTree {
        &self.inner.root
    }

    /// Returns the `config` node.
    pub(crate) fn config(&self) -> Option<&RawTree> {
        self.inner.root.find(ROOT_NODE)
    }

    /// Renders the normalised document as XML without a prolog.
    #[must_use]
    pub fn to_string(&self, style: OutputStyle) -> String {
        self.inner.root.render(style)
    }
}
