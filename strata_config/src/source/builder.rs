//! Builder for document-backed configuration sources.

use std::io::Read;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use super::ConfigSource;
use crate::reader::{read_document, read_file};
use crate::result_ext::SourceContextExt;
use crate::{FileNameStyle, InputFormat, SourceAction, StrataError, StrataResult};

const DEFAULT_SOURCE_NAME: &str = "unknown";

/// Builder for [`ConfigSource`] values read from documents.
///
/// # Examples
///
/// ```
/// use strata_config::{ConfigSource, FileNameStyle, OutputStyle};
///
/// let source = ConfigSource::builder()
///     .name("s1.xml")
///     .file_name_style(FileNameStyle::CaseInsensitive)
///     .parse_str("<APP/>")?;
/// assert_eq!(source.to_string(OutputStyle::OneLine), "<config><app/></config>");
/// # Ok::<(), std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SourceBuilder {
    name: Option<String>,
    input_format: Option<InputFormat>,
    file_name_style: FileNameStyle,
}

impl SourceBuilder {
    /// Creates a builder for XML documents named `"unknown"`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name used in diagnostics.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the document syntax.
    ///
    /// Files default to the format implied by their extension; strings and
    /// streams default to XML.
    #[must_use]
    pub const fn input_format(mut self, format: InputFormat) -> Self {
        self.input_format = Some(format);
        self
    }

    /// Sets how application node names are compared.
    #[must_use]
    pub const fn file_name_style(mut self, style: FileNameStyle) -> Self {
        self.file_name_style = style;
        self
    }

    /// Builds a source from document text.
    ///
    /// # Errors
    ///
    /// Returns a [`StrataError::Source`] wrapping the parse, normalisation or
    /// validation failure.
    pub fn parse_str(&self, text: &str) -> StrataResult<ConfigSource> {
        let name = self.display_name(DEFAULT_SOURCE_NAME);
        self.build(text, self.input_format.unwrap_or_default(), &name)
            .source_context(SourceAction::Parse, &name)
    }

    /// Builds a source from a stream holding UTF-8 document text.
    ///
    /// # Errors
    ///
    /// Returns a [`StrataError::Source`] wrapping the read, parse,
    /// normalisation or validation failure.
    pub fn parse_reader(&self, mut reader: impl Read) -> StrataResult<ConfigSource> {
        let name = self.display_name(DEFAULT_SOURCE_NAME);
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| {
                Arc::new(StrataError::Io {
                    path: Utf8PathBuf::from(name.as_str()),
                    source,
                })
            })
            .and_then(|_| self.build(&text, self.input_format.unwrap_or_default(), &name))
            .source_context(SourceAction::Parse, &name)
    }

    /// Builds a source from a file, named after its path unless a name was
    /// set.
    ///
    /// # Errors
    ///
    /// Returns a [`StrataError::Source`] wrapping the I/O, parse,
    /// normalisation or validation failure.
    pub fn load_file(&self, path: impl AsRef<Utf8Path>) -> StrataResult<ConfigSource> {
        let file = path.as_ref();
        let name = self.display_name(file.as_str());
        let format = self
            .input_format
            .unwrap_or_else(|| InputFormat::from_path(file));
        read_file(file)
            .and_then(|text| self.build(&text, format, &name))
            .source_context(SourceAction::Parse, &name)
    }

    fn display_name(&self, fallback: &str) -> String {
        self.name.clone().unwrap_or_else(|| fallback.to_owned())
    }

    fn build(&self, text: &str, format: InputFormat, name: &str) -> StrataResult<ConfigSource> {
        let raw = read_document(text, format)?;
        ConfigSource::from_tree(raw, name, self.file_name_style)
    }
}
