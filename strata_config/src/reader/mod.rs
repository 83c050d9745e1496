//! Turns document text into raw trees.
//!
//! Readers produce an unnormalised [`RawTree`] whose children are the
//! document's top-level elements. XML attributes are collected under an
//! attribute marker node for the normaliser to splice.

mod file;
#[cfg(feature = "json")]
mod json;
mod xml;

pub(crate) use file::read_file;

use std::fmt;
use std::sync::Arc;

use camino::Utf8Path;

use crate::{RawTree, StrataError, StrataResult};

/// Syntax of a configuration document.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum InputFormat {
    /// XML elements and attributes.
    #[default]
    Xml,
    /// A JSON object; arrays become repeated siblings.
    Json,
}

impl InputFormat {
    /// Guesses the format from a file extension, defaulting to XML.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use strata_config::InputFormat;
    ///
    /// assert_eq!(InputFormat::from_path(Utf8Path::new("app.JSON")), InputFormat::Json);
    /// assert_eq!(InputFormat::from_path(Utf8Path::new("app.conf")), InputFormat::Xml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Xml,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Xml => "XML",
            Self::Json => "JSON",
        })
    }
}

/// Parses `text` in the given format.
pub(crate) fn read_document(text: &str, format: InputFormat) -> StrataResult<RawTree> {
    match format {
        InputFormat::Xml => xml::read_xml(text),
        InputFormat::Json => read_json(text),
    }
}

#[cfg(feature = "json")]
fn read_json(text: &str) -> StrataResult<RawTree> {
    json::read_json(text)
}

#[cfg(not(feature = "json"))]
fn read_json(_text: &str) -> StrataResult<RawTree> {
    Err(Arc::new(StrataError::UnsupportedFormat {
        format: "JSON",
        reason: "the crate was built without the `json` feature",
    }))
}

fn parse_error(message: impl Into<String>, position: Option<u64>) -> Arc<StrataError> {
    Arc::new(StrataError::parse(message, position))
}
