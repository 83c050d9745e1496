//! Trait-based conversions from parser errors into `StrataError`.

use super::StrataError;

impl From<quick_xml::Error> for StrataError {
    fn from(e: quick_xml::Error) -> Self {
        Self::parse(e.to_string(), None)
    }
}

impl From<quick_xml::events::attributes::AttrError> for StrataError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::parse(format!("invalid attribute: {e}"), None)
    }
}

/// Convert JSON decoding failures into [`StrataError::Parse`].
#[cfg(feature = "json")]
impl From<serde_json::Error> for StrataError {
    fn from(e: serde_json::Error) -> Self {
        Self::parse(e.to_string(), None)
    }
}
