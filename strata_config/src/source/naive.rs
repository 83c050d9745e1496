//! Sources built from `name=value` pairs, such as a command-line argument.

use std::sync::Arc;

use super::ConfigSource;
use crate::keywords::INSTANCE_NODE;
use crate::result_ext::SourceContextExt;
use crate::{FileNameStyle, RawTree, SourceAction, StrataError, StrataResult};

const PROPERTY_SEPARATOR: char = ':';
const VALUE_SEPARATOR: char = '=';

/// Builder for sources written as `path=value` pairs separated by `:`.
///
/// Paths may be dotted. Properties land under the application node, or
/// under `instance.<name>` inside it when an instance name is set. The
/// source is named after the full property string.
///
/// # Examples
///
/// ```
/// use strata_config::{ConfigSource, OutputStyle};
///
/// let source = ConfigSource::naive("attr1=value1", "app.exe")
///     .instance_name("i1")
///     .build()?;
/// assert_eq!(
///     source.to_string(OutputStyle::OneLine),
///     "<config><app.exe><instance><i1><attr1>value1</attr1></i1></instance></app.exe></config>"
/// );
/// # Ok::<(), std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct NaiveSourceBuilder {
    properties: String,
    app_name: String,
    instance_name: Option<String>,
}

impl NaiveSourceBuilder {
    /// Creates a builder for `properties` targeting `app_name`.
    #[must_use]
    pub fn new(properties: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            properties: properties.into(),
            app_name: app_name.into(),
            instance_name: None,
        }
    }

    /// Places the properties under the named instance of the application.
    #[must_use]
    pub fn instance_name(mut self, name: impl Into<String>) -> Self {
        self.instance_name = Some(name.into());
        self
    }

    /// Builds the source.
    ///
    /// # Errors
    ///
    /// Returns a [`StrataError::Source`] wrapping
    /// [`StrataError::EmptyAppName`] when the application name is blank, or
    /// [`StrataError::InvalidProperty`] for the first token that is not a
    /// single `name=value` pair with both sides non-empty.
    pub fn build(&self) -> StrataResult<ConfigSource> {
        self.build_tree()
            .and_then(|raw| {
                ConfigSource::from_tree(raw, self.properties.as_str(), FileNameStyle::CaseSensitive)
            })
            .source_context(SourceAction::Create, &self.properties)
    }

    fn build_tree(&self) -> StrataResult<RawTree> {
        let app_name = self.app_name.trim();
        if app_name.is_empty() {
            return Err(Arc::new(StrataError::EmptyAppName {
                origin: self.properties.clone(),
            }));
        }
        let mut document = RawTree::new();
        let app = document.push_child(app_name, RawTree::new());
        let target = match self
            .instance_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            Some(instance) => app
                .push_child(INSTANCE_NODE, RawTree::new())
                .push_child(instance, RawTree::new()),
            None => app,
        };
        for property in self
            .properties
            .split(PROPERTY_SEPARATOR)
            .map(str::trim)
            .filter(|token| !token.is_empty())
        {
            let (path, value) = self.split_property(property)?;
            target.add_path(path, value);
        }
        Ok(document)
    }

    fn split_property<'p>(&self, property: &'p str) -> StrataResult<(&'p str, &'p str)> {
        property
            .split_once(VALUE_SEPARATOR)
            .filter(|(_, value)| !value.contains(VALUE_SEPARATOR))
            .map(|(path, value)| (path.trim(), value.trim()))
            .filter(|(path, value)| !path.is_empty() && !value.is_empty())
            .ok_or_else(|| {
                Arc::new(StrataError::InvalidProperty {
                    property: property.to_owned(),
                    source_name: self.properties.clone(),
                })
            })
    }
}
