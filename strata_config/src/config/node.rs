//! Read-only views into a locked config.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use quick_xml::escape::escape;

use super::Frozen;
use crate::keywords::{PATH_DELIMITER, compose_name, join_path};
use crate::{OutputStyle, RawTree, StrataError, StrataResult};

static EMPTY_NODE: RawTree = RawTree::new();

/// A cheap, shareable view of one node of a locked [`crate::Config`].
///
/// Views share the frozen tree with the config and with each other, stay
/// valid after the config is dropped, and may be sent across threads. All
/// path arguments are trimmed and use `.` between segments; repeated
/// siblings resolve to the first occurrence.
///
/// # Examples
///
/// ```
/// use strata_config::{Config, ConfigSource};
///
/// let source = ConfigSource::parse(
///     "<shop><db host='primary'><pool size='8'/></db></shop>",
/// )?;
/// let mut config = Config::new("shop")?;
/// config.merge(&source)?;
/// config.lock()?;
///
/// let pool = config.get_node("db.pool")?;
/// assert_eq!(pool.name(), "shop.db.pool");
/// assert_eq!(pool.node_name(), "pool");
/// assert_eq!(pool.get_as::<u32>("size")?, 8);
/// # Ok::<(), std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConfigNode {
    frozen: Arc<Frozen>,
    path: String,
    address: Vec<usize>,
}

impl ConfigNode {
    pub(super) const fn root(frozen: Arc<Frozen>) -> Self {
        Self {
            frozen,
            path: String::new(),
            address: Vec::new(),
        }
    }

    /// Returns `app[..instance][.path]`.
    #[must_use]
    pub fn name(&self) -> String {
        compose_name(&self.frozen.app_name, &self.frozen.instance_name, &self.path)
    }

    /// Returns the dotted path of this view, empty for the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the last segment of [`ConfigNode::path`].
    #[must_use]
    pub fn node_name(&self) -> &str {
        self.path
            .rsplit_once(PATH_DELIMITER)
            .map_or(self.path.as_str(), |(_, last)| last)
    }

    /// Returns the application name of the owning config.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.frozen.app_name
    }

    /// Returns the instance name of the owning config, empty when none.
    #[must_use]
    pub fn instance_name(&self) -> &str {
        &self.frozen.instance_name
    }

    // Addresses are only built from lookups on the same frozen tree.
    fn node(&self) -> &RawTree {
        self.frozen
            .section
            .node_at(&self.address)
            .unwrap_or(&EMPTY_NODE)
    }

    /// Returns the scalar at `attr`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFound`] when nothing lives at `attr`, or
    /// [`StrataError::IntermediateNode`] when the node there has children.
    pub fn get(&self, attr: &str) -> StrataResult<String> {
        let attr_name = attr.trim();
        self.get_optional(attr_name)?.ok_or_else(|| {
            Arc::new(StrataError::NotFound {
                config_name: self.name(),
                path: attr_name.to_owned(),
            })
        })
    }

    /// Returns the scalar of this view itself.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::IntermediateNode`] when this view has children.
    pub fn value(&self) -> StrataResult<String> {
        self.get("")
    }

    /// Returns the scalar at `attr` parsed as `T`.
    ///
    /// # Errors
    ///
    /// As [`ConfigNode::get`], plus [`StrataError::Conversion`] when the
    /// stored text does not parse as `T`.
    pub fn get_as<T>(&self, attr: &str) -> StrataResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let attr_name = attr.trim();
        let value = self.get(attr_name)?;
        self.convert(attr_name, value)
    }

    /// Returns the scalar at `attr`, or `None` when nothing lives there.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::IntermediateNode`] when the node at `attr` has
    /// children. A present node of the wrong shape is an error, not `None`.
    pub fn get_optional(&self, attr: &str) -> StrataResult<Option<String>> {
        let attr_name = attr.trim();
        match self.node().lookup(attr_name) {
            None => Ok(None),
            Some(found) if found.children().is_empty() => Ok(Some(found.value().to_owned())),
            Some(_) => Err(Arc::new(StrataError::IntermediateNode {
                path: join_path(&self.name(), attr_name),
            })),
        }
    }

    /// Returns the scalar at `attr` parsed as `T`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// As [`ConfigNode::get_optional`], plus [`StrataError::Conversion`].
    pub fn get_optional_as<T>(&self, attr: &str) -> StrataResult<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let attr_name = attr.trim();
        self.get_optional(attr_name)?
            .map(|value| self.convert(attr_name, value))
            .transpose()
    }

    /// Returns the scalar at `attr`, or `default_value` when absent.
    ///
    /// # Errors
    ///
    /// As [`ConfigNode::get_optional`].
    pub fn get_or(&self, attr: &str, default_value: impl Into<String>) -> StrataResult<String> {
        Ok(self
            .get_optional(attr)?
            .unwrap_or_else(|| default_value.into()))
    }

    /// Returns the scalar at `attr` parsed as `T`, or `default_value` when
    /// absent.
    ///
    /// # Errors
    ///
    /// As [`ConfigNode::get_optional_as`]. A present value that does not
    /// parse is an error even though a default was supplied.
    pub fn get_or_as<T>(&self, attr: &str, default_value: T) -> StrataResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        Ok(self.get_optional_as(attr)?.unwrap_or(default_value))
    }

    /// Returns a view of the node at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::MissingChild`] when nothing lives at `path`.
    pub fn get_node(&self, path: &str) -> StrataResult<Self> {
        let relative = path.trim();
        self.get_node_optional(relative).ok_or_else(|| {
            Arc::new(StrataError::MissingChild {
                config_name: self.name(),
                path: relative.to_owned(),
            })
        })
    }

    /// Returns a view of the node at `path`, or `None` when absent.
    ///
    /// An empty path yields a copy of this view.
    #[must_use]
    pub fn get_node_optional(&self, path: &str) -> Option<Self> {
        let relative = path.trim();
        let tail = self.node().lookup_address(relative)?;
        let mut address = self.address.clone();
        address.extend(tail);
        Some(Self {
            frozen: Arc::clone(&self.frozen),
            path: join_path(&self.path, relative),
            address,
        })
    }

    /// Returns views of every child of the node at `parent_path`, in
    /// document order.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::MissingChild`] when nothing lives at
    /// `parent_path`.
    pub fn get_children_of(&self, parent_path: &str) -> StrataResult<Vec<Self>> {
        let parent = self.get_node(parent_path)?;
        let children = parent
            .node()
            .children()
            .iter()
            .enumerate()
            .map(|(index, (name, _))| {
                let mut address = parent.address.clone();
                address.push(index);
                Self {
                    frozen: Arc::clone(&parent.frozen),
                    path: join_path(&parent.path, name),
                    address,
                }
            })
            .collect();
        Ok(children)
    }

    fn convert<T>(&self, attr_name: &str, value: String) -> StrataResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        value.parse::<T>().map_err(|err| {
            Arc::new(StrataError::Conversion {
                config_name: self.name(),
                attribute: attr_name.to_owned(),
                target: std::any::type_name::<T>(),
                reason: err.to_string(),
                value,
            })
        })
    }
}

impl fmt::Display for ConfigNode {
    /// Renders `<name>`, the children at indentation zero, then `</name>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        let node = self.node();
        if node.children().is_empty() {
            return writeln!(f, "<{name}>{}</{name}>", escape(node.value()));
        }
        writeln!(f, "<{name}>")?;
        node.write_children(f, OutputStyle::Pretty)?;
        writeln!(f, "</{name}>")
    }
}
