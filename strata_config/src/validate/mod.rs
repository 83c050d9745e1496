//! Structural rules every normalised tree must satisfy.
//!
//! Each rule is a separate `check_*` method so it can be exercised on its
//! own; [`TreeValidator::validate`] runs them all and stops at the first
//! violation. The checks never mutate the tree.

use std::sync::Arc;

use crate::error::prune_value;
use crate::keywords::{
    DEFAULT_NODE, INSTANCE_DELIMITER, INSTANCE_NODE, ROOT_NODE, is_keyword, join_path,
};
use crate::{DuplicateKind, RawTree, StrataError, StrataResult, StructureRule};

/// Runs the structural checks for one named source.
#[derive(Clone, Copy, Debug)]
pub struct TreeValidator<'a> {
    source_name: &'a str,
    root: &'a RawTree,
}

impl<'a> TreeValidator<'a> {
    /// Creates a validator for the normalised tree `root`.
    ///
    /// `root` is the document level holding the single `config` node.
    #[must_use]
    pub const fn new(source_name: &'a str, root: &'a RawTree) -> Self {
        Self { source_name, root }
    }

    /// Runs every check in order and returns the first violation.
    ///
    /// # Errors
    ///
    /// Returns a [`StrataError::Structure`] or [`StrataError::Duplicate`]
    /// error describing the first violated rule.
    pub fn validate(&self) -> StrataResult<()> {
        self.check_no_root_data()?;
        self.check_no_default_data()?;
        self.check_no_app_or_instance_data()?;
        self.check_no_mixed_content()?;
        self.check_single_default()?;
        self.check_unique_default_children()?;
        self.check_no_instance_under_default()?;
        self.check_no_direct_default_properties()?;
        self.check_unique_app_nodes()?;
        self.check_single_instance_wrapper()?;
        self.check_unique_instances()
    }

    /// No node holds both a scalar value and children.
    ///
    /// # Errors
    ///
    /// Returns [`StructureRule::MixedContent`] naming the first offending node
    /// in depth-first order.
    pub fn check_no_mixed_content(&self) -> StrataResult<()> {
        match self.config() {
            Some(config) => self.check_mixed_node(ROOT_NODE, config),
            None => Ok(()),
        }
    }

    fn check_mixed_node(&self, path: &str, node: &RawTree) -> StrataResult<()> {
        if node.has_value() && !node.children().is_empty() {
            return self.violation(path, StructureRule::MixedContent);
        }
        node.children()
            .iter()
            .try_for_each(|(name, child)| self.check_mixed_node(&join_path(path, name), child))
    }

    /// The `config` node carries no scalar data.
    ///
    /// # Errors
    ///
    /// Returns [`StructureRule::RootData`].
    pub fn check_no_root_data(&self) -> StrataResult<()> {
        match self.config() {
            Some(config) if config.has_value() => self.violation(
                ROOT_NODE,
                StructureRule::RootData {
                    data: prune_value(config.value()),
                },
            ),
            _ => Ok(()),
        }
    }

    /// The `default` node carries no scalar data.
    ///
    /// # Errors
    ///
    /// Returns [`StructureRule::DefaultData`].
    pub fn check_no_default_data(&self) -> StrataResult<()> {
        match self.default_node() {
            Some(default) if default.has_value() => self.violation(
                &default_path(),
                StructureRule::DefaultData {
                    data: prune_value(default.value()),
                },
            ),
            _ => Ok(()),
        }
    }

    /// Neither application nodes nor their named instances carry scalar data.
    ///
    /// # Errors
    ///
    /// Returns [`StructureRule::AppData`] or [`StructureRule::InstanceData`].
    pub fn check_no_app_or_instance_data(&self) -> StrataResult<()> {
        for (app_name, app) in self.apps() {
            let app_path = join_path(ROOT_NODE, app_name);
            if app.has_value() {
                return self.violation(
                    &app_path,
                    StructureRule::AppData {
                        data: prune_value(app.value()),
                    },
                );
            }
            let Some(wrapper) = app.find(INSTANCE_NODE) else {
                continue;
            };
            if let Some((instance_name, instance)) =
                wrapper.children().iter().find(|(_, node)| node.has_value())
            {
                return self.violation(
                    &format!("{app_path}{INSTANCE_DELIMITER}{instance_name}"),
                    StructureRule::InstanceData {
                        data: prune_value(instance.value()),
                    },
                );
            }
        }
        Ok(())
    }

    /// At most one `default` node exists.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKind::DefaultNode`].
    pub fn check_single_default(&self) -> StrataResult<()> {
        match self.config() {
            Some(config) if config.count(DEFAULT_NODE) > 1 => {
                self.duplicate(DEFAULT_NODE, DuplicateKind::DefaultNode)
            }
            _ => Ok(()),
        }
    }

    /// The children of `default` have distinct names.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKind::DefaultChild`].
    pub fn check_unique_default_children(&self) -> StrataResult<()> {
        let Some(default) = self.default_node() else {
            return Ok(());
        };
        match first_repeated(default) {
            Some(name) => self.duplicate(
                &join_path(DEFAULT_NODE, name),
                DuplicateKind::DefaultChild,
            ),
            None => Ok(()),
        }
    }

    /// `default` holds no `instance` node, whatever its case.
    ///
    /// # Errors
    ///
    /// Returns [`StructureRule::InstanceUnderDefault`].
    pub fn check_no_instance_under_default(&self) -> StrataResult<()> {
        let Some(default) = self.default_node() else {
            return Ok(());
        };
        match default
            .children()
            .iter()
            .find(|(name, _)| is_keyword(name, INSTANCE_NODE))
        {
            Some((name, _)) => self.violation(
                &join_path(&default_path(), name),
                StructureRule::InstanceUnderDefault { node: name.clone() },
            ),
            None => Ok(()),
        }
    }

    /// Every child of `default` is a container rather than a scalar.
    ///
    /// # Errors
    ///
    /// Returns [`StructureRule::DirectDefaultProperty`].
    pub fn check_no_direct_default_properties(&self) -> StrataResult<()> {
        let Some(default) = self.default_node() else {
            return Ok(());
        };
        match default.children().iter().find(|(_, node)| node.has_value()) {
            Some((name, _)) => self.violation(
                &join_path(&default_path(), name),
                StructureRule::DirectDefaultProperty {
                    property: name.clone(),
                },
            ),
            None => Ok(()),
        }
    }

    /// Application nodes have distinct names.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKind::AppNode`].
    pub fn check_unique_app_nodes(&self) -> StrataResult<()> {
        match self.config().and_then(first_repeated) {
            Some(name) => self.duplicate(name, DuplicateKind::AppNode),
            None => Ok(()),
        }
    }

    /// Each application node has at most one `instance` wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKind::InstanceWrapper`].
    pub fn check_single_instance_wrapper(&self) -> StrataResult<()> {
        match self
            .apps()
            .find(|(_, app)| app.count(INSTANCE_NODE) > 1)
        {
            Some((app_name, _)) => self.duplicate(app_name, DuplicateKind::InstanceWrapper),
            None => Ok(()),
        }
    }

    /// Instance names are distinct within each application.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKind::Instance`] naming `app..instance`.
    pub fn check_unique_instances(&self) -> StrataResult<()> {
        for (app_name, app) in self.apps() {
            if let Some(instance) = app.find(INSTANCE_NODE).and_then(first_repeated) {
                return self.duplicate(
                    &format!("{app_name}{INSTANCE_DELIMITER}{instance}"),
                    DuplicateKind::Instance,
                );
            }
        }
        Ok(())
    }

    fn config(&self) -> Option<&'a RawTree> {
        self.root.find(ROOT_NODE)
    }

    fn default_node(&self) -> Option<&'a RawTree> {
        self.config()?.find(DEFAULT_NODE)
    }

    fn apps(&self) -> impl Iterator<Item = (&'a str, &'a RawTree)> {
        self.config()
            .into_iter()
            .flat_map(|config| config.children().iter())
            .filter(|(name, _)| name != DEFAULT_NODE)
            .map(|(name, node)| (name.as_str(), node))
    }

    fn violation(&self, path: &str, rule: StructureRule) -> StrataResult<()> {
        Err(Arc::new(StrataError::structure(self.source_name, path, rule)))
    }

    fn duplicate(&self, path: &str, kind: DuplicateKind) -> StrataResult<()> {
        Err(Arc::new(StrataError::duplicate(self.source_name, path, kind)))
    }
}

fn default_path() -> String {
    join_path(ROOT_NODE, DEFAULT_NODE)
}

fn first_repeated(node: &RawTree) -> Option<&str> {
    node.children()
        .iter()
        .map(|(name, _)| name.as_str())
        .find(|name| node.count(name) > 1)
}

/// Validates the normalised tree `root` on behalf of `source_name`.
///
/// # Errors
///
/// See [`TreeValidator::validate`].
pub fn validate(source_name: &str, root: &RawTree) -> StrataResult<()> {
    TreeValidator::new(source_name, root).validate()
}

#[cfg(test)]
mod tests;
