//! Rewrites arbitrary parsed trees into the canonical configuration shape.
//!
//! The canonical shape has exactly one top-level `config` node whose children
//! are the `default` section and application nodes. Instances live under an
//! `instance` wrapper inside their application node. Normalisation runs four
//! steps in a fixed order:
//!
//! 1. [`TreeNormalizer::wrap_root`]
//! 2. [`TreeNormalizer::flatten_attributes`]
//! 3. [`TreeNormalizer::fold_keywords`]
//! 4. [`TreeNormalizer::expand_instance_shorthand`]

use std::mem;
use std::sync::Arc;

use crate::keywords::{
    ATTRIBUTES_MARKER, DEFAULT_NODE, INSTANCE_DELIMITER, INSTANCE_NODE, ROOT_NODE, is_keyword,
    join_path,
};
use crate::{DuplicateKind, RawTree, ShorthandProblem, StrataError, StrataResult, StructureRule};

/// How application node names are compared.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FileNameStyle {
    /// Application names keep their spelling.
    #[default]
    CaseSensitive,
    /// Application names are folded to lowercase.
    CaseInsensitive,
}

/// Applies the normalisation steps on behalf of one named source.
#[derive(Clone, Copy, Debug)]
pub struct TreeNormalizer<'a> {
    source_name: &'a str,
    style: FileNameStyle,
}

impl<'a> TreeNormalizer<'a> {
    /// Creates a normaliser reporting errors against `source_name`.
    #[must_use]
    pub const fn new(source_name: &'a str, style: FileNameStyle) -> Self {
        Self { source_name, style }
    }

    /// Runs every step in order.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::EmptySource`] when `raw` has no top-level nodes,
    /// or the first error reported by a step.
    pub fn normalize(&self, mut raw: RawTree) -> StrataResult<RawTree> {
        if raw.children().is_empty() {
            return Err(Arc::new(StrataError::EmptySource {
                source_name: self.source_name.to_owned(),
            }));
        }
        self.wrap_root(&mut raw)?;
        self.flatten_attributes(&mut raw)?;
        self.fold_keywords(&mut raw);
        self.expand_instance_shorthand(&mut raw)?;
        Ok(raw)
    }

    /// Places every top-level node under a fresh `config` node.
    ///
    /// A tree that already consists of a single `config` node (in any case)
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StructureRule::RootNotOnTop`] when a `config` node sits next
    /// to other top-level nodes.
    pub fn wrap_root(&self, tree: &mut RawTree) -> StrataResult<()> {
        if let [(name, _)] = tree.children()
            && is_keyword(name, ROOT_NODE)
        {
            return Ok(());
        }
        if let Some((name, _)) = tree
            .children()
            .iter()
            .find(|(name, _)| is_keyword(name, ROOT_NODE))
        {
            return Err(Arc::new(StrataError::structure(
                self.source_name,
                name.as_str(),
                StructureRule::RootNotOnTop,
            )));
        }
        let content = mem::take(tree);
        tracing::trace!(
            source = %self.source_name,
            nodes = content.len(),
            "wrapped top-level nodes in root node"
        );
        tree.push_child(ROOT_NODE, content);
        Ok(())
    }

    /// Splices the children of attribute marker nodes into their owners.
    ///
    /// Attributes are placed ahead of the owner's other children, in their
    /// original order, and the marker node is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKind::Attribute`] when one element defines the same
    /// attribute twice.
    pub fn flatten_attributes(&self, tree: &mut RawTree) -> StrataResult<()> {
        self.flatten_node("", tree)
    }

    fn flatten_node(&self, path: &str, node: &mut RawTree) -> StrataResult<()> {
        if node.position(ATTRIBUTES_MARKER).is_some() {
            let mut attributes = Vec::new();
            let mut others = Vec::new();
            for (name, child) in mem::take(node.children_mut()) {
                if name == ATTRIBUTES_MARKER {
                    self.check_unique_attributes(path, &child)?;
                    attributes.extend(child.children().iter().cloned());
                } else {
                    others.push((name, child));
                }
            }
            tracing::trace!(
                source = %self.source_name,
                element = %path,
                attributes = attributes.len(),
                "spliced attributes into element"
            );
            attributes.append(&mut others);
            *node.children_mut() = attributes;
        }
        for (name, child) in node.children_mut() {
            self.flatten_node(&join_path(path, name), child)?;
        }
        Ok(())
    }

    fn check_unique_attributes(&self, path: &str, marker: &RawTree) -> StrataResult<()> {
        match marker
            .children()
            .iter()
            .find(|(name, _)| marker.count(name) > 1)
        {
            Some((name, _)) => Err(Arc::new(StrataError::duplicate(
                self.source_name,
                join_path(path, name),
                DuplicateKind::Attribute,
            ))),
            None => Ok(()),
        }
    }

    /// Gives the reserved keywords their canonical lowercase spelling.
    ///
    /// The root node is renamed to `config`, a `default` node directly under
    /// it is renamed to `default`, and an `instance` node directly under an
    /// application node is renamed to `instance`. With
    /// [`FileNameStyle::CaseInsensitive`] application names are lowercased.
    pub fn fold_keywords(&self, tree: &mut RawTree) {
        let Some((root_name, config)) = tree.children_mut().first_mut() else {
            return;
        };
        rename(self.source_name, root_name, ROOT_NODE);
        for (name, child) in config.children_mut() {
            if is_keyword(name, DEFAULT_NODE) {
                rename(self.source_name, name, DEFAULT_NODE);
                continue;
            }
            for (child_name, _) in child.children_mut() {
                if is_keyword(child_name, INSTANCE_NODE) {
                    rename(self.source_name, child_name, INSTANCE_NODE);
                }
            }
            if self.style == FileNameStyle::CaseInsensitive {
                let lowercase = name.to_lowercase();
                rename(self.source_name, name, &lowercase);
            }
        }
    }

    /// Moves `app..instance` nodes to `app/instance/<instance>`.
    ///
    /// The application node is reused when present and otherwise created at
    /// the position of the shorthand node.
    ///
    /// # Errors
    ///
    /// Returns a [`StrataError::Shorthand`] error when either part of the name
    /// is empty or the application part names the `default` section, and
    /// [`DuplicateKind::Instance`] when the instance already exists.
    pub fn expand_instance_shorthand(&self, tree: &mut RawTree) -> StrataResult<()> {
        let Some((_, config)) = tree.children_mut().first_mut() else {
            return Ok(());
        };
        let mut index = 0;
        while let Some((name, _)) = config.children().get(index) {
            let Some((app, instance)) = name.split_once(INSTANCE_DELIMITER) else {
                index += 1;
                continue;
            };
            self.check_shorthand(name, app, instance)?;
            let (app_name, instance_name) = (app.to_owned(), instance.to_owned());
            let Some((element, subtree)) = config.remove_child(index) else {
                break;
            };
            if config.position(&app_name).is_none() {
                config.insert_child(index, app_name.as_str(), RawTree::new());
                index += 1;
            }
            let wrapper = config
                .child_or_insert(&app_name)
                .child_or_insert(INSTANCE_NODE);
            if wrapper.position(&instance_name).is_some() {
                return Err(Arc::new(StrataError::duplicate(
                    self.source_name,
                    element,
                    DuplicateKind::Instance,
                )));
            }
            tracing::trace!(
                source = %self.source_name,
                element = %element,
                "expanded instance shorthand"
            );
            wrapper.push_child(instance_name, subtree);
        }
        Ok(())
    }

    fn check_shorthand(&self, element: &str, app: &str, instance: &str) -> StrataResult<()> {
        let problem = if app.is_empty() || instance.is_empty() {
            ShorthandProblem::MissingPart
        } else if is_keyword(app, DEFAULT_NODE) {
            ShorthandProblem::DefaultInstance
        } else {
            return Ok(());
        };
        Err(Arc::new(StrataError::shorthand(
            self.source_name,
            element,
            problem,
        )))
    }
}

fn rename(source_name: &str, name: &mut String, canonical: &str) {
    if name != canonical {
        tracing::trace!(
            source = %source_name,
            from = %name,
            to = %canonical,
            "renamed node"
        );
        canonical.clone_into(name);
    }
}

/// Normalises `raw` on behalf of `source_name`.
///
/// # Errors
///
/// See [`TreeNormalizer::normalize`].
///
/// # Examples
///
/// ```
/// use strata_config::{FileNameStyle, OutputStyle, RawTree, normalize};
///
/// let raw = RawTree::new().with_child(
///     "app..i1",
///     RawTree::new().with_child("attr", RawTree::leaf("value")),
/// );
/// let tree = normalize(raw, "inline", FileNameStyle::CaseSensitive)?;
/// assert_eq!(
///     tree.render(OutputStyle::OneLine),
///     "<config><app><instance><i1><attr>value</attr></i1></instance></app></config>"
/// );
/// # Ok::<(), std::sync::Arc<strata_config::StrataError>>(())
/// ```
pub fn normalize(raw: RawTree, source_name: &str, style: FileNameStyle) -> StrataResult<RawTree> {
    TreeNormalizer::new(source_name, style).normalize(raw)
}

#[cfg(test)]
mod tests;
