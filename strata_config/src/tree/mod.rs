//! Ordered, multi-valued tree used for every stage of configuration.
//!
//! A [`RawTree`] node carries an optional scalar payload and an ordered list
//! of `(name, node)` children. Duplicate child names are permitted, so the
//! list is a sequence rather than a map and name queries are linear.

mod render;

pub use render::OutputStyle;

use crate::keywords::PATH_DELIMITER;

/// One node of a configuration tree.
///
/// The scalar payload is empty for container nodes. Normalised trees never
/// hold both a payload and children at once, but the type does not enforce
/// that; the validator does.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawTree {
    data: String,
    children: Vec<(String, RawTree)>,
}

impl RawTree {
    /// Creates an empty node with no payload and no children.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: String::new(),
            children: Vec::new(),
        }
    }

    /// Creates a leaf node holding `value`.
    #[must_use]
    pub fn leaf(value: impl Into<String>) -> Self {
        Self {
            data: value.into(),
            children: Vec::new(),
        }
    }

    /// Returns the scalar payload; empty for containers.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.data
    }

    /// Replaces the scalar payload.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.data = value.into();
    }

    /// Returns `true` when the node carries a non-empty payload.
    #[must_use]
    pub fn has_value(&self) -> bool {
        !self.data.is_empty()
    }

    /// Returns the ordered children.
    #[must_use]
    pub fn children(&self) -> &[(String, Self)] {
        &self.children
    }

    /// Returns the ordered children for in-place rewriting.
    pub fn children_mut(&mut self) -> &mut Vec<(String, Self)> {
        &mut self.children
    }

    /// Appends a child and returns a reference to it.
    #[expect(
        clippy::indexing_slicing,
        reason = "the index addresses the element pushed on the previous line"
    )]
    pub fn push_child(&mut self, name: impl Into<String>, child: Self) -> &mut Self {
        let index = self.children.len();
        self.children.push((name.into(), child));
        &mut self.children[index].1
    }

    /// Builder-style variant of [`RawTree::push_child`].
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::RawTree;
    ///
    /// let tree = RawTree::new()
    ///     .with_child("host", RawTree::leaf("localhost"))
    ///     .with_child("port", RawTree::leaf("5432"));
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.lookup("port").map(RawTree::value), Some("5432"));
    /// ```
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, child: Self) -> Self {
        self.children.push((name.into(), child));
        self
    }

    /// Inserts a child at `index`, clamped to the number of children.
    pub fn insert_child(&mut self, index: usize, name: impl Into<String>, child: Self) {
        let at = index.min(self.children.len());
        self.children.insert(at, (name.into(), child));
    }

    /// Removes and returns the child at `index`.
    pub fn remove_child(&mut self, index: usize) -> Option<(String, Self)> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Counts the children named `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.children.iter().filter(|(key, _)| key == name).count()
    }

    /// Returns the first child named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        self.children
            .iter()
            .find_map(|(key, child)| (key == name).then_some(child))
    }

    /// Returns the first child named `name` for mutation.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.children
            .iter_mut()
            .find_map(|(key, child)| (key == name).then_some(child))
    }

    /// Returns the index of the first child named `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|(key, _)| key == name)
    }

    /// Returns `true` when the node has neither payload nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.children.is_empty()
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Resolves a dotted path, following the first child of each name.
    ///
    /// An empty path resolves to the node itself.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Self> {
        let address = self.lookup_address(path)?;
        self.node_at(&address)
    }

    /// Resolves a dotted path to the child indices that reach it.
    #[must_use]
    pub fn lookup_address(&self, path: &str) -> Option<Vec<usize>> {
        let mut address = Vec::new();
        if path.is_empty() {
            return Some(address);
        }
        let mut node = self;
        for segment in path.split(PATH_DELIMITER) {
            let index = node.position(segment)?;
            address.push(index);
            node = &node.children.get(index)?.1;
        }
        Some(address)
    }

    /// Follows a child-index address produced by [`RawTree::lookup_address`].
    #[must_use]
    pub fn node_at(&self, address: &[usize]) -> Option<&Self> {
        address
            .iter()
            .try_fold(self, |node, &index| node.children.get(index).map(|(_, child)| child))
    }

    /// Returns the name and node at the end of a non-empty address.
    pub(crate) fn entry_at(&self, address: &[usize]) -> Option<(&str, &Self)> {
        let (last, parent) = address.split_last()?;
        let (name, node) = self.node_at(parent)?.children.get(*last)?;
        Some((name, node))
    }

    /// Adds a leaf at a dotted path.
    ///
    /// Intermediate segments reuse the first existing child of that name or
    /// create one; the final segment is always appended, so repeated calls
    /// with the same path produce repeated siblings.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::RawTree;
    ///
    /// let mut tree = RawTree::new();
    /// tree.add_path("db.host", "a");
    /// tree.add_path("db.host", "b");
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.lookup("db").map(|db| db.count("host")), Some(2));
    /// ```
    pub fn add_path(&mut self, path: &str, value: impl Into<String>) -> &mut Self {
        let (parents, last) = match path.rsplit_once(PATH_DELIMITER) {
            Some((parents, last)) => (Some(parents), last),
            None => (None, path),
        };
        let mut node = self;
        for segment in parents.into_iter().flat_map(|p| p.split(PATH_DELIMITER)) {
            node = node.child_or_insert(segment);
        }
        node.push_child(last, Self::leaf(value))
    }

    /// Returns the first child named `name`, appending an empty one if absent.
    #[expect(
        clippy::indexing_slicing,
        reason = "the index comes from a successful search or a fresh push"
    )]
    pub(crate) fn child_or_insert(&mut self, name: &str) -> &mut Self {
        let index = self.position(name).unwrap_or_else(|| {
            self.children.push((name.to_owned(), Self::new()));
            self.children.len() - 1
        });
        &mut self.children[index].1
    }
}
