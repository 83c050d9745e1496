//! Recursive folding of one tree into another.
//!
//! Merging is order-sensitive: scalar leaves from the later tree win, new
//! subtrees are appended, and repeated siblings that cannot be paired up
//! unambiguously are rejected instead of being guessed at.

use std::sync::Arc;

use crate::keywords::INSTANCE_NODE;
use crate::{RawTree, StrataError, StrataResult};

/// Folds trees on behalf of one config and one source, for diagnostics.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MergeProcessor<'a> {
    config_name: &'a str,
    source_name: &'a str,
}

impl<'a> MergeProcessor<'a> {
    pub(crate) const fn new(config_name: &'a str, source_name: &'a str) -> Self {
        Self {
            config_name,
            source_name,
        }
    }

    /// Folds `from` into `to`.
    ///
    /// `to` may be partially updated when an error is returned; callers that
    /// need atomicity merge into a copy.
    pub(crate) fn merge(&self, to: &mut RawTree, from: &RawTree) -> StrataResult<()> {
        let mut appended = Vec::new();
        for (name, incoming) in from.children() {
            if name == INSTANCE_NODE {
                continue;
            }
            self.check_unambiguous(name, from.count(name), to.count(name))?;
            match to.find_mut(name) {
                None => {
                    tracing::trace!(node = %name, source = %self.source_name, "append");
                    appended.push((name.clone(), incoming.clone()));
                }
                Some(existing) if incoming.children().is_empty() => {
                    tracing::trace!(node = %name, source = %self.source_name, "overwrite");
                    existing.clone_from(incoming);
                }
                Some(existing) => {
                    tracing::trace!(node = %name, source = %self.source_name, "recurse");
                    self.merge(existing, incoming)?;
                }
            }
        }
        to.children_mut().append(&mut appended);
        Ok(())
    }

    fn check_unambiguous(&self, name: &str, from_count: usize, to_count: usize) -> StrataResult<()> {
        if (from_count > 0 && to_count > 1) || (to_count > 0 && from_count > 1) {
            return Err(Arc::new(StrataError::AmbiguousMerge {
                node: name.to_owned(),
                source_name: self.source_name.to_owned(),
                config_name: self.config_name.to_owned(),
            }));
        }
        Ok(())
    }
}

/// Folds `source` into `target`.
///
/// For every child of `source` other than `instance`:
///
/// - a name absent from `target` is appended with its whole subtree;
/// - a leaf replaces the matching `target` child;
/// - a container is merged recursively into the matching `target` child.
///
/// # Errors
///
/// Returns [`StrataError::AmbiguousMerge`] when a name repeats on one side
/// and is present on the other. `target` is left unchanged in that case.
///
/// # Examples
///
/// ```
/// use strata_config::{OutputStyle, RawTree, merge_tree};
///
/// let mut target = RawTree::new()
///     .with_child("port", RawTree::leaf("80"))
///     .with_child("host", RawTree::leaf("a"));
/// let source = RawTree::new()
///     .with_child("port", RawTree::leaf("8080"))
///     .with_child("tls", RawTree::leaf("on"));
/// merge_tree(&mut target, &source, "app", "override.xml")?;
/// assert_eq!(
///     target.render(OutputStyle::OneLine),
///     "<port>8080</port><host>a</host><tls>on</tls>"
/// );
/// # Ok::<(), std::sync::Arc<strata_config::StrataError>>(())
/// ```
pub fn merge_tree(
    target: &mut RawTree,
    source: &RawTree,
    config_name: &str,
    source_name: &str,
) -> StrataResult<()> {
    let mut working = target.clone();
    MergeProcessor::new(config_name, source_name).merge(&mut working, source)?;
    *target = working;
    Ok(())
}
