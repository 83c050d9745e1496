//! Markup rendering of trees.

use std::fmt::{self, Write};

use quick_xml::escape::escape;

use super::RawTree;

const INDENT: &str = "  ";

/// Layout used when rendering a tree as markup.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputStyle {
    /// Two-space indentation with one element line per line.
    #[default]
    Pretty,
    /// The whole document on a single line.
    OneLine,
}

impl RawTree {
    /// Renders the children of this node as a sequence of elements.
    ///
    /// No document prolog is emitted. Scalar payloads are escaped.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::{OutputStyle, RawTree};
    ///
    /// let tree = RawTree::new().with_child(
    ///     "config",
    ///     RawTree::new().with_child("app", RawTree::new().with_child("a", RawTree::leaf("1"))),
    /// );
    /// assert_eq!(
    ///     tree.render(OutputStyle::OneLine),
    ///     "<config><app><a>1</a></app></config>"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self, style: OutputStyle) -> String {
        Rendered { tree: self, style }.to_string()
    }

    /// Streams the children of this node as elements at indentation zero.
    pub(crate) fn write_children<W: Write>(&self, out: &mut W, style: OutputStyle) -> fmt::Result {
        for (name, child) in &self.children {
            write_element(out, name, child, 0, style)?;
        }
        Ok(())
    }
}

struct Rendered<'a> {
    tree: &'a RawTree,
    style: OutputStyle,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.write_children(f, self.style)
    }
}

fn write_element<W: Write>(
    out: &mut W,
    name: &str,
    node: &RawTree,
    depth: usize,
    style: OutputStyle,
) -> fmt::Result {
    write_indent(out, depth, style)?;
    if node.children.is_empty() {
        if node.data.is_empty() {
            write!(out, "<{name}/>")?;
        } else {
            write!(out, "<{name}>{}</{name}>", escape(node.data.as_str()))?;
        }
        return write_newline(out, style);
    }
    write!(out, "<{name}>{}", escape(node.data.as_str()))?;
    write_newline(out, style)?;
    for (child_name, child) in &node.children {
        write_element(out, child_name, child, depth + 1, style)?;
    }
    write_indent(out, depth, style)?;
    write!(out, "</{name}>")?;
    write_newline(out, style)
}

fn write_indent<W: Write>(out: &mut W, depth: usize, style: OutputStyle) -> fmt::Result {
    if style == OutputStyle::Pretty {
        for _ in 0..depth {
            out.write_str(INDENT)?;
        }
    }
    Ok(())
}

fn write_newline<W: Write>(out: &mut W, style: OutputStyle) -> fmt::Result {
    match style {
        OutputStyle::Pretty => out.write_char('\n'),
        OutputStyle::OneLine => Ok(()),
    }
}
