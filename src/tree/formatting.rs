//! Tree rendering
//!
//! Bracketed, indentation based output. A node goes on one line when it fits in the margin
//! (its indentation included); otherwise its label opens a line and every child gets its own
//! line, two spaces deeper. Leaves render as `value/label`.
//!
//!     (ROOT
//!       (NP The/DT cat/NN)
//!       (VP
//!         (V sat/VBD)
//!         (PP (P on/IN) (NP the/DT mat/NN))
//!         (NP the/DT dog/NN))
//!       (VP (V chewed/VBD)))
//!
//! Output depends only on the tree, so rendering the same tree twice is byte-identical.

use super::Tree;
use std::fmt;

pub const DEFAULT_MARGIN: usize = 70;

const INDENT_STEP: usize = 2;

impl Tree {
    /// Render with the default 70 column margin.
    pub fn pformat(&self) -> String {
        self.pformat_with(DEFAULT_MARGIN, 0)
    }

    /// Render with an explicit margin, starting at `indent` columns.
    pub fn pformat_with(&self, margin: usize, indent: usize) -> String {
        let (label, children) = match self {
            Tree::Leaf(token) => return token.to_string(),
            Tree::Node { label, children } => (label, children),
        };

        let flat = self.pformat_flat();
        if flat.chars().count() + indent < margin {
            return flat;
        }

        let child_indent = indent + INDENT_STEP;
        let mut out = format!("({label}");
        for child in children {
            out.push('\n');
            out.push_str(&" ".repeat(child_indent));
            out.push_str(&child.pformat_with(margin, child_indent));
        }
        out.push(')');
        out
    }

    /// Single line rendering, whatever its length.
    pub fn pformat_flat(&self) -> String {
        let mut out = String::new();
        write_flat(self, &mut out);
        out
    }
}

fn write_flat(tree: &Tree, out: &mut String) {
    match tree {
        Tree::Leaf(token) => out.push_str(&token.to_string()),
        Tree::Node { label, children } => {
            out.push('(');
            out.push_str(label);
            for child in children {
                out.push(' ');
                write_flat(child, out);
            }
            out.push(')');
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pformat())
    }
}
