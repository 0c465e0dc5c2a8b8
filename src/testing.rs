//! Fluent assertion API for parse trees
//!
//!     assert_tree(&tree)
//!         .label("ROOT")
//!         .child_count(2)
//!         .child(0, |np| {
//!             np.label("NP").leaves(&["the/DT", "cat/NN"]);
//!         })
//!         .child(1, |leaf| {
//!             leaf.leaf("sat", "VBD");
//!         });
//!
//! Failures panic with the path of the offending subtree, e.g. `root[1][0]: Expected label NP`.

use crate::tree::Tree;

/// Create an assertion builder for a tree
pub fn assert_tree(tree: &Tree) -> TreeAssertion<'_> {
    TreeAssertion {
        tree,
        context: "root".to_string(),
    }
}

pub struct TreeAssertion<'a> {
    tree: &'a Tree,
    context: String,
}

impl<'a> TreeAssertion<'a> {
    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.label(),
            expected,
            "{}: Expected label {}, found {}",
            self.context,
            expected,
            self.tree.label()
        );
        self
    }

    /// Assert this is a node (not a leaf)
    pub fn is_node(self) -> Self {
        assert!(
            !self.tree.is_leaf(),
            "{}: Expected a node, found leaf {}",
            self.context,
            self.tree
        );
        self
    }

    /// Assert this is a leaf holding `value/label`
    pub fn leaf(self, value: &str, label: &str) -> Self {
        match self.tree.token() {
            Some(token) => assert!(
                token.value() == value && token.label() == label,
                "{}: Expected leaf {}/{}, found {}",
                self.context,
                value,
                label,
                token
            ),
            None => panic!(
                "{}: Expected leaf {}/{}, found node {}",
                self.context,
                value,
                label,
                self.tree.pformat_flat()
            ),
        }
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.tree.children().len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: {}",
            self.context,
            expected,
            actual,
            self.tree.pformat_flat()
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        let children = self.tree.children();
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(TreeAssertion {
            tree: &children[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Labels of the direct children, in order
    pub fn child_labels(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.tree.children().iter().map(Tree::label).collect();
        assert_eq!(
            actual, expected,
            "{}: Unexpected child labels",
            self.context
        );
        self
    }

    /// Every leaf under this tree, rendered `value/label`, in order
    pub fn leaves(self, expected: &[&str]) -> Self {
        let actual: Vec<String> = self.tree.leaves().map(ToString::to_string).collect();
        assert_eq!(actual, expected, "{}: Unexpected leaves", self.context);
        self
    }

    /// Assert the pretty printed form
    pub fn renders(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.pformat(),
            expected,
            "{}: Unexpected rendering",
            self.context
        );
        self
    }
}
