//! Parse trees
//!
//!     A tree is either a leaf wrapping one [Token] or a node with a label and ordered children.
//!     Trees are plain owned values: no parent links, no sharing, so a tree is acyclic and
//!     strictly nested by construction.
//!
//!     The parser only ever builds shallow trees (depth is bounded by the number of grammar
//!     rules), but every traversal here uses an explicit stack anyway.
//!
//!     Rendering lives in [formatting].

pub mod formatting;

use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tree {
    Leaf(Token),
    Node { label: String, children: Vec<Tree> },
}

impl Tree {
    pub fn leaf(token: Token) -> Self {
        Tree::Leaf(token)
    }

    pub fn node(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Tree::Node {
            label: label.into(),
            children,
        }
    }

    /// The node label, or the token label for a leaf.
    pub fn label(&self) -> &str {
        match self {
            Tree::Leaf(token) => token.label(),
            Tree::Node { label, .. } => label,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Tree::Leaf(token) => Some(token),
            Tree::Node { .. } => None,
        }
    }

    /// Direct children; empty for a leaf.
    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Leaf(_) => &[],
            Tree::Node { children, .. } => children,
        }
    }

    pub fn into_children(self) -> Vec<Tree> {
        match self {
            Tree::Leaf(_) => Vec::new(),
            Tree::Node { children, .. } => children,
        }
    }

    /// Tokens under this tree, left to right.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    pub fn into_leaves(self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            match tree {
                Tree::Leaf(token) => tokens.push(token),
                Tree::Node { children, .. } => stack.extend(children.into_iter().rev()),
            }
        }
        tokens
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// This tree's label directly over all of its leaves.
    pub fn flatten(&self) -> Tree {
        match self {
            Tree::Leaf(_) => self.clone(),
            Tree::Node { label, .. } => Tree::node(
                label.clone(),
                self.leaves().cloned().map(Tree::Leaf).collect(),
            ),
        }
    }

    /// 1 for a leaf or an empty node, otherwise one more than the tallest child.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((tree, depth)) = stack.pop() {
            height = height.max(depth);
            for child in tree.children() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    /// Nodes (not leaves) accepted by `filter`, in pre-order.
    pub fn subtrees<F>(&self, filter: F) -> Vec<&Tree>
    where
        F: Fn(&Tree) -> bool,
    {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            if let Tree::Node { children, .. } = tree {
                if filter(tree) {
                    found.push(tree);
                }
                stack.extend(children.iter().rev());
            }
        }
        found
    }

    /// Follow a path of child indices.
    pub fn get(&self, path: &[usize]) -> Option<&Tree> {
        path.iter()
            .try_fold(self, |tree, &index| tree.children().get(index))
    }

    /// Path of child indices to the `index`-th leaf.
    pub fn leaf_position(&self, index: usize) -> Option<Vec<usize>> {
        let mut remaining = index;
        let mut stack = vec![(self, Vec::new())];
        while let Some((tree, path)) = stack.pop() {
            match tree {
                Tree::Leaf(_) => {
                    if remaining == 0 {
                        return Some(path);
                    }
                    remaining -= 1;
                }
                Tree::Node { children, .. } => {
                    for (i, child) in children.iter().enumerate().rev() {
                        let mut child_path = path.clone();
                        child_path.push(i);
                        stack.push((child, child_path));
                    }
                }
            }
        }
        None
    }
}

impl From<Token> for Tree {
    fn from(token: Token) -> Self {
        Tree::Leaf(token)
    }
}

/// Pre-order iterator over the tokens of a tree.
pub struct Leaves<'a> {
    stack: Vec<&'a Tree>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(tree) = self.stack.pop() {
            match tree {
                Tree::Leaf(token) => return Some(token),
                Tree::Node { children, .. } => self.stack.extend(children.iter().rev()),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: &str, label: &str) -> Tree {
        Tree::leaf(Token::new(value, label))
    }

    /// (S (NP (D the) (N dog)) (VP (V chased) (NP (D the) (N cat))))
    fn sample() -> Tree {
        Tree::node(
            "S",
            vec![
                Tree::node("NP", vec![leaf("the", "D"), leaf("dog", "N")]),
                Tree::node(
                    "VP",
                    vec![
                        leaf("chased", "V"),
                        Tree::node("NP", vec![leaf("the", "D"), leaf("cat", "N")]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_leaves_in_order() {
        let tree = sample();
        let values: Vec<_> = tree.leaves().map(|t| t.value()).collect();
        assert_eq!(values, vec!["the", "dog", "chased", "the", "cat"]);
        assert_eq!(tree.leaf_count(), 5);
        let owned: Vec<_> = tree.into_leaves().into_iter().map(|t| t.to_string()).collect();
        assert_eq!(owned, vec!["the/D", "dog/N", "chased/V", "the/D", "cat/N"]);
    }

    #[test]
    fn test_height() {
        assert_eq!(sample().height(), 4);
        assert_eq!(leaf("x", "X").height(), 1);
        assert_eq!(Tree::node("E", vec![]).height(), 1);
        assert_eq!(Tree::node("NP", vec![leaf("a", "D")]).height(), 2);
    }

    #[test]
    fn test_flatten() {
        let flat = sample().flatten();
        assert_eq!(flat.label(), "S");
        assert_eq!(flat.children().len(), 5);
        assert!(flat.children().iter().all(Tree::is_leaf));
    }

    #[test]
    fn test_subtrees_preorder() {
        let tree = sample();
        let labels: Vec<_> = tree.subtrees(|_| true).into_iter().map(Tree::label).collect();
        assert_eq!(labels, vec!["S", "NP", "VP", "NP"]);
        let nps = tree.subtrees(|t| t.label() == "NP");
        assert_eq!(nps.len(), 2);
    }

    #[test]
    fn test_paths() {
        let tree = sample();
        assert_eq!(tree.leaf_position(0), Some(vec![0, 0]));
        assert_eq!(tree.leaf_position(2), Some(vec![1, 0]));
        assert_eq!(tree.leaf_position(4), Some(vec![1, 1, 1]));
        assert_eq!(tree.leaf_position(5), None);
        assert_eq!(tree.get(&[1, 1, 1]).and_then(Tree::token).map(Token::value), Some("cat"));
        assert_eq!(tree.get(&[]).map(Tree::label), Some("S"));
        assert!(tree.get(&[3]).is_none());
    }

    #[test]
    fn test_leaf_label_is_token_label() {
        let tree = leaf("dog", "N");
        assert_eq!(tree.label(), "N");
        assert!(tree.children().is_empty());
    }
}
