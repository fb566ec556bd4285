//! Parse tree
//!
//! A concrete syntax tree: every production the parser enters becomes a
//! labeled node and every matched token becomes a terminal leaf, so reading
//! the leaves left to right gives back the parsed token sequence.

use super::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseTree {
    pub label: String,
    pub token: Option<Token>,
    pub children: Vec<ParseTree>,
}

/// One row of a flattened tree, used by the explorer.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatNode<'a> {
    pub depth: usize,
    pub node: &'a ParseTree,
}

impl ParseTree {
    /// Production node with no children yet.
    pub fn node(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: None,
            children: Vec::new(),
        }
    }

    /// Leaf wrapping a matched token.
    pub fn terminal(label: impl Into<String>, token: Token) -> Self {
        Self {
            label: label.into(),
            token: Some(token),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: ParseTree) {
        self.children.push(child);
    }

    /// Builder form of [`ParseTree::add_child`].
    pub fn with_child(mut self, child: ParseTree) -> Self {
        self.add_child(child);
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.token.is_some()
    }

    /// Terminal tokens in left-to-right order.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        if let Some(token) = &self.token {
            out.push(token);
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// First terminal token under this node, if any.
    pub fn first_leaf(&self) -> Option<&Token> {
        match &self.token {
            Some(token) => Some(token),
            None => self.children.iter().find_map(ParseTree::first_leaf),
        }
    }

    /// Pre-order list of every node with its depth.
    pub fn flatten(&self) -> Vec<FlatNode<'_>> {
        let mut rows = Vec::new();
        let mut stack = vec![(0usize, self)];

        while let Some((depth, node)) = stack.pop() {
            rows.push(FlatNode { depth, node });
            for child in node.children.iter().rev() {
                stack.push((depth + 1, child));
            }
        }

        rows
    }

    /// Depth-first search for the first node with the given label.
    pub fn find(&self, label: &str) -> Option<&ParseTree> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(label))
    }

    /// Child labels, in order.
    pub fn child_labels(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::{SourceLocation, TokenKind};

    fn leaf(kind: TokenKind, lexeme: &str) -> ParseTree {
        ParseTree::terminal(
            "Leaf",
            Token::new(kind, lexeme, SourceLocation::new(1, 1)),
        )
    }

    fn sample() -> ParseTree {
        ParseTree::node("AddSub")
            .with_child(leaf(TokenKind::IntegerLiteral, "1"))
            .with_child(leaf(TokenKind::Plus, "+"))
            .with_child(
                ParseTree::node("MulDivMod")
                    .with_child(leaf(TokenKind::IntegerLiteral, "2"))
                    .with_child(leaf(TokenKind::Multiply, "*"))
                    .with_child(leaf(TokenKind::IntegerLiteral, "3")),
            )
    }

    #[test]
    fn test_leaves_in_order() {
        let tree = sample();
        let lexemes: Vec<_> = tree
            .leaves()
            .iter()
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(lexemes, vec!["1", "+", "2", "*", "3"]);
    }

    #[test]
    fn test_flatten_is_preorder() {
        let tree = sample();
        let rows: Vec<_> = tree
            .flatten()
            .iter()
            .map(|row| (row.depth, row.node.label.as_str()))
            .collect();

        assert_eq!(
            rows,
            vec![
                (0, "AddSub"),
                (1, "Leaf"),
                (1, "Leaf"),
                (1, "MulDivMod"),
                (2, "Leaf"),
                (2, "Leaf"),
                (2, "Leaf"),
            ]
        );
    }

    #[test]
    fn test_find_and_first_leaf() {
        let tree = sample();
        let mul = tree.find("MulDivMod").expect("MulDivMod node");
        assert_eq!(mul.first_leaf().map(|t| t.lexeme.as_str()), Some("2"));
        assert!(tree.find("Power").is_none());
        assert!(!tree.is_terminal());
    }
}
