//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing
//! for binary operators and recursive descent for other expression forms.
//!
//! # Supported Expressions
//!
//! - Constants: integers, floats, characters, `true`/`false`
//! - Identifiers, calls `f(a, b)` and indexing `a[3]`
//! - Parenthesized expressions
//! - Binary operators: `||`, `&&`, `==`, `!=`, `<`, `<=`, `>`, `>=`, `+`, `-`, `*`, `/`, `%`, `^`
//! - Unary operators: `+`, `-`, `!`
//! - Assignment: `x = ...`, `a[2] = ...` (right-associative)
//!
//! # Precedence
//!
//! Lowest to highest: assignment, `||`, `&&`, equality, relational,
//! additive, multiplicative, `^` (right-associative), unary. All binary
//! levels share one climbing loop driven by [`binary_op`].
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::{ParseResult, Parser};
use crate::parser::token::TokenKind;
use crate::parser::tree::ParseTree;

/// Binding information for a binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BinaryOp {
    pub precedence: u8,
    pub right_assoc: bool,
    pub label: &'static str,
}

const LOWEST_PRECEDENCE: u8 = 1;

/// Operator table. `None` means the token does not continue an expression.
pub(crate) fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let (precedence, right_assoc, label) = match kind {
        TokenKind::Or => (1, false, "LogicalOr"),
        TokenKind::And => (2, false, "LogicalAnd"),
        TokenKind::Equal | TokenKind::NotEqual => (3, false, "Equality"),
        TokenKind::Less
        | TokenKind::LessEqual
        | TokenKind::Greater
        | TokenKind::GreaterEqual => (4, false, "Relational"),
        TokenKind::Plus | TokenKind::Minus => (5, false, "AddSub"),
        TokenKind::Multiply | TokenKind::Divide | TokenKind::Modulo => {
            (6, false, "MulDivMod")
        }
        TokenKind::Exponent => (7, true, "Power"),
        _ => return None,
    };

    Some(BinaryOp {
        precedence,
        right_assoc,
        label,
    })
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_exp(&mut self) -> ParseResult<ParseTree> {
        self.nested(|p| {
            if p.at_assignment() {
                p.parse_assignment()
            } else {
                p.parse_binary(LOWEST_PRECEDENCE)
            }
        })
    }

    /// Peek-only check for `name =` or `name[...] =`.
    fn at_assignment(&self) -> bool {
        if !self.check(TokenKind::Identifier) {
            return false;
        }

        let mut n = 1;
        if self.peek_kind_ahead(n) == TokenKind::LeftBracket {
            loop {
                n += 1;
                match self.peek_kind_ahead(n) {
                    TokenKind::RightBracket => {
                        n += 1;
                        break;
                    }
                    TokenKind::Semicolon | TokenKind::Eof => return false,
                    _ => {}
                }
            }
        }

        self.peek_kind_ahead(n) == TokenKind::Assign
    }

    /// Parse assignment: name ["[" const "]"] = exp
    fn parse_assignment(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Assignment");

        node.add_child(self.parse_identifier()?);

        if self.check(TokenKind::LeftBracket) {
            node.add_child(
                self.match_and_create_node(TokenKind::LeftBracket, "Left_Bracket")?,
            );
            node.add_child(self.parse_const()?);
            node.add_child(
                self.match_and_create_node(TokenKind::RightBracket, "Right_Bracket")?,
            );
        }

        node.add_child(self.match_and_create_node(TokenKind::Assign, "Assign")?);
        node.add_child(self.parse_exp()?);

        Ok(node)
    }

    /// Precedence climbing over the binary operator table
    fn parse_binary(&mut self, min_precedence: u8) -> ParseResult<ParseTree> {
        let mut left = self.parse_unary()?;

        while let Some(op) = binary_op(self.peek_kind()) {
            if op.precedence < min_precedence {
                break;
            }

            let operator = self.match_and_create_node(self.peek_kind(), "Operator")?;
            let next_min = if op.right_assoc {
                op.precedence
            } else {
                op.precedence + 1
            };
            let right = self.nested(|p| p.parse_binary(next_min))?;

            left = ParseTree::node(op.label)
                .with_child(left)
                .with_child(operator)
                .with_child(right);
        }

        Ok(left)
    }

    /// Parse unary: (+ | - | !) unary | factor
    fn parse_unary(&mut self) -> ParseResult<ParseTree> {
        let kind = self.peek_kind();
        if matches!(kind, TokenKind::Plus | TokenKind::Minus | TokenKind::Not) {
            let operator = self.match_and_create_node(kind, "Unary_Operator")?;
            let operand = self.nested(Self::parse_unary)?;
            return Ok(ParseTree::node("UnaryOp")
                .with_child(operator)
                .with_child(operand));
        }

        self.parse_factor()
    }

    /// Parse factor: const | name | name(args) | name[const] | (exp)
    fn parse_factor(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Factor");
        let kind = self.peek_kind();

        match kind {
            _ if kind.is_constant() => node.add_child(self.parse_const()?),

            TokenKind::Identifier => {
                node.add_child(self.parse_identifier()?);

                if self.check(TokenKind::LeftParen) {
                    node.add_child(
                        self.match_and_create_node(TokenKind::LeftParen, "Left_Parenthesis")?,
                    );
                    if !self.check(TokenKind::RightParen) {
                        node.add_child(self.parse_argument_list()?);
                    }
                    node.add_child(
                        self.match_and_create_node(TokenKind::RightParen, "Right_Parenthesis")?,
                    );
                } else if self.check(TokenKind::LeftBracket) {
                    node.add_child(
                        self.match_and_create_node(TokenKind::LeftBracket, "Left_Bracket")?,
                    );
                    node.add_child(self.parse_const()?);
                    node.add_child(
                        self.match_and_create_node(TokenKind::RightBracket, "Right_Bracket")?,
                    );
                }
            }

            TokenKind::LeftParen => {
                node.add_child(
                    self.match_and_create_node(TokenKind::LeftParen, "Left_Parenthesis")?,
                );
                node.add_child(self.parse_exp()?);
                node.add_child(
                    self.match_and_create_node(TokenKind::RightParen, "Right_Parenthesis")?,
                );
            }

            _ => return Err(self.report_error("expected an expression", None)),
        }

        Ok(node)
    }

    /// Parse constant: int | float | char | true | false
    pub(crate) fn parse_const(&mut self) -> ParseResult<ParseTree> {
        let kind = self.peek_kind();
        let label = match kind {
            TokenKind::IntegerLiteral => "Int",
            TokenKind::FloatLiteral => "Float",
            TokenKind::CharLiteral => "Char",
            TokenKind::True | TokenKind::False => "Bool",
            _ => return Err(self.report_error("expected a constant", None)),
        };

        let literal = self.match_and_create_node(kind, "Literal")?;
        let constant = ParseTree::node(label).with_child(literal);
        Ok(ParseTree::node("Const").with_child(constant))
    }

    /// Parse argument list: exp {, exp}, each wrapped in an Exp node
    pub(crate) fn parse_argument_list(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Argument_List");

        let first = self.parse_exp()?;
        node.add_child(ParseTree::node("Exp").with_child(first));

        while self.check(TokenKind::Comma) {
            node.add_child(self.match_and_create_node(TokenKind::Comma, "Comma")?);
            let arg = self.parse_exp()?;
            node.add_child(ParseTree::node("Exp").with_child(arg));
        }

        Ok(node)
    }
}
