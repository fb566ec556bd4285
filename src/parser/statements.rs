//! Statement parsing implementation
//!
//! This module handles parsing of blocks and all statement types:
//!
//! - Local declarations inside blocks: `int x = 42;`, `char s[8];`
//! - Control flow: `if`/`else`, `while`, `for`
//! - `return`
//! - I/O: `scanf("%d", &x);`, `printf("%d\n", x);`
//! - Compound statements: `{ ... }`, empty statement `;`
//! - Expression statements: calls, assignments
//!
//! # Grammar
//!
//! ```text
//! block     ::= "{" {statement | variable_declaration | array_declaration} "}"
//! statement ::= return_stmt | if_stmt | while_stmt | for_stmt
//!             | input_stmt | output_stmt | ";" | block | exp ";"
//! ```
//!
//! A block is a recovery point: a broken item is skipped and parsing resumes
//! with the next one.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::{ParseResult, Parser};
use crate::parser::token::TokenKind;
use crate::parser::tree::ParseTree;

impl Parser {
    /// Parse a braced block
    pub(crate) fn parse_block(&mut self) -> ParseResult<ParseTree> {
        self.nested(Self::parse_block_body)
    }

    fn parse_block_body(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Block");
        node.add_child(
            self.match_and_create_node(TokenKind::LeftBrace, "Left_Brace")?,
        );

        while !self.check(TokenKind::RightBrace) && !self.stream.is_at_end() {
            let start = self.stream.position();
            match self.parse_block_item() {
                Ok(item) => node.add_child(item),
                Err(_) => self.recover(start, false),
            }
        }

        node.add_child(
            self.match_and_create_node(TokenKind::RightBrace, "Right_Brace")?,
        );
        Ok(node)
    }

    fn parse_block_item(&mut self) -> ParseResult<ParseTree> {
        if self.is_type_keyword() {
            self.parse_local_declaration()
        } else {
            self.parse_statement()
        }
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> ParseResult<ParseTree> {
        let inner = match self.peek_kind() {
            TokenKind::Return => self.parse_return_statement()?,
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::While => self.parse_while_statement()?,
            TokenKind::For => self.parse_for_statement()?,
            TokenKind::Scanf => self.parse_input_statement()?,
            TokenKind::Printf => self.parse_output_statement()?,
            TokenKind::Semicolon => self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
            TokenKind::LeftBrace => self.parse_block()?,
            _ => self.parse_expression_statement()?,
        };

        Ok(ParseTree::node("Statement").with_child(inner))
    }

    /// Parse return statement: return exp ;
    fn parse_return_statement(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Return_Statement");

        node.add_child(self.match_and_create_node(TokenKind::Return, "Return")?);
        node.add_child(self.parse_exp()?);
        node.add_child(
            self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
        );

        Ok(node)
    }

    /// Parse expression statement: exp ;
    fn parse_expression_statement(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Expression_Statement");

        let exp = self.parse_exp()?;
        node.add_child(ParseTree::node("Exp").with_child(exp));
        node.add_child(
            self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
        );

        Ok(node)
    }

    /// Parse if statement: if (cond) block {else (block | if_stmt)}
    pub(crate) fn parse_if_statement(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("If_Statement");

        node.add_child(self.match_and_create_node(TokenKind::If, "If")?);
        node.add_child(
            self.match_and_create_node(TokenKind::LeftParen, "Left_Parenthesis")?,
        );
        node.add_child(self.parse_exp()?);
        node.add_child(
            self.match_and_create_node(TokenKind::RightParen, "Right_Parenthesis")?,
        );
        node.add_child(self.parse_block()?);

        while self.check(TokenKind::Else) {
            node.add_child(self.parse_else_clause()?);
        }

        Ok(node)
    }

    fn parse_else_clause(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Else_Clause");
        node.add_child(self.match_and_create_node(TokenKind::Else, "Else")?);

        if self.check(TokenKind::If) {
            node.add_child(self.parse_if_statement()?);
        } else {
            node.add_child(self.parse_block()?);
        }

        Ok(node)
    }

    /// Parse while loop: while (cond) block
    fn parse_while_statement(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("While_Statement");

        node.add_child(self.match_and_create_node(TokenKind::While, "While")?);
        node.add_child(
            self.match_and_create_node(TokenKind::LeftParen, "Left_Parenthesis")?,
        );
        node.add_child(self.parse_exp()?);
        node.add_child(
            self.match_and_create_node(TokenKind::RightParen, "Right_Parenthesis")?,
        );
        node.add_child(self.parse_block()?);

        Ok(node)
    }

    /// Parse for loop: for (init; cond; step) block
    fn parse_for_statement(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("For_Statement");

        node.add_child(self.match_and_create_node(TokenKind::For, "For")?);
        node.add_child(
            self.match_and_create_node(TokenKind::LeftParen, "Left_Parenthesis")?,
        );

        // Init: a declaration carries its own semicolon
        if self.is_type_keyword() {
            node.add_child(self.parse_local_declaration()?);
        } else {
            node.add_child(self.parse_exp()?);
            node.add_child(
                self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
            );
        }

        node.add_child(self.parse_exp()?);
        node.add_child(
            self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
        );
        node.add_child(self.parse_exp()?);

        node.add_child(
            self.match_and_create_node(TokenKind::RightParen, "Right_Parenthesis")?,
        );
        node.add_child(self.parse_block()?);

        Ok(node)
    }

    /// Parse input statement: scanf("fmt", &a, &b);
    fn parse_input_statement(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Input_Statement");

        node.add_child(self.match_and_create_node(TokenKind::Scanf, "Scanf")?);
        node.add_child(
            self.match_and_create_node(TokenKind::LeftParen, "Left_Parenthesis")?,
        );
        node.add_child(self.match_and_create_node(TokenKind::String, "String")?);

        while self.check(TokenKind::Comma) {
            node.add_child(self.match_and_create_node(TokenKind::Comma, "Comma")?);
            node.add_child(
                self.match_and_create_node(TokenKind::Ampersand, "Ampersand")?,
            );
            node.add_child(self.parse_identifier()?);
        }

        node.add_child(
            self.match_and_create_node(TokenKind::RightParen, "Right_Parenthesis")?,
        );
        node.add_child(
            self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
        );

        Ok(node)
    }

    /// Parse output statement: printf("fmt", exp, ...); or printf(name);
    fn parse_output_statement(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Output_Statement");

        node.add_child(self.match_and_create_node(TokenKind::Printf, "Printf")?);
        node.add_child(
            self.match_and_create_node(TokenKind::LeftParen, "Left_Parenthesis")?,
        );

        match self.peek_kind() {
            TokenKind::String => {
                node.add_child(self.match_and_create_node(TokenKind::String, "String")?);
                while self.check(TokenKind::Comma) {
                    node.add_child(self.match_and_create_node(TokenKind::Comma, "Comma")?);
                    node.add_child(self.parse_exp()?);
                }
            }
            TokenKind::Identifier => node.add_child(self.parse_identifier()?),
            _ => {
                return Err(self.report_error(
                    "expected a format string or identifier in printf",
                    None,
                ));
            }
        }

        node.add_child(
            self.match_and_create_node(TokenKind::RightParen, "Right_Parenthesis")?,
        );
        node.add_child(
            self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
        );

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::Parser;
    use crate::parser::tree::ParseTree;

    /// Parse `int main() { <body> }` and return the block's items.
    fn body(source: &str) -> Vec<ParseTree> {
        let program = format!("int main() {{ {source} }}");
        let mut parser = Parser::from_source(&program);
        let tree = parser.parse_program().expect("valid program");
        let block = tree.find("Block").expect("function body");
        block.children[1..block.children.len() - 1].to_vec()
    }

    fn statement(source: &str) -> ParseTree {
        let mut items = body(source);
        assert_eq!(items.len(), 1);
        let stmt = items.remove(0);
        assert_eq!(stmt.label, "Statement");
        stmt.children[0].clone()
    }

    #[test]
    fn test_if_else_chain() {
        let stmt =
            statement("if (x > 0) { y = 1; } else if (x < 0) { y = 2; } else { y = 0; }");
        assert_eq!(stmt.label, "If_Statement");
        assert_eq!(
            stmt.child_labels(),
            vec![
                "If",
                "Left_Parenthesis",
                "Relational",
                "Right_Parenthesis",
                "Block",
                "Else_Clause",
            ]
        );

        let nested = &stmt.children[5].children[1];
        assert_eq!(nested.label, "If_Statement");
        assert_eq!(
            nested.children.last().map(|c| c.label.as_str()),
            Some("Else_Clause")
        );
    }

    #[test]
    fn test_while() {
        let stmt = statement("while (i < 10) { i = i + 1; }");
        assert_eq!(stmt.label, "While_Statement");
        assert_eq!(stmt.children.len(), 5);
    }

    #[test]
    fn test_for_with_declaration_init() {
        let stmt = statement("for (int i = 0; i < n; i = i + 1) { }");
        assert_eq!(
            stmt.child_labels(),
            vec![
                "For",
                "Left_Parenthesis",
                "Variable_Declaration",
                "Relational",
                "Semicolon",
                "Assignment",
                "Right_Parenthesis",
                "Block",
            ]
        );
    }

    #[test]
    fn test_for_with_expression_init() {
        let stmt = statement("for (i = 0; i < n; i = i + 1) { }");
        assert_eq!(stmt.children[2].label, "Assignment");
        assert_eq!(stmt.children[3].label, "Semicolon");
    }

    #[test]
    fn test_scanf() {
        let stmt = statement("scanf(\"%d %d\", &a, &b);");
        assert_eq!(stmt.label, "Input_Statement");
        assert_eq!(
            stmt.child_labels(),
            vec![
                "Scanf",
                "Left_Parenthesis",
                "String",
                "Comma",
                "Ampersand",
                "Identifier",
                "Comma",
                "Ampersand",
                "Identifier",
                "Right_Parenthesis",
                "Semicolon",
            ]
        );
    }

    #[test]
    fn test_printf_forms() {
        let stmt = statement("printf(\"%d\\n\", a + 1);");
        assert_eq!(stmt.label, "Output_Statement");
        assert_eq!(stmt.children[4].label, "AddSub");

        let stmt = statement("printf(name);");
        assert_eq!(stmt.children[2].label, "Identifier");
    }

    #[test]
    fn test_return_and_empty_statements() {
        let items = body("return x * 2; ; { }");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].children[0].label, "Return_Statement");
        assert_eq!(items[1].children[0].label, "Semicolon");
        assert_eq!(items[2].children[0].label, "Block");
    }

    #[test]
    fn test_local_declarations_are_block_items() {
        let items = body("int x = 1; char buf[16]; x = 2;");
        let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Variable_Declaration", "Array_Declaration", "Statement"]
        );
    }

    #[test]
    fn test_expression_statement_wraps_exp() {
        let stmt = statement("f(1, 2);");
        assert_eq!(stmt.label, "Expression_Statement");
        assert_eq!(stmt.child_labels(), vec!["Exp", "Semicolon"]);
        assert_eq!(stmt.children[0].children[0].label, "Factor");
    }

    #[test]
    fn test_block_recovers_and_continues() {
        let mut parser = Parser::from_source("int main() { x = ; y = 2; printf(3); z = 4; }");
        let failure = parser.parse_program().expect_err("two broken statements");

        assert_eq!(failure.errors.len(), 2);
        let block = failure.tree.find("Block").expect("body survives");
        // '{', y = 2;, z = 4;, '}'
        assert_eq!(block.children.len(), 4);
    }

    #[test]
    fn test_missing_closing_brace() {
        let mut parser = Parser::from_source("int main() { return 0;");
        let failure = parser.parse_program().expect_err("unterminated block");
        assert_eq!(failure.errors.len(), 1);
        assert_eq!(
            failure.errors[0].found.kind,
            crate::parser::token::TokenKind::Eof
        );
    }
}
