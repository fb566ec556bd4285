//! Declaration parsing implementation
//!
//! This module handles parsing of declarations in core programs:
//!
//! - Variable declarations: `int x = 1, y;`
//! - Array declarations: `int a[3] = {1, 2, 3};`
//! - Function declarations and prototypes: `int f(int a) { ... }`, `int f(void);`
//! - Data types, identifiers and parameter lists
//!
//! # Grammar
//!
//! ```text
//! declaration          ::= variable_declaration | array_declaration | function_declaration
//! variable_declaration ::= type identifier ["=" exp] {"," identifier ["=" exp]} ";"
//! array_declaration    ::= type identifier "[" [const] "]" ["=" "{" [argument_list] "}"] ";"
//! function_declaration ::= type identifier "(" parameter_list ")" (block | ";")
//! parameter_list       ::= "void" | [type identifier {"," type identifier}]
//! type                 ::= "int" | "float" | "char" | "bool"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::{ParseResult, Parser};
use crate::parser::token::TokenKind;
use crate::parser::tree::ParseTree;

impl Parser {
    /// Parse a top-level declaration
    pub(crate) fn parse_declaration(&mut self) -> ParseResult<ParseTree> {
        if !self.is_type_keyword() {
            return Err(self.report_error(
                "expected a declaration starting with int, float, char or bool",
                None,
            ));
        }

        // Type keyword, identifier, then '(' or '[' decides the shape
        let decl = if self.peek_kind_ahead(1) == TokenKind::Identifier {
            match self.peek_kind_ahead(2) {
                TokenKind::LeftParen => self.parse_function_declaration()?,
                TokenKind::LeftBracket => self.parse_array_declaration()?,
                _ => self.parse_variable_declaration()?,
            }
        } else {
            self.parse_variable_declaration()?
        };

        Ok(ParseTree::node("Declaration").with_child(decl))
    }

    /// Parse a declaration inside a block or a `for` header (no functions)
    pub(crate) fn parse_local_declaration(&mut self) -> ParseResult<ParseTree> {
        if self.peek_kind_ahead(2) == TokenKind::LeftBracket {
            self.parse_array_declaration()
        } else {
            self.parse_variable_declaration()
        }
    }

    /// Parse variable declaration: type name [= exp] {, name [= exp]} ;
    pub(crate) fn parse_variable_declaration(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Variable_Declaration");

        node.add_child(self.parse_data_type()?);
        node.add_child(self.parse_identifier()?);
        self.parse_initializer(&mut node)?;

        while self.check(TokenKind::Comma) {
            node.add_child(self.match_and_create_node(TokenKind::Comma, "Comma")?);
            node.add_child(self.parse_identifier()?);
            self.parse_initializer(&mut node)?;
        }

        node.add_child(
            self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
        );
        Ok(node)
    }

    fn parse_initializer(&mut self, node: &mut ParseTree) -> ParseResult<()> {
        if self.check(TokenKind::Assign) {
            node.add_child(self.match_and_create_node(TokenKind::Assign, "Assign")?);
            node.add_child(self.parse_exp()?);
        }
        Ok(())
    }

    /// Parse array declaration: type name [ [size] ] [= { args }] ;
    pub(crate) fn parse_array_declaration(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Array_Declaration");

        node.add_child(self.parse_data_type()?);
        node.add_child(self.parse_identifier()?);
        node.add_child(
            self.match_and_create_node(TokenKind::LeftBracket, "Left_Bracket")?,
        );

        if self.peek_kind().is_constant() {
            node.add_child(self.parse_const()?);
        }

        node.add_child(
            self.match_and_create_node(TokenKind::RightBracket, "Right_Bracket")?,
        );

        if self.check(TokenKind::Assign) {
            node.add_child(self.match_and_create_node(TokenKind::Assign, "Assign")?);
            node.add_child(
                self.match_and_create_node(TokenKind::LeftBrace, "Left_Brace")?,
            );
            if !self.check(TokenKind::RightBrace) {
                node.add_child(self.parse_argument_list()?);
            }
            node.add_child(
                self.match_and_create_node(TokenKind::RightBrace, "Right_Brace")?,
            );
        }

        node.add_child(
            self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
        );
        Ok(node)
    }

    /// Parse function declaration: type name(params) { body } or prototype
    pub(crate) fn parse_function_declaration(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Function_Declaration");

        node.add_child(self.parse_data_type()?);
        node.add_child(self.parse_identifier()?);
        node.add_child(
            self.match_and_create_node(TokenKind::LeftParen, "Left_Parenthesis")?,
        );
        node.add_child(self.parse_parameter_list()?);
        node.add_child(
            self.match_and_create_node(TokenKind::RightParen, "Right_Parenthesis")?,
        );

        if self.check(TokenKind::Semicolon) {
            // Forward declaration
            node.add_child(
                self.match_and_create_node(TokenKind::Semicolon, "Semicolon")?,
            );
        } else {
            node.add_child(self.parse_block()?);
        }

        Ok(node)
    }

    /// Parse parameter list: void | type name {, type name} | nothing
    pub(crate) fn parse_parameter_list(&mut self) -> ParseResult<ParseTree> {
        let mut node = ParseTree::node("Parameter_List");

        if self.check(TokenKind::Void) {
            node.add_child(self.match_and_create_node(TokenKind::Void, "Void")?);
            return Ok(node);
        }

        if self.check(TokenKind::RightParen) {
            return Ok(node);
        }

        node.add_child(self.parse_data_type()?);
        node.add_child(self.parse_identifier()?);

        while self.check(TokenKind::Comma) {
            node.add_child(self.match_and_create_node(TokenKind::Comma, "Comma")?);
            node.add_child(self.parse_data_type()?);
            node.add_child(self.parse_identifier()?);
        }

        Ok(node)
    }

    /// Parse a type keyword
    pub(crate) fn parse_data_type(&mut self) -> ParseResult<ParseTree> {
        let kind = self.peek_kind();
        if !kind.is_data_type() {
            return Err(self.report_error("expected a data type", None));
        }

        let keyword = self.match_and_create_node(kind, "Type")?;
        Ok(ParseTree::node("Data_Type").with_child(keyword))
    }

    pub(crate) fn parse_identifier(&mut self) -> ParseResult<ParseTree> {
        let name = self.match_and_create_node(TokenKind::Identifier, "Name")?;
        Ok(ParseTree::node("Identifier").with_child(name))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::Parser;
    use crate::parser::tree::ParseTree;

    fn declaration(source: &str) -> ParseTree {
        let mut parser = Parser::from_source(source);
        let mut program = parser.parse_program().expect("valid declaration");
        assert_eq!(program.children.len(), 1);
        let mut decl = program.children.remove(0);
        assert_eq!(decl.label, "Declaration");
        decl.children.remove(0)
    }

    #[test]
    fn test_variable_declaration_list() {
        let decl = declaration("float a = 1.5, b, c = a;");
        assert_eq!(decl.label, "Variable_Declaration");
        assert_eq!(
            decl.child_labels(),
            vec![
                "Data_Type",
                "Identifier",
                "Assign",
                "Factor",
                "Comma",
                "Identifier",
                "Comma",
                "Identifier",
                "Assign",
                "Factor",
                "Semicolon",
            ]
        );
    }

    #[test]
    fn test_array_declaration_with_initializer() {
        let decl = declaration("int a[3] = {1, 2, 3};");
        assert_eq!(decl.label, "Array_Declaration");
        assert_eq!(
            decl.child_labels(),
            vec![
                "Data_Type",
                "Identifier",
                "Left_Bracket",
                "Const",
                "Right_Bracket",
                "Assign",
                "Left_Brace",
                "Argument_List",
                "Right_Brace",
                "Semicolon",
            ]
        );
    }

    #[test]
    fn test_array_declaration_without_size() {
        let decl = declaration("char s[];");
        assert_eq!(
            decl.child_labels(),
            vec!["Data_Type", "Identifier", "Left_Bracket", "Right_Bracket", "Semicolon"]
        );
    }

    #[test]
    fn test_function_prototype() {
        let decl = declaration("bool ready(void);");
        assert_eq!(decl.label, "Function_Declaration");
        assert_eq!(
            decl.children.last().map(|c| c.label.as_str()),
            Some("Semicolon")
        );

        let params = &decl.children[3];
        assert_eq!(params.child_labels(), vec!["Void"]);
    }

    #[test]
    fn test_parameter_list() {
        let decl = declaration("int add(int a, float b) { return a + b; }");
        let params = &decl.children[3];
        assert_eq!(
            params.child_labels(),
            vec!["Data_Type", "Identifier", "Comma", "Data_Type", "Identifier"]
        );
    }

    #[test]
    fn test_void_is_not_a_data_type() {
        let mut parser = Parser::from_source("void main() { }");
        let failure = parser.parse_program().expect_err("void return type");
        assert_eq!(failure.errors.len(), 1);
    }

    #[test]
    fn test_missing_identifier() {
        let mut parser = Parser::from_source("int = 4;");
        let failure = parser.parse_program().expect_err("missing name");
        assert_eq!(
            failure.errors[0].expected,
            Some(crate::parser::token::TokenKind::Identifier)
        );
    }
}
