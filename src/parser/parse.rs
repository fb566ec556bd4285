//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, panic-mode recovery and the main
//! parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, recovery and coordination
//! - `declarations`: variable, array and function declarations
//! - `statements`: blocks and statements (if, while, for, scanf, printf, ...)
//! - `expressions`: expressions with precedence climbing
//!
//! # Error Recovery
//!
//! A syntax error is reported once, switches the parser into panic mode and
//! skips ahead to a synchronization token (`;`, `}`, a type keyword or a
//! loop/branch keyword). The failed rule then returns `Err`, which unwinds to
//! the nearest recovery point (the declaration loop of a program or the item
//! loop of a block), and parsing continues from there. The tree keeps every
//! construct that parsed cleanly; the sticky `panic` flag records that the
//! program as a whole is invalid.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::lexer::Scanner;
use crate::parser::stream::TokenStream;
use crate::parser::token::{SourceLocation, Token, TokenKind};
use crate::parser::tree::ParseTree;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("syntax error at {location}: {message}, found {found}")]
pub struct ParseError {
    pub message: String,
    pub expected: Option<TokenKind>,
    pub found: Token,
    pub location: SourceLocation,
}

/// Result of a grammar rule. The error is boxed to keep the recursive
/// frames small.
pub(crate) type ParseResult<T> = Result<T, Box<ParseError>>;

/// Deepest nesting of expressions and blocks the parser descends into.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A parse that finished with at least one syntax error.
///
/// The partial tree is kept for inspection but must not be emitted as output.
#[derive(Debug, Clone, Error)]
#[error("parsing failed with {} syntax error(s)", .errors.len())]
pub struct ParseFailure {
    pub errors: Vec<ParseError>,
    pub tree: ParseTree,
}

/// Recovery state machine
///
/// `Panicking` is held only while [`Parser::synchronize`] discards tokens;
/// between rules the parser is always `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Panicking,
}

/// Recursive descent parser for core programs
pub struct Parser {
    pub(crate) stream: TokenStream,
    mode: Mode,
    panic: bool,
    depth: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    /// Build a parser over an already-scanned token list. Comments and error
    /// sentinels are dropped here.
    pub fn new(tokens: impl Into<TokenStream>) -> Self {
        Self {
            stream: tokens.into(),
            mode: Mode::Normal,
            panic: false,
            depth: 0,
            errors: Vec::new(),
        }
    }

    /// Scan `source` and build a parser over the result. Lexical errors are
    /// logged by the scanner; use [`Scanner`] directly to inspect them.
    pub fn from_source(source: &str) -> Self {
        let tokens = Scanner::new(source).tokenize();
        Self::new(tokens)
    }

    /// Parse the entire program and return the tree, even if errors occurred.
    pub fn parse_tree(&mut self) -> ParseTree {
        tracing::debug!(tokens = self.stream.len(), "parsing started");

        let mut program = ParseTree::node("Program");

        while !self.stream.is_at_end() {
            let start = self.stream.position();
            match self.parse_declaration() {
                Ok(decl) => program.add_child(decl),
                Err(_) => self.recover(start, true),
            }
        }

        tracing::debug!(
            declarations = program.children.len(),
            errors = self.errors.len(),
            "parsing finished"
        );
        program
    }

    /// Parse the entire program; any syntax error makes the result an `Err`.
    pub fn parse_program(&mut self) -> Result<ParseTree, ParseFailure> {
        let tree = self.parse_tree();

        if self.panic {
            Err(ParseFailure {
                errors: self.errors.clone(),
                tree,
            })
        } else {
            Ok(tree)
        }
    }

    /// Syntax errors reported so far.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Whether any syntax error occurred during this parse.
    pub fn panicked(&self) -> bool {
        self.panic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    // ===== Error handling =====

    /// Record a syntax error at the current token, set the panic flag and
    /// synchronize. The returned error unwinds to the nearest recovery point.
    pub(crate) fn report_error(
        &mut self,
        message: impl Into<String>,
        expected: Option<TokenKind>,
    ) -> Box<ParseError> {
        let found = self.stream.peek().clone();
        let err = ParseError {
            message: message.into(),
            expected,
            location: found.location,
            found,
        };

        tracing::error!("{err}");
        self.errors.push(err.clone());
        self.panic = true;
        self.synchronize();
        Box::new(err)
    }

    /// Run `rule` one nesting level deeper, failing with a syntax error
    /// instead of recursing past [`MAX_NESTING_DEPTH`].
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.report_error("expression nested too deeply", None));
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Discard tokens until a synchronization token or end of input, leaving
    /// the cursor on it, and return to normal mode.
    pub(crate) fn synchronize(&mut self) {
        self.mode = Mode::Panicking;
        let start = self.stream.position();

        while !self.stream.is_at_end() && !is_sync_token(self.peek_kind()) {
            self.stream.advance();
        }

        tracing::debug!(
            skipped = self.stream.position() - start,
            at = %self.stream.peek(),
            "resynchronized"
        );
        self.mode = Mode::Normal;
    }

    /// Resume after a failed item that started at token index `start`.
    ///
    /// A `;` under the cursor terminated the broken construct and is
    /// consumed, as is a stray `}` at top level. If the failed item consumed
    /// nothing, one token is skipped so the caller's loop always advances.
    pub(crate) fn recover(&mut self, start: usize, top_level: bool) {
        match self.peek_kind() {
            TokenKind::Semicolon => {
                self.stream.advance();
            }
            TokenKind::RightBrace if top_level => {
                self.stream.advance();
            }
            _ if self.stream.position() == start => {
                self.stream.advance();
            }
            _ => {}
        }
    }

    // ===== Helper methods =====

    /// Assert the current token kind, wrap the token as a terminal node and
    /// advance.
    pub(crate) fn match_and_create_node(
        &mut self,
        expected: TokenKind,
        label: &str,
    ) -> ParseResult<ParseTree> {
        if self.check(expected) {
            let token = self.stream.advance();
            tracing::trace!(
                kind = %token.kind,
                lexeme = %token.lexeme,
                line = token.location.line,
                "matched"
            );
            Ok(ParseTree::terminal(label, token))
        } else {
            Err(self.report_error(format!("expected {expected}"), Some(expected)))
        }
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.stream.peek().kind
    }

    pub(crate) fn peek_kind_ahead(&self, n: usize) -> TokenKind {
        self.stream.peek_ahead(n).kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn is_type_keyword(&self) -> bool {
        self.peek_kind().is_data_type()
    }
}

fn is_sync_token(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Semicolon
            | TokenKind::RightBrace
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Char
            | TokenKind::Bool
            | TokenKind::For
            | TokenKind::While
            | TokenKind::If
    )
}
