//! core source code front end
//!
//! This module turns core source text into a parse tree:
//! - [`lexer`]: Scanning (source text → tokens)
//! - [`keywords`]: Keyword recognition state machine
//! - [`token`]: Token kinds, tokens and source locations
//! - [`stream`]: Filtered, random-access token sequence
//! - [`parse`]: Parser struct, error types and panic-mode recovery
//! - [`tree`]: Parse tree nodes
//!
//! # Supported language
//!
//! - Types: `int`, `float`, `char`, `bool` (and `void` parameter lists)
//! - Declarations: variables, one-dimensional arrays, functions and prototypes
//! - Statements: `if`/`else`, `while`, `for`, `return`, `scanf`, `printf`, blocks
//! - Expressions: arithmetic, relational, logical, `^` power, calls, indexing
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod declarations;
pub mod expressions;
pub mod keywords;
pub mod lexer;
pub mod parse;
pub mod statements;
pub mod stream;
pub mod token;
pub mod tree;

pub use lexer::{LexError, Scanner};
pub use parse::{ParseError, ParseFailure, Parser};
pub use stream::TokenStream;
pub use token::{SourceLocation, Token, TokenKind};
pub use tree::ParseTree;
