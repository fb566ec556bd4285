//! # Introduction
//!
//! corec is the front end of a compiler for core, a small statically-typed
//! teaching language. It scans source text into tokens and parses them into a
//! concrete parse tree, reporting lexical and syntax errors without stopping
//! at the first one.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Tokens → [symbol table file] → Parser → Parse tree → [tree file]
//! ```
//!
//! 1. [`parser`]: the scanner, keyword state machine, token stream and the
//!    recursive descent parser with panic-mode recovery.
//! 2. [`symbol_table`]: the fixed-width token table that lets scanning and
//!    parsing run as separate steps.
//! 3. [`printer`]: the parse tree's textual form.
//! 4. [`driver`]: the `scan`, `parse` and `build` batch commands.
//! 5. [`ui`]: ratatui-based explorer for tokens and the parse tree; not part
//!    of the stable library API.
//!
//! ## Language
//!
//! Types: `int`, `float`, `char`, `bool`.
//! Declarations: variables, arrays, functions and prototypes.
//! Control flow: `if/else`, `while`, `for`, `return`.
//! I/O: `scanf`, `printf`.
//!
//! ## Example
//!
//! ```
//! use corec::parser::Parser;
//!
//! let mut parser = Parser::from_source("int main() { return 1 + 2 * 3; }");
//! let tree = parser.parse_program().expect("valid program");
//! assert!(tree.find("MulDivMod").is_some());
//! ```

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod parser;
pub mod printer;
pub mod symbol_table;
pub mod ui;

pub use error::{CorecError, CorecResult};
