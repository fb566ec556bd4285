//! Batch pipeline behind the `scan`, `parse` and `build` commands
//!
//! Scanning always writes the token table, even when lexical errors were
//! found (the broken lexemes are simply absent). The parse tree file is
//! written only for a parse without syntax errors; after a failed parse any
//! stale tree file at the output path is removed.

use std::fs;
use std::io;
use std::path::Path;

use crate::config::Config;
use crate::error::{CorecError, CorecResult};
use crate::parser::{LexError, ParseTree, Parser, Scanner, Token};
use crate::printer;
use crate::symbol_table;

/// Everything the scanner produced for one source text.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl ScanOutput {
    /// Tokens that survive into the token table, including `TOKEN_EOF`.
    pub fn persisted(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.kind.is_persisted())
    }

    pub fn into_result(self) -> CorecResult<Vec<Token>> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(CorecError::Scan(self.errors))
        }
    }
}

pub fn scan_source(config: &Config, source: &str) -> ScanOutput {
    let mut scanner =
        Scanner::new(source).with_max_identifier_len(config.max_identifier_len);
    let tokens = scanner.tokenize();
    ScanOutput {
        tokens,
        errors: scanner.into_errors(),
    }
}

/// Read a source file after checking its extension.
pub fn read_source(config: &Config, path: &Path) -> CorecResult<String> {
    config.check_source_path(path)?;
    Ok(fs::read_to_string(path)?)
}

/// Scan a source file and write its token table.
pub fn scan_file(config: &Config, path: &Path) -> CorecResult<ScanOutput> {
    let source = read_source(config, path)?;
    tracing::debug!(path = %path.display(), "scanning");

    let output = scan_source(config, &source);
    symbol_table::write_tokens_file(&config.tokens_path, &output.tokens)?;
    Ok(output)
}

/// Parse a token list and write the tree on success.
pub fn parse_tokens(config: &Config, tokens: Vec<Token>) -> CorecResult<ParseTree> {
    let mut parser = Parser::new(tokens);

    match parser.parse_program() {
        Ok(tree) => {
            printer::write_tree_file(&config.tree_path, &tree)?;
            Ok(tree)
        }
        Err(failure) => {
            remove_stale(&config.tree_path)?;
            Err(failure.into())
        }
    }
}

/// Read a token table and parse it.
pub fn parse_file(config: &Config, path: &Path) -> CorecResult<ParseTree> {
    let tokens = symbol_table::read_tokens_file(path)?;
    parse_tokens(config, tokens)
}

/// Scan and parse a source file. Syntax errors take precedence over lexical
/// ones in the returned error.
pub fn build_file(config: &Config, path: &Path) -> CorecResult<ParseTree> {
    let output = scan_file(config, path)?;
    let tree = parse_tokens(config, output.tokens)?;

    if output.errors.is_empty() {
        Ok(tree)
    } else {
        Err(CorecError::Scan(output.errors))
    }
}

fn remove_stale(path: &Path) -> CorecResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed stale parse tree");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
