//! Token interchange file ("symbol table")
//!
//! The scanner's output is persisted as a fixed-width table so that the
//! parser can run as a separate step:
//!
//! ```text
//! ________________________________ ... (128 underscores)
//! TOKEN CODE      | TOKEN                    | LINE #          | COLUMN #        | LEXEME
//! ________________________________ ...
//! 38              | INT                      | 1               | 1               | int
//! ...
//! 45              | TOKEN_EOF                | 3               | -1              | EOF
//! ________________________________ ...
//! ```
//!
//! Comments and lexical error sentinels are never written. String lexemes
//! are re-escaped so each record stays on one line.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::error::{CorecError, CorecResult};
use crate::parser::token::{escape_string_lexeme, SourceLocation, Token, TokenKind};
use crate::parser::Scanner;

const RULE_WIDTH: usize = 128;

const HEADER: &str =
    "TOKEN CODE      | TOKEN                    | LINE #          | COLUMN #        | LEXEME";

/// Column written for `TOKEN_EOF`.
const EOF_COLUMN: i64 = -1;

/// A record that could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct RecordError {
    pub line: usize,
    pub reason: String,
}

/// Console trace line for one token.
pub fn console_line(token: &Token) -> String {
    format!(
        "Next token is: {:<30} Next lexeme is {}",
        token.kind.name(),
        token.lexeme
    )
}

/// Write the persisted subset of `tokens`, always ending with `TOKEN_EOF`.
pub fn write_tokens<W: Write>(out: &mut W, tokens: &[Token]) -> io::Result<()> {
    let rule = "_".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{HEADER}")?;
    writeln!(out, "{rule}")?;

    let mut eof_line = 1;
    for token in tokens {
        if token.is(TokenKind::Eof) {
            eof_line = token.location.line;
            break;
        }
        if !token.kind.is_persisted() {
            continue;
        }

        let lexeme = match token.kind {
            TokenKind::String => escape_string_lexeme(&token.lexeme),
            _ => token.lexeme.clone(),
        };
        write_record(
            out,
            token.kind,
            token.location.line,
            token.location.column as i64,
            &lexeme,
        )?;
    }

    write_record(out, TokenKind::Eof, eof_line, EOF_COLUMN, "EOF")?;
    writeln!(out, "{rule}")?;
    Ok(())
}

fn write_record<W: Write>(
    out: &mut W,
    kind: TokenKind,
    line: usize,
    column: i64,
    lexeme: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<15} | {:<24} | {:<15} | {:<15} | {}",
        kind.code(),
        kind.name(),
        line,
        column,
        lexeme
    )
}

/// Write the token table to `path`, replacing any previous file.
pub fn write_tokens_file(path: &Path, tokens: &[Token]) -> CorecResult<()> {
    let mut out = io::BufWriter::new(fs::File::create(path)?);
    write_tokens(&mut out, tokens)?;
    out.flush()?;
    tracing::debug!(path = %path.display(), "token table written");
    Ok(())
}

/// Read a token table back into a token list ending with `TOKEN_EOF`.
pub fn read_tokens(text: &str) -> Result<Vec<Token>, RecordError> {
    let by_name: FxHashMap<&'static str, TokenKind> = TokenKind::ALL
        .iter()
        .map(|kind| (kind.name(), *kind))
        .collect();

    let mut tokens = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end();

        let banner = line.chars().all(|c| c == '_') || line.starts_with("TOKEN CODE");
        if line.is_empty() || banner {
            continue;
        }

        let token = parse_record(line, &by_name).map_err(|reason| RecordError {
            line: line_no,
            reason,
        })?;

        let done = token.is(TokenKind::Eof);
        tokens.push(token);
        if done {
            break;
        }
    }

    if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
        let line = tokens.last().map_or(1, |t| t.location.line);
        tokens.push(Token::eof(SourceLocation::new(line, 0)));
    }

    Ok(tokens)
}

fn parse_record(
    line: &str,
    by_name: &FxHashMap<&'static str, TokenKind>,
) -> Result<Token, String> {
    let fields: Vec<&str> = line.splitn(5, '|').collect();
    let [code, name, line_no, column, lexeme] = fields.as_slice() else {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    };

    let code: u8 = code
        .trim()
        .parse()
        .map_err(|_| format!("invalid token code '{}'", code.trim()))?;
    let name = name.trim();
    let kind = by_name
        .get(name)
        .copied()
        .ok_or_else(|| format!("unknown token name '{name}'"))?;

    if kind.code() != code {
        return Err(format!("code {code} does not match token {name}"));
    }
    if !kind.is_persisted() {
        return Err(format!("{name} tokens are never persisted"));
    }

    let line_no: usize = line_no
        .trim()
        .parse()
        .map_err(|_| format!("invalid line number '{}'", line_no.trim()))?;
    let column: i64 = column
        .trim()
        .parse()
        .map_err(|_| format!("invalid column number '{}'", column.trim()))?;
    let column = usize::try_from(column).unwrap_or(0);

    let location = SourceLocation::new(line_no, column);
    let lexeme = lexeme.trim();

    if kind == TokenKind::String {
        return rescan_string(lexeme, location);
    }
    if kind == TokenKind::Eof {
        return Ok(Token::eof(location));
    }

    Ok(Token::new(kind, lexeme, location))
}

/// Translate the escapes of a persisted string lexeme back.
fn rescan_string(lexeme: &str, location: SourceLocation) -> Result<Token, String> {
    let mut scanner = Scanner::new(lexeme);
    let token = scanner.next_token();

    if token.is(TokenKind::String) && scanner.next_token().is(TokenKind::Eof) {
        Ok(Token::new(TokenKind::String, token.lexeme, location))
    } else {
        Err(format!("malformed string lexeme {lexeme}"))
    }
}

/// Read a token table from `path`.
pub fn read_tokens_file(path: &Path) -> CorecResult<Vec<Token>> {
    let text = fs::read_to_string(path)?;
    let tokens = read_tokens(&text).map_err(|err| CorecError::MalformedRecord {
        path: path.to_path_buf(),
        line: err.line,
        reason: err.reason,
    })?;

    tracing::debug!(
        path = %path.display(),
        tokens = tokens.len(),
        "token table read"
    );
    Ok(tokens)
}
