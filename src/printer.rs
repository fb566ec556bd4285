//! Parse tree rendering
//!
//! ```text
//! Program(
//!   Declaration(
//!     Variable_Declaration(
//!       Data_Type(
//!         INT
//!       ),
//!       Identifier(
//!         IDENTIFIER: "x"
//!       ),
//!       SEMICOLON
//!     )
//!   )
//! )
//! ```

use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::CorecResult;
use crate::parser::token::{escape_string_lexeme, TokenKind};
use crate::parser::tree::ParseTree;

const INDENT: &str = "  ";

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, 0, f)
    }
}

fn render(node: &ParseTree, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }

    if let Some(token) = &node.token {
        return match token.kind {
            TokenKind::String => {
                write!(f, "{}: {}", token.kind, escape_string_lexeme(&token.lexeme))
            }
            kind if kind.shows_lexeme() => write!(f, "{}: \"{}\"", kind, token.lexeme),
            kind => write!(f, "{kind}"),
        };
    }

    write!(f, "{}(", node.label)?;

    if !node.children.is_empty() {
        f.write_char('\n')?;
        for (i, child) in node.children.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            render(child, depth + 1, f)?;
        }
        f.write_char('\n')?;
        for _ in 0..depth {
            f.write_str(INDENT)?;
        }
    }

    f.write_char(')')
}

/// Write the rendered tree followed by a newline.
pub fn write_to<W: Write>(out: &mut W, tree: &ParseTree) -> io::Result<()> {
    writeln!(out, "{tree}")
}

/// Write the rendered tree to `path`, replacing any previous file.
pub fn write_tree_file(path: &Path, tree: &ParseTree) -> CorecResult<()> {
    let mut out = io::BufWriter::new(fs::File::create(path)?);
    write_to(&mut out, tree)?;
    out.flush()?;
    tracing::debug!(path = %path.display(), "parse tree written");
    Ok(())
}
