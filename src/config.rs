//! Driver configuration

use std::path::{Path, PathBuf};

use crate::error::{CorecError, CorecResult};
use crate::parser::lexer::MAX_IDENTIFIER_LEN;

/// Extension every source file must carry.
pub const DEFAULT_SOURCE_EXTENSION: &str = "core";

/// Default token interchange file.
pub const DEFAULT_TOKENS_PATH: &str = "symbol_table.txt";

/// Default parse tree output file.
pub const DEFAULT_TREE_PATH: &str = "parse_tree_output.ebnf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source_extension: String,
    pub tokens_path: PathBuf,
    pub tree_path: PathBuf,
    pub max_identifier_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            tokens_path: PathBuf::from(DEFAULT_TOKENS_PATH),
            tree_path: PathBuf::from(DEFAULT_TREE_PATH),
            max_identifier_len: MAX_IDENTIFIER_LEN,
        }
    }
}

impl Config {
    /// Reject source files without the configured extension.
    pub fn check_source_path(&self, path: &Path) -> CorecResult<()> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext == self.source_extension => Ok(()),
            _ => Err(CorecError::WrongExtension {
                path: path.to_path_buf(),
                expected: self.source_extension.clone(),
            }),
        }
    }
}
