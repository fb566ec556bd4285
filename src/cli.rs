//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::Config;

/// corec - scanner and parser for the core teaching language
#[derive(Debug, Parser)]
#[command(name = "corec", author, about, version)]
pub struct CorecArgs {
    /// The subcommand to run
    #[command(subcommand)]
    pub subcommand: CorecSubcommand,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Token table file to write (scan, build) or read (parse)
    #[arg(long, value_name = "PATH", global = true)]
    pub tokens_out: Option<PathBuf>,

    /// Parse tree output file
    #[arg(long, value_name = "PATH", global = true)]
    pub tree_out: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum CorecSubcommand {
    /// Scan a source file and write its token table
    #[command(name = "scan")]
    Scan {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a token table and write the parse tree
    #[command(name = "parse")]
    Parse {
        /// Token table file; defaults to the configured token file
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Scan and parse a source file, writing both outputs
    #[command(name = "build")]
    Build {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Explore tokens and the parse tree of a source file interactively
    #[command(name = "view")]
    View {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl CorecArgs {
    /// Default filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Configuration with command-line overrides applied.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(path) = &self.tokens_out {
            config.tokens_path = path.clone();
        }
        if let Some(path) = &self.tree_out {
            config.tree_path = path.clone();
        }
        config
    }
}
