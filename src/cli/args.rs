//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::height::Strategy;

/// Binary tree height from level-order input
#[derive(Parser, Debug)]
#[command(name = "bstheight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where a tree is read from: a file, an inline string, or stdin.
#[derive(Args, Debug, Clone)]
pub struct TreeSource {
    /// Level-order tree file (stdin when omitted)
    #[arg(value_hint = ValueHint::FilePath, conflicts_with = "tree")]
    pub file: Option<PathBuf>,

    /// Inline level-order tree, e.g. "a b c - d"
    #[arg(short, long)]
    pub tree: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tree height (edges on the longest root-to-leaf path)
    Height {
        #[command(flatten)]
        source: TreeSource,
        /// Traversal: recursive, stack or queue
        #[arg(short, long)]
        strategy: Option<Strategy>,
        /// Maximum number of levels (0: unlimited)
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Show the tree
    Tree {
        #[command(flatten)]
        source: TreeSource,
    },

    /// List leaf values, left to right
    Leaves {
        #[command(flatten)]
        source: TreeSource,
    },

    /// List node values level by level
    Levels {
        #[command(flatten)]
        source: TreeSource,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Show config file locations
    Path,
}
