//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Zettelkasten with Luhmann-style note identifiers: allocate, edit and browse notes as a tree
#[derive(Parser, Debug)]
#[command(name = "zettl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory with a local .zettl.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Notes directory (overrides configuration)
    #[arg(short, long, global = true, env = "ZETTL_NOTES_DIR", value_hint = ValueHint::DirPath)]
    pub notes_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show all notes as a tree
    Tree,

    /// Print the next free child identifier
    Next {
        /// Parent identifier (default: top level)
        parent: Option<String>,
    },

    /// Create the next child note of PARENT
    New {
        /// Parent identifier (default: top level)
        parent: Option<String>,
        /// Note content; opens the editor when omitted
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Print a note
    Show {
        /// Note identifier
        id: String,
    },

    /// Edit a note in the editor
    Edit {
        /// Note identifier
        id: String,
    },

    /// Show levels, tree path and depth of an identifier
    Inspect {
        /// Note identifier
        id: String,
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
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
