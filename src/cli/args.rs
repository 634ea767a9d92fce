//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;

/// Order charts of accounts: groups by parent and display-after, accounts within their groups
#[derive(Parser, Debug)]
#[command(name = "chartsort")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory holding `.chartsort.toml` (default: cwd)
    #[arg(short = 'C', long, global = true, env = "CHARTSORT_PROJECT_DIR", value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the ordered chart: groups with their accounts
    Chart {
        /// Chart file, TOML or JSON (default: `chart_file` setting)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Output format (default: `format` setting)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Fail on accounts whose group does not exist
        #[arg(long)]
        strict: bool,
    },

    /// Print group names in hierarchical display order
    Groups {
        /// Chart file, TOML or JSON (default: `chart_file` setting)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Write a new chart holding the immutable base groups
    Init {
        /// Target file, `.json` for JSON (default: `chart_file` setting)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a chart and print a summary
    Check {
        /// Chart file, TOML or JSON (default: `chart_file` setting)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Fail on accounts whose group does not exist
        #[arg(long)]
        strict: bool,
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

    /// Show config paths
    Path,

    /// Print a config template
    Template,
}
