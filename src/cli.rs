// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "nbmd",
    about = "Convert Jupyter notebooks to Markdown and back",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c', global = true, env = "NBMD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the conversion tools over MCP on stdin/stdout
    Serve {
        /// Comma-separated tool names to expose, or "all".
        /// Overrides `mcp.tools` from the config file.
        #[arg(long, value_name = "NAMES")]
        tools: Option<String>,
    },
    /// Convert a .ipynb notebook to Markdown
    ToMarkdown {
        /// Notebook to convert
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        /// Directory for the .md file (default: config, then next to SOURCE)
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Do not separate adjacent text cells with boundary markers
        #[arg(long)]
        no_boundary_markers: bool,
    },
    /// Convert a .md/.markdown file to a notebook
    ToNotebook {
        /// Markdown file to convert
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        /// Directory for the .ipynb file (default: config, then next to SOURCE)
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Print the effective configuration and exit
    ShowConfig,
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "nbmd", &mut std::io::stdout());
}
