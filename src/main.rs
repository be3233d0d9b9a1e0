// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use nbmd_config::Config;
use nbmd_core::{convert_ipynb_to_md, convert_md_to_ipynb, ConversionResult, SerializeOptions};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // The MCP server is long-running; show its lifecycle by default.
    let base_level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    init_logging(base_level, cli.verbose);

    if let Commands::Completions { shell } = cli.command {
        cli::print_completions(shell);
        return Ok(ExitCode::SUCCESS);
    }

    let config = nbmd_config::load(cli.config.as_deref())?;
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Serve { tools } => {
            let allowed = tools.as_deref().unwrap_or(&config.mcp.tools);
            let registry = nbmd_mcp::build_mcp_registry(serialize_options(&config), Some(allowed));
            if registry.is_empty() {
                anyhow::bail!("no tools selected by {allowed:?}; nothing to serve");
            }
            nbmd_mcp::serve_stdio(Arc::new(registry)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::ToMarkdown { source, output_dir, no_boundary_markers } => {
            let mut options = serialize_options(&config);
            if no_boundary_markers {
                options.boundary_markers = false;
            }
            let output_dir = resolve_output_dir(output_dir, &config, &source);
            report(convert_ipynb_to_md(&source, &output_dir, &options))
        }
        Commands::ToNotebook { source, output_dir } => {
            let output_dir = resolve_output_dir(output_dir, &config, &source);
            report(convert_md_to_ipynb(&source, &output_dir))
        }
        Commands::ShowConfig => {
            let text = toml::to_string_pretty(&config).context("encoding configuration")?;
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn serialize_options(config: &Config) -> SerializeOptions {
    SerializeOptions {
        boundary_markers: config.convert.boundary_markers,
    }
}

/// `--output-dir`, then `convert.output_dir`, then the source's directory.
fn resolve_output_dir(flag: Option<PathBuf>, config: &Config, source: &Path) -> PathBuf {
    flag.or_else(|| config.convert.output_dir.clone())
        .unwrap_or_else(|| match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        })
}

/// Print the result JSON on stdout; an error status becomes a failing exit code.
fn report(result: ConversionResult) -> anyhow::Result<ExitCode> {
    println!("{}", result.to_json());
    Ok(if result.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_logging(base_level: &str, verbosity: u8) {
    let level = match verbosity {
        0 => base_level,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
