//! ripent CLI entry point.
//!
//! Provides command-line tools for working with entity rule files:
//! - `ripent check` - Validate rule file syntax
//! - `ripent apply` - Apply rule files to a JSON record list
//! - `ripent keywords` - List the rule keywords

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{ApplyArgs, CheckArgs, KeywordsArgs, run_apply, run_check, run_keywords};
use tracing_subscriber::EnvFilter;

/// Entity rule file tools.
#[derive(Debug, Parser)]
#[command(name = "ripent")]
#[command(about = "Batch-edit entity records with rule files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check rule file syntax
    Check(CheckArgs),
    /// Apply rule files to a JSON list of records
    Apply(ApplyArgs),
    /// List the selector and action keywords
    Keywords(KeywordsArgs),
}

impl ColorWhen {
    /// Forced color setting, or `None` to let owo-colors inspect the terminal.
    fn forced(self) -> Option<bool> {
        match self {
            ColorWhen::Auto => None,
            ColorWhen::Always => Some(true),
            ColorWhen::Never => Some(false),
        }
    }
}

/// Install the log subscriber. `RUST_LOG` wins over `--verbose`.
fn setup_tracing(verbose: bool, color_when: ColorWhen) {
    let default_filter = if verbose { "ripent=debug" } else { "ripent=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_ansi(color_when.forced() != Some(false))
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    if let Some(forced) = cli.color.forced() {
        owo_colors::set_override(forced);
    }
    setup_tracing(cli.verbose, cli.color);

    let unicode = cli.color.forced() != Some(false);
    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(unicode)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Apply(args) => run_apply(args),
        Commands::Keywords(args) => run_keywords(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
