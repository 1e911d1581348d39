//! Implementation of the `ripent check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Report, Result};
use ripent::{RuleBlock, parse_rule_file};
use serde::Serialize;
use tracing::debug;

use crate::output::table::format_block_table;
use crate::output::{RuleDiagnostic, print_error};

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Rule files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    blocks: Vec<BlockReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
struct BlockReport {
    line: usize,
    kind: String,
    maps: Vec<String>,
    selectors: usize,
    actions: usize,
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    message: String,
    line: Option<usize>,
    offset: Option<usize>,
}

impl From<&RuleBlock> for BlockReport {
    fn from(block: &RuleBlock) -> Self {
        BlockReport {
            line: block.line,
            kind: block.kind.to_string(),
            maps: block.map_filters.clone(),
            selectors: block.selectors.len(),
            actions: block.actions.len(),
        }
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut reports = Vec::new();
    let mut code = exitcode::OK;

    for path in &args.files {
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                print_error(format!("cannot read {}: {e}", path.display()));
                code = exitcode::NOINPUT;
                continue;
            }
        };

        let report = match parse_rule_file(&content) {
            Ok(file) => {
                debug!(path = %path.display(), blocks = file.blocks().len(), "rule file ok");
                if !args.json {
                    println!("{}: {} block(s)", path.display(), file.blocks().len());
                    println!("{}", format_block_table(file.blocks()));
                }
                FileReport {
                    path: path.display().to_string(),
                    ok: true,
                    blocks: file.blocks().iter().map(BlockReport::from).collect(),
                    error: None,
                }
            }
            Err(e) => {
                if !args.json {
                    let diagnostic = RuleDiagnostic::from_parse_error(path, &content, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                if code == exitcode::OK {
                    code = exitcode::DATAERR;
                }
                FileReport {
                    path: path.display().to_string(),
                    ok: false,
                    blocks: Vec::new(),
                    error: Some(ErrorReport {
                        message: e.to_string(),
                        line: e.line(),
                        offset: e.offset(),
                    }),
                }
            }
        };
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    }
    Ok(code)
}
