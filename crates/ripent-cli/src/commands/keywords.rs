//! Implementation of the `ripent keywords` command.

use clap::Args;
use miette::{IntoDiagnostic, Result};
use ripent_semantics::{BlockKind, KEYWORDS};
use serde::Serialize;

use crate::output::table::{format_keyword_table, forbidding_kinds};

/// Arguments for the keywords command.
#[derive(Debug, Args)]
pub struct KeywordsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one keyword.
#[derive(Debug, Serialize)]
struct KeywordJson {
    keyword: &'static str,
    kind: &'static str,
    arity: usize,
    forbidden_in: Vec<&'static str>,
}

/// Run the keywords command.
pub fn run_keywords(args: KeywordsArgs) -> Result<i32> {
    if args.json {
        let keywords: Vec<KeywordJson> = KEYWORDS
            .iter()
            .map(|spec| KeywordJson {
                keyword: spec.name,
                kind: if spec.id.is_selector() { "selector" } else { "action" },
                arity: spec.arity,
                forbidden_in: forbidding_kinds(spec)
                    .into_iter()
                    .map(BlockKind::name)
                    .collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&keywords).into_diagnostic()?);
    } else {
        println!("{}", format_keyword_table(KEYWORDS));
    }
    Ok(exitcode::OK)
}
