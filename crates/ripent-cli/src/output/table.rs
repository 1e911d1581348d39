//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use ripent::RuleBlock;
use ripent_semantics::{BlockKind, KeywordSpec};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Block kinds that reject `spec` anywhere in the block.
pub fn forbidding_kinds(spec: &KeywordSpec) -> Vec<BlockKind> {
    BlockKind::ALL
        .into_iter()
        .filter(|kind| kind.forbids(spec.id))
        .collect()
}

/// Format the keyword table.
pub fn format_keyword_table(keywords: &[KeywordSpec]) -> Table {
    let mut table = new_table(vec!["Keyword", "Kind", "Arguments", "Forbidden in"]);
    for spec in keywords {
        let kind = if spec.id.is_selector() { "selector" } else { "action" };
        let forbidden: Vec<&str> = forbidding_kinds(spec)
            .into_iter()
            .map(BlockKind::name)
            .collect();
        table.add_row(vec![
            spec.name.to_string(),
            kind.to_string(),
            spec.arity.to_string(),
            forbidden.join(", "),
        ]);
    }
    table
}

/// Format a per-block summary of a parsed rule file.
pub fn format_block_table(blocks: &[RuleBlock]) -> Table {
    let mut table = new_table(vec!["Line", "Kind", "Maps", "Selectors", "Actions"]);
    for block in blocks {
        let maps = if block.map_filters.is_empty() {
            "*".to_string()
        } else {
            block.map_filters.join(" ")
        };
        table.add_row(vec![
            block.line.to_string(),
            block.kind.to_string(),
            maps,
            block.selectors.len().to_string(),
            block.actions.len().to_string(),
        ]);
    }
    table
}

/// Format stored globals, one row per `(file, name, value)`.
pub fn format_store_table<'a>(rows: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Table {
    let mut table = new_table(vec!["Rule file", "Global", "Value"]);
    for (file, name, value) in rows {
        table.add_row(vec![file, name, value]);
    }
    table
}
