use ripent_semantics::BlockKind;
use tracing::{debug, trace};

use super::action::{ActionEnv, Outcome, execute};
use super::error::{RuleError, RuleErrorKind, RuleWarning};
use super::selector::excludes;
use super::store::GlobalStore;
use super::working_set::WorkingSet;
use crate::parser::RuleBlock;
use crate::types::Record;

/// Apply one block to the working set and return the records it spawned.
///
/// Exclusion marks must be reset by the caller beforehand; spawned records
/// are appended and deletions swept by the caller afterwards.
pub(crate) fn apply_block(
    block: &RuleBlock,
    target_name: &str,
    set: &mut WorkingSet,
    store: &mut GlobalStore,
    warnings: &mut Vec<RuleWarning>,
) -> Result<Vec<Record>, RuleError> {
    if !block.applies_to(target_name) {
        trace!(
            line = block.line,
            target = target_name,
            "rule block skipped by map filter"
        );
        return Ok(Vec::new());
    }

    let at_block = |kind: RuleErrorKind| kind.at(block.line, block.offset);
    let mut env = ActionEnv {
        store,
        warnings,
        line: block.line,
    };
    let mut spawned = Vec::new();
    let mut processed = 0_usize;

    match block.kind {
        BlockKind::Normal | BlockKind::DeleteEntity => {
            run_selectors(block, set, env.store).map_err(at_block)?;
            let selected: Vec<usize> = set.selected().collect();
            for action in &block.actions {
                for &index in &selected {
                    let outcome = execute(action, &mut set.records[index], None, &mut env)
                        .map_err(at_block)?;
                    if outcome == Outcome::MarkedForDeletion {
                        set.pending_delete[index] = true;
                    }
                    processed += 1;
                }
            }
        }
        BlockKind::SpawnEntity if block.selectors.is_empty() => {
            let mut record = Record::new();
            for action in &block.actions {
                execute(action, &mut record, None, &mut env).map_err(at_block)?;
                processed += 1;
            }
            spawned.push(record);
        }
        BlockKind::SpawnEntity => {
            run_selectors(block, set, env.store).map_err(at_block)?;
            for index in set.selected() {
                let source = &set.records[index];
                let mut record = Record::new();
                for action in &block.actions {
                    execute(action, &mut record, Some(source), &mut env).map_err(at_block)?;
                    processed += 1;
                }
                spawned.push(record);
            }
        }
    }

    debug!(
        kind = %block.kind,
        line = block.line,
        processed,
        spawned = spawned.len(),
        "applied rule block"
    );
    Ok(spawned)
}

/// Mark every record some selector rejects. Marks are only ever set.
fn run_selectors(
    block: &RuleBlock,
    set: &mut WorkingSet,
    store: &GlobalStore,
) -> Result<(), RuleErrorKind> {
    for selector in &block.selectors {
        for (record, excluded) in set.records.iter().zip(set.excluded.iter_mut()) {
            if excludes(selector, record, store)? {
                *excluded = true;
            }
        }
    }
    Ok(())
}
