use tracing::trace;

use super::error::{RuleErrorKind, RuleWarning};
use super::numeric::{bit_mask, format_number, parse_number};
use super::resolve::resolve_template;
use super::store::GlobalStore;
use crate::parser::{Action, MathOp, Template};
use crate::types::Record;
use ripent_semantics::ActionKind;

/// Shared state an action may touch besides its record.
pub(crate) struct ActionEnv<'a> {
    pub(crate) store: &'a mut GlobalStore,
    pub(crate) warnings: &'a mut Vec<RuleWarning>,
    /// Line of the block being applied, for warnings.
    pub(crate) line: usize,
}

/// What the caller must do after an action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Applied,
    MarkedForDeletion,
}

/// Run one action against `target`.
///
/// Templates resolve against `source` when given (a spawned record reads from
/// the record that matched), otherwise against `target`. Key preconditions
/// always apply to `target`.
pub(crate) fn execute(
    action: &Action,
    target: &mut Record,
    source: Option<&Record>,
    env: &mut ActionEnv<'_>,
) -> Result<Outcome, RuleErrorKind> {
    let kind = action.kind();
    match action {
        Action::Replace { key, value } => {
            require_key(target, key, kind)?;
            let value = resolve(value, target, source, env.store)?;
            target.set(key, value);
        }
        Action::New { key, value } => {
            forbid_key(target, key, kind)?;
            let value = resolve(value, target, source, env.store)?;
            target.insert(key.as_str(), value);
        }
        Action::BitSet { key, pattern } => {
            let (current, mask) = bitfield(target, key, pattern, kind)?;
            target.set(key, (current | mask).to_string());
        }
        Action::BitClear { key, pattern } => {
            let (current, mask) = bitfield(target, key, pattern, kind)?;
            target.set(key, (current & !mask).to_string());
        }
        Action::Rename { from, to } => {
            require_key(target, from, kind)?;
            forbid_key(target, to, kind)?;
            target.rename(from, to);
        }
        Action::Store { key, name } => {
            let value = require_key(target, key, kind)?;
            trace!(name = name.as_str(), value, "storing global");
            env.store.set(name.as_str(), value);
        }
        Action::Remove { key } => {
            require_key(target, key, kind)?;
            target.remove(key);
        }
        Action::SpawnEntity { classname } => {
            if let Some(previous) = target.insert("classname", classname.as_str()) {
                env.warnings.push(RuleWarning::ClassnameOverwritten {
                    previous,
                    classname: classname.clone(),
                    line: env.line,
                });
            }
        }
        Action::DeleteEntity => return Ok(Outcome::MarkedForDeletion),
        Action::Math { op, key, operand } => {
            let current = require_key(target, key, kind)?;
            let lhs = numeric(&current, kind)?;
            let rhs = numeric(operand, kind)?;
            let result = match op {
                MathOp::Add => lhs + rhs,
                MathOp::Sub => lhs - rhs,
                MathOp::Mult => lhs * rhs,
                MathOp::Div if rhs == 0.0 => {
                    return Err(RuleErrorKind::DivisionByZero { key: key.clone() });
                }
                MathOp::Div => lhs / rhs,
            };
            target.set(key, format_number(result));
        }
    }
    Ok(Outcome::Applied)
}

fn resolve(
    template: &Template,
    target: &Record,
    source: Option<&Record>,
    store: &GlobalStore,
) -> Result<String, RuleErrorKind> {
    resolve_template(template, source.unwrap_or(target), store)
}

/// Returns the key's current value, owned so the record can be mutated next.
fn require_key(record: &Record, key: &str, action: ActionKind) -> Result<String, RuleErrorKind> {
    record
        .get(key)
        .map(str::to_string)
        .ok_or_else(|| RuleErrorKind::MissingKey {
            action,
            key: key.to_string(),
        })
}

fn forbid_key(record: &Record, key: &str, action: ActionKind) -> Result<(), RuleErrorKind> {
    if record.contains_key(key) {
        return Err(RuleErrorKind::KeyExists {
            action,
            key: key.to_string(),
        });
    }
    Ok(())
}

/// The key's integer value and the pattern's mask.
fn bitfield(
    record: &Record,
    key: &str,
    pattern: &str,
    action: ActionKind,
) -> Result<(i64, i64), RuleErrorKind> {
    let value = require_key(record, key, action)?;
    let mask = bit_mask(pattern).ok_or_else(|| RuleErrorKind::InvalidBitPattern {
        action,
        pattern: pattern.to_string(),
    })?;
    let Ok(current) = value.trim().parse::<i64>() else {
        return Err(RuleErrorKind::NotBitfield {
            action,
            key: key.to_string(),
            value,
        });
    };
    Ok((current, mask))
}

fn numeric(text: &str, action: ActionKind) -> Result<f64, RuleErrorKind> {
    parse_number(text).ok_or_else(|| RuleErrorKind::NotNumeric {
        action,
        value: text.to_string(),
    })
}
