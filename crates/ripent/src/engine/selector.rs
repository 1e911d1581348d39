use ripent_semantics::SelectorKind;

use super::error::RuleErrorKind;
use super::resolve::resolve_template;
use super::store::GlobalStore;
use crate::parser::Selector;
use crate::types::Record;

/// Whether `selector` excludes `record` from its block's actions.
///
/// `match` and `dont-match` exclude records lacking the key before the
/// expected value is resolved.
pub(crate) fn excludes(
    selector: &Selector,
    record: &Record,
    store: &GlobalStore,
) -> Result<bool, RuleErrorKind> {
    let Some(actual) = record.get(&selector.key) else {
        return Ok(selector.kind != SelectorKind::DontHave);
    };
    match (selector.kind, &selector.value) {
        (SelectorKind::Have, _) => Ok(false),
        (SelectorKind::DontHave, _) => Ok(true),
        (SelectorKind::Match, Some(expected)) => {
            Ok(actual != resolve_template(expected, record, store)?)
        }
        (SelectorKind::DontMatch, Some(expected)) => {
            Ok(actual == resolve_template(expected, record, store)?)
        }
        (SelectorKind::Match | SelectorKind::DontMatch, None) => {
            Err(RuleErrorKind::EmptyTemplate)
        }
    }
}
