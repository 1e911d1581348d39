//! Template resolution against a record and the global store.

use super::error::RuleErrorKind;
use super::store::GlobalStore;
use crate::parser::{Segment, Template};
use crate::types::Record;

/// Resolve a compiled template.
///
/// `{key}` reads from `record`, `{global.name}` from `store`. A template with
/// no segments is an error, as is any reference to a missing key or global.
///
/// # Example
///
/// ```
/// use ripent::parser::parse_template;
/// use ripent::{GlobalStore, record, resolve_template};
///
/// let template = parse_template("cccc {target}!").unwrap();
/// let source = record! { "target" => "aaaa" };
/// let value = resolve_template(&template, &source, &GlobalStore::default()).unwrap();
/// assert_eq!(value, "cccc aaaa!");
/// ```
pub fn resolve_template(
    template: &Template,
    record: &Record,
    store: &GlobalStore,
) -> Result<String, RuleErrorKind> {
    if template.is_empty() {
        return Err(RuleErrorKind::EmptyTemplate);
    }

    let mut result = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => result.push_str(text),
            Segment::Key(key) => {
                let value = record
                    .get(key)
                    .ok_or_else(|| RuleErrorKind::UndefinedKey { key: key.clone() })?;
                result.push_str(value);
            }
            Segment::Global(name) => {
                let value = store
                    .get(name)
                    .ok_or_else(|| RuleErrorKind::UndefinedGlobal { name: name.clone() })?;
                result.push_str(value);
            }
        }
    }
    Ok(result)
}
