pub mod engine;
pub mod parser;
pub mod types;

pub use engine::{
    GlobalStore, KEY_UPGRADES, KeyUpgrade, LoadError, RuleError, RuleErrorKind, RuleFile,
    RuleSet, RuleSetError, RuleWarning, UpgradeReport, UpgradeWarning, parse_rule_file,
    resolve_template, upgrade_keys,
};
pub use parser::{LexError, ParseError, RuleBlock};
pub use ripent_semantics::{ActionKind, BlockKind, SelectorKind};
pub use types::Record;

/// Creates a [`Record`] from key-value pairs, keeping their order.
///
/// Keys and values may be anything convertible into `String`.
///
/// # Example
///
/// ```
/// use ripent::record;
///
/// let r = record! { "classname" => "light", "style" => 2.to_string() };
/// assert_eq!(r.len(), 2);
/// assert_eq!(r.get("style"), Some("2"));
/// assert_eq!(r.keys().next(), Some("classname"));
/// ```
#[macro_export]
macro_rules! record {
    {} => {
        $crate::Record::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut record = $crate::Record::new();
            $(
                record.insert($key, $value);
            )+
            record
        }
    };
}
