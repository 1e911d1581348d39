//! Legacy key upgrades applied to records before any rules run.

use thiserror::Error;
use tracing::debug;

use crate::types::Record;

/// One legacy key and how to rewrite it.
#[derive(Debug, Clone, Copy)]
pub struct KeyUpgrade {
    pub legacy_key: &'static str,
    pub new_key: &'static str,
    /// Builds the new value from the legacy one.
    pub convert: fn(&str) -> String,
}

/// Built-in upgrades.
pub const KEY_UPGRADES: &[KeyUpgrade] = &[KeyUpgrade {
    legacy_key: "angle",
    new_key: "angles",
    convert: yaw_to_angles,
}];

fn yaw_to_angles(yaw: &str) -> String {
    format!("0 {yaw} 0")
}

/// An upgrade that could not be applied because the new key already exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "could not upgrade key '{legacy_key}', {} already has key '{new_key}'",
    describe_entity(classname.as_deref())
)]
pub struct UpgradeWarning {
    pub legacy_key: &'static str,
    pub new_key: &'static str,
    /// Classname of the record, when it has one.
    pub classname: Option<String>,
}

fn describe_entity(classname: Option<&str>) -> String {
    match classname {
        Some(classname) => format!("entity '{classname}'"),
        None => "entity".to_string(),
    }
}

/// Outcome of [`upgrade_keys`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeReport {
    /// Number of keys rewritten.
    pub upgraded: usize,
    pub warnings: Vec<UpgradeWarning>,
}

/// Rewrite legacy keys in place using [`KEY_UPGRADES`].
///
/// The new key is appended and the legacy key removed. A record that already
/// has the new key is left untouched and reported as a warning.
///
/// # Example
///
/// ```
/// use ripent::{record, upgrade_keys};
///
/// let mut records = vec![record! { "classname" => "info_target", "angle" => "-90" }];
/// let report = upgrade_keys(&mut records);
/// assert_eq!(report.upgraded, 1);
/// assert_eq!(records[0].get("angles"), Some("0 -90 0"));
/// assert!(!records[0].contains_key("angle"));
/// ```
pub fn upgrade_keys(records: &mut [Record]) -> UpgradeReport {
    let mut report = UpgradeReport::default();
    for record in records.iter_mut() {
        for upgrade in KEY_UPGRADES {
            let Some(legacy) = record.get(upgrade.legacy_key) else {
                continue;
            };
            if record.contains_key(upgrade.new_key) {
                report.warnings.push(UpgradeWarning {
                    legacy_key: upgrade.legacy_key,
                    new_key: upgrade.new_key,
                    classname: record.classname().map(str::to_string),
                });
                continue;
            }
            let value = (upgrade.convert)(legacy);
            record.insert(upgrade.new_key, value);
            record.remove(upgrade.legacy_key);
            report.upgraded += 1;
        }
    }
    debug!(
        upgraded = report.upgraded,
        warnings = report.warnings.len(),
        "upgraded legacy keys"
    );
    report
}
