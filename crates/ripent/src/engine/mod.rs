//! Rule application.
//!
//! A [`RuleFile`] applies its blocks in order to a list of [`Record`]s.
//! Each block first runs its selectors to exclude records, then runs its
//! actions on whatever is left (or on freshly spawned records), and finally
//! the records marked for deletion are swept from the whole list.
//!
//! [`Record`]: crate::Record

mod action;
mod block;
mod error;
pub(crate) mod numeric;
mod resolve;
mod rule_file;
mod rule_set;
mod selector;
mod store;
mod upgrade;
mod working_set;

pub use error::{LoadError, RuleError, RuleErrorKind, RuleWarning};
pub use resolve::resolve_template;
pub use rule_file::{RuleFile, parse_rule_file};
pub use rule_set::{RuleSet, RuleSetError};
pub use store::GlobalStore;
pub use upgrade::{KEY_UPGRADES, KeyUpgrade, UpgradeReport, UpgradeWarning, upgrade_keys};
