use std::fs::read_to_string;
use std::path::Path;

use tracing::debug;

use super::block::apply_block;
use super::error::{LoadError, RuleError, RuleWarning};
use super::store::GlobalStore;
use super::working_set::WorkingSet;
use crate::parser::{ParseError, RuleBlock, parse_blocks};
use crate::types::Record;

/// A parsed rule file: its blocks plus the global store they share.
///
/// Blocks never change after parsing. The store is written by `store`
/// actions and persists across every call to [`RuleFile::apply_rules`] on
/// the same instance.
///
/// # Example
///
/// ```
/// use ripent::{RuleFile, record};
///
/// let mut rules = RuleFile::parse(
///     "{ match classname test_target; replace target bbbb }",
/// )
/// .unwrap();
/// let records = vec![
///     record! { "classname" => "test_target", "target" => "aaaa" },
///     record! { "classname" => "test_ignore", "target" => "aaaa" },
/// ];
/// let result = rules.apply_rules("level", records).unwrap();
/// assert_eq!(result[0].get("target"), Some("bbbb"));
/// assert_eq!(result[1].get("target"), Some("aaaa"));
/// ```
#[derive(Debug, Clone)]
pub struct RuleFile {
    blocks: Vec<RuleBlock>,
    store: GlobalStore,
    source: String,
}

/// Parse rule source into a [`RuleFile`] with an empty global store.
pub fn parse_rule_file(source: &str) -> Result<RuleFile, ParseError> {
    RuleFile::parse(source)
}

impl RuleFile {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Ok(Self {
            blocks: parse_blocks(source)?,
            store: GlobalStore::default(),
            source: source.to_string(),
        })
    }

    /// Read and parse a rule file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading rule file");
        Self::parse(&content).map_err(|error| LoadError::Parse {
            path: path.to_path_buf(),
            content: content.clone(),
            error,
        })
    }

    pub fn blocks(&self) -> &[RuleBlock] {
        &self.blocks
    }

    /// The text this file was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Apply every block in order to `records` for the level `target_name`.
    ///
    /// Any error aborts the whole application; the input records are
    /// consumed either way. Warnings are discarded, see
    /// [`RuleFile::apply_rules_with_warnings`].
    pub fn apply_rules(
        &mut self,
        target_name: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, RuleError> {
        self.apply_rules_with_warnings(target_name, records)
            .map(|(records, _)| records)
    }

    /// Like [`RuleFile::apply_rules`], also returning the warnings raised.
    pub fn apply_rules_with_warnings(
        &mut self,
        target_name: &str,
        records: Vec<Record>,
    ) -> Result<(Vec<Record>, Vec<RuleWarning>), RuleError> {
        let mut set = WorkingSet::new(records);
        let mut warnings = Vec::new();

        for block in &self.blocks {
            set.reset_exclusions();
            let spawned = apply_block(block, target_name, &mut set, &mut self.store, &mut warnings)?;
            set.append(spawned);
            let deleted = set.sweep();
            if deleted > 0 {
                debug!(line = block.line, deleted, "removed records");
            }
        }

        debug!(
            target = target_name,
            records = set.len(),
            warnings = warnings.len(),
            "applied rule file"
        );
        Ok((set.into_records(), warnings))
    }

    /// A value previously written by a `store` action.
    pub fn try_get_store_value(&self, name: &str) -> Option<&str> {
        self.store.get(name)
    }

    /// Every stored global, in first-stored order.
    pub fn store_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.store.iter()
    }

    pub fn store(&self) -> &GlobalStore {
        &self.store
    }
}
