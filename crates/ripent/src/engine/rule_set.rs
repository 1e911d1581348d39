use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::error::{LoadError, RuleError, RuleWarning};
use super::rule_file::RuleFile;
use crate::types::Record;

/// A rule file in a set failed to apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error("rule file {index} ('{name}'): {error}")]
    Rule {
        /// Position of the failing file in the set.
        index: usize,
        name: String,
        #[source]
        error: RuleError,
    },
}

/// Rule files applied one after another.
///
/// Each file runs all of its blocks before the next file starts, against the
/// records the previous file produced.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    files: Vec<(String, RuleFile)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rule files from disk, named by their paths.
    pub fn load<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self, LoadError> {
        let mut set = Self::new();
        for path in paths {
            let path = path.as_ref();
            set.push(path.display().to_string(), RuleFile::load(path)?);
        }
        Ok(set)
    }

    pub fn push(&mut self, name: impl Into<String>, file: RuleFile) {
        self.files.push((name.into(), file));
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleFile)> {
        self.files.iter().map(|(name, file)| (name.as_str(), file))
    }

    pub fn apply(
        &mut self,
        target_name: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, RuleSetError> {
        self.apply_with_warnings(target_name, records)
            .map(|(records, _)| records)
    }

    /// Apply every file in order, collecting the warnings of all of them.
    pub fn apply_with_warnings(
        &mut self,
        target_name: &str,
        mut records: Vec<Record>,
    ) -> Result<(Vec<Record>, Vec<RuleWarning>), RuleSetError> {
        let mut warnings = Vec::new();
        for (index, (name, file)) in self.files.iter_mut().enumerate() {
            debug!(index, name = name.as_str(), "applying rule file");
            let (next, mut raised) = file
                .apply_rules_with_warnings(target_name, records)
                .map_err(|error| RuleSetError::Rule {
                    index,
                    name: name.clone(),
                    error,
                })?;
            records = next;
            warnings.append(&mut raised);
        }
        Ok((records, warnings))
    }
}
