use std::mem::take;

use crate::types::Record;

/// The records a rule file is being applied to.
///
/// Exclusion and deletion marks live beside the records, addressed by index,
/// and only for the duration of one application.
#[derive(Debug, Default)]
pub(crate) struct WorkingSet {
    pub(crate) records: Vec<Record>,
    pub(crate) excluded: Vec<bool>,
    pub(crate) pending_delete: Vec<bool>,
}

impl WorkingSet {
    pub(crate) fn new(records: Vec<Record>) -> Self {
        let len = records.len();
        Self {
            records,
            excluded: vec![false; len],
            pending_delete: vec![false; len],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Clears every exclusion mark. Called before each block.
    pub(crate) fn reset_exclusions(&mut self) {
        self.excluded.fill(false);
    }

    /// Indices of records no selector has excluded.
    pub(crate) fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.excluded
            .iter()
            .enumerate()
            .filter(|(_, excluded)| !**excluded)
            .map(|(index, _)| index)
    }

    /// Appends records spawned by a block.
    pub(crate) fn append(&mut self, spawned: Vec<Record>) {
        let total = self.records.len() + spawned.len();
        self.records.extend(spawned);
        self.excluded.resize(total, false);
        self.pending_delete.resize(total, false);
    }

    /// Removes every record marked for deletion, across the whole set.
    /// Returns how many were removed.
    pub(crate) fn sweep(&mut self) -> usize {
        let before = self.records.len();
        let marks = take(&mut self.pending_delete);
        let mut marks_iter = marks.iter();
        self.records
            .retain(|_| !marks_iter.next().copied().unwrap_or(false));
        let after = self.records.len();
        self.excluded = vec![false; after];
        self.pending_delete = vec![false; after];
        before - after
    }

    pub(crate) fn into_records(self) -> Vec<Record> {
        self.records
    }
}
