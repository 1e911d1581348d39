use indexmap::IndexMap;

/// Named values written by `store` and read through `{global.name}`.
///
/// Owned by a [`RuleFile`](crate::RuleFile) and kept across every
/// application of that file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalStore {
    values: IndexMap<String, String>,
}

impl GlobalStore {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Sets a value. Overwriting keeps the name's original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Iterates in first-stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
