use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter};
use serde::{Deserialize, Serialize};

/// One entity: an insertion-ordered map of string keys to string values.
///
/// Records serialize as flat objects, so a level's entity list maps directly
/// onto a JSON array of objects.
///
/// Equality compares contents and ignores key order; use [`Record::iter`]
/// when order matters.
///
/// # Example
///
/// ```
/// use ripent::{Record, record};
///
/// let mut light = record! { "classname" => "light", "angle" => "90" };
/// assert!(light.rename("angle", "yaw"));
/// assert_eq!(light.get("yaw"), Some("90"));
/// assert_eq!(light.keys().collect::<Vec<_>>(), vec!["classname", "yaw"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    entries: IndexMap<String, String>,
}

impl Record {
    /// Creates a record with no keys.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The record's `classname`, if it has one.
    pub fn classname(&self) -> Option<&str> {
        self.get("classname")
    }

    /// Inserts or overwrites a key.
    ///
    /// An existing key keeps its position; a new key is appended. Returns the
    /// previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Overwrites the value of an existing key. Returns `false` and leaves the
    /// record untouched when the key is absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.entries.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Removes a key, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// Moves the value of `from` to `to`, appending `to` at the end.
    ///
    /// Returns `false` without modifying the record when `from` is missing or
    /// `to` already exists.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if self.entries.contains_key(to) {
            return false;
        }
        let Some(value) = self.entries.shift_remove(from) else {
            return false;
        };
        self.entries.insert(to.to_string(), value);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
