//! Append-only binding sets for template rendering.

use scrivano_error::{ChainError, ChainErrorKind, ScrivanoResult};
use std::collections::BTreeMap;

/// String bindings with append-only, unique-key semantics.
///
/// Caller inputs and step outputs accumulate here over an execution. A key,
/// once bound, is never overwritten: a second `insert` under the same key
/// is an error. Iteration follows key order, so rendering and reporting
/// are deterministic.
///
/// # Examples
///
/// ```
/// use scrivano_core::BindingSet;
///
/// # fn main() -> scrivano_error::ScrivanoResult<()> {
/// let mut bindings = BindingSet::new();
/// bindings.insert("topic", "volcanoes")?;
/// assert_eq!(bindings.get("topic"), Some("volcanoes"));
///
/// // Rebinding an existing key is refused.
/// assert!(bindings.insert("topic", "earthquakes").is_err());
/// assert_eq!(bindings.get("topic"), Some("volcanoes"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    entries: BTreeMap<String, String>,
}

impl BindingSet {
    /// Creates an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateBinding` when `key` is already bound; the existing
    /// value is untouched.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> ScrivanoResult<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(ChainError::new(ChainErrorKind::DuplicateBinding(key)).into());
        }
        self.entries.insert(key, value.into());
        Ok(())
    }

    /// Look up the value bound to `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is bound.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate bindings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
