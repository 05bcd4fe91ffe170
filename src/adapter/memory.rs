//! # In-Memory Resource Data
//!
//! A [`ResourceData`] that keeps declared values and recorded state in two
//! maps. State documents are plain JSON objects of string attributes; declared
//! plaintext is held in memory only and is never written by [`save_state`].
//!
//! [`save_state`]: InMemoryResourceData::save_state

use super::ResourceData;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Default)]
pub struct InMemoryResourceData {
    declared: BTreeMap<String, String>,
    state: BTreeMap<String, String>,
    pending: BTreeSet<String>,
}

impl std::fmt::Debug for InMemoryResourceData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Declared values may be secrets, only show attribute names
        f.debug_struct("InMemoryResourceData")
            .field("declared", &self.declared.keys().collect::<Vec<_>>())
            .field("state", &self.state.keys().collect::<Vec<_>>())
            .field("pending", &self.pending)
            .finish()
    }
}

impl InMemoryResourceData {
    #[must_use]
    pub fn new(declared: BTreeMap<String, String>, state: BTreeMap<String, String>) -> Self {
        Self {
            declared,
            state,
            pending: BTreeSet::new(),
        }
    }

    /// Load declared values and recorded state from two JSON documents.
    /// A missing state file means the resource has never been applied.
    pub fn load(declared_path: &Path, state_path: &Path) -> Result<Self> {
        let declared = read_string_map(declared_path)?;
        let state = if state_path.exists() {
            read_string_map(state_path)?
        } else {
            BTreeMap::new()
        };
        Ok(Self::new(declared, state))
    }

    /// Write recorded state back to disk
    pub fn save_state(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.state)
            .context("Failed to serialize resource state")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write state file {}", path.display()))
    }

    /// Record that the reconciler plans to update `key`
    pub fn mark_changed(&mut self, key: &str) {
        self.pending.insert(key.to_string());
    }

    pub fn set_declared(&mut self, key: &str, value: impl Into<String>) {
        self.declared.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn state(&self) -> &BTreeMap<String, String> {
        &self.state
    }
}

impl ResourceData for InMemoryResourceData {
    fn get_str(&self, key: &str) -> Option<String> {
        self.declared
            .get(key)
            .or_else(|| self.state.get(key))
            .cloned()
    }

    fn set_str(&mut self, key: &str, value: String) {
        self.state.insert(key.to_string(), value);
    }

    fn has_change(&self, key: &str) -> bool {
        if self.pending.contains(key) {
            return true;
        }
        match (self.declared.get(key), self.state.get(key)) {
            (Some(declared), Some(recorded)) => declared != recorded,
            (Some(_), None) | (None, Some(_)) => !self.state.contains_key(&super::hash_key(key)),
            (None, None) => false,
        }
    }
}

fn read_string_map(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as a JSON object of strings", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_prefers_declared_value() {
        let mut data = InMemoryResourceData::default();
        data.set_str("name", "recorded".to_string());
        data.set_declared("name", "declared");
        assert_eq!(data.get_str("name").as_deref(), Some("declared"));
        assert_eq!(data.get_str("missing"), None);
    }

    #[test]
    fn test_has_change_for_plain_attributes() {
        let mut data = InMemoryResourceData::default();
        data.set_str("name", "a".to_string());
        data.set_declared("name", "a");
        assert!(!data.has_change("name"));
        data.set_declared("name", "b");
        assert!(data.has_change("name"));
    }

    #[test]
    fn test_secret_attribute_changes_only_when_marked() {
        let mut data = InMemoryResourceData::default();
        data.set_declared("password", "s3cr3t");
        data.set_str("password_hash", "$2b$04$whatever".to_string());
        assert!(!data.has_change("password"));
        data.mark_changed("password");
        assert!(data.has_change("password"));
    }

    #[test]
    fn test_debug_hides_values() {
        let mut data = InMemoryResourceData::default();
        data.set_declared("password", "s3cr3t");
        let out = format!("{data:?}");
        assert!(out.contains("password"));
        assert!(!out.contains("s3cr3t"));
    }
}
