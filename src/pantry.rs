use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::ingredient::{normalize, same_ingredient};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PantryError {
    #[error("Pantry item \"{0}\" already exists.")]
    RenameConflict(String),
}

/// Ordered pantry inventory. No two entries are the same ingredient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pantry {
    items: Vec<String>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pantry through `add`, so seeds are normalized and deduplicated.
    pub fn seeded<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pantry = Self::new();
        for item in seed {
            pantry.add(item.as_ref());
        }
        pantry
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| same_ingredient(item, name))
    }

    /// Normalized names of everything in stock.
    pub fn normalized(&self) -> HashSet<String> {
        self.items.iter().map(|item| normalize(item)).collect()
    }

    /// Appends the normalized form of `name`. Empty input and duplicates are
    /// ignored. Returns whether the pantry changed.
    pub fn add(&mut self, name: &str) -> bool {
        let normalized = normalize(name);
        if normalized.is_empty() || self.contains(&normalized) {
            debug!(item = name, "pantry add ignored");
            return false;
        }
        debug!(item = %normalized, "pantry add");
        self.items.push(normalized);
        true
    }

    /// Removes the entry stored exactly as `name`.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != name);
        let removed = self.items.len() != before;
        debug!(item = name, removed, "pantry remove");
        removed
    }

    /// Replaces the entry matching `old` with `new` trimmed, keeping the
    /// caller's casing. Fails without touching the pantry when `new` names
    /// a different entry that is already stocked.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<bool, PantryError> {
        let replacement = new.trim();
        if replacement.is_empty() {
            return Ok(false);
        }

        let conflict = self
            .items
            .iter()
            .any(|item| same_ingredient(item, replacement) && !same_ingredient(item, old));
        if conflict {
            debug!(old, new = replacement, "pantry rename conflict");
            return Err(PantryError::RenameConflict(replacement.to_string()));
        }

        let mut changed = false;
        for item in self.items.iter_mut() {
            if same_ingredient(item, old) && item != replacement {
                *item = replacement.to_string();
                changed = true;
            }
        }
        debug!(old, new = replacement, changed, "pantry rename");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_normalizes_and_ignores_duplicates() {
        let mut pantry = Pantry::new();
        assert!(pantry.add("  Chickpeas "));
        assert!(!pantry.add("CHICKPEAS"));
        assert!(!pantry.add("chickpeas"));
        assert_eq!(pantry.items(), &["chickpeas".to_string()]);
    }

    #[test]
    fn test_add_ignores_blank_input() {
        let mut pantry = Pantry::new();
        assert!(!pantry.add(""));
        assert!(!pantry.add("   "));
        assert!(pantry.is_empty());
    }

    #[test]
    fn test_seeded_deduplicates() {
        let pantry = Pantry::seeded(["Rice", "rice", "Dal"]);
        assert_eq!(pantry.items(), &["rice".to_string(), "dal".to_string()]);
    }

    #[test]
    fn test_remove_is_exact_and_silent_when_missing() {
        let mut pantry = Pantry::new();
        pantry.items.push("Paneer".to_string());
        assert!(!pantry.remove("paneer"));
        assert!(!pantry.remove("ghee"));
        assert!(pantry.remove("Paneer"));
        assert!(pantry.is_empty());
    }

    #[test]
    fn test_rename_preserves_caller_casing() {
        let mut pantry = Pantry::seeded(["rice", "dal"]);
        assert_eq!(pantry.rename("RICE", "  Basmati Rice "), Ok(true));
        assert_eq!(
            pantry.items(),
            &["Basmati Rice".to_string(), "dal".to_string()]
        );
    }

    #[test]
    fn test_rename_to_own_name_in_other_case_is_allowed() {
        let mut pantry = Pantry::seeded(["rice"]);
        assert_eq!(pantry.rename("rice", "Rice"), Ok(true));
        assert_eq!(pantry.items(), &["Rice".to_string()]);
    }

    #[test]
    fn test_rename_conflict_leaves_pantry_unchanged() {
        let mut pantry = Pantry::seeded(["rice", "dal"]);
        let before = pantry.clone();
        assert_eq!(
            pantry.rename("rice", " DAL"),
            Err(PantryError::RenameConflict("DAL".to_string()))
        );
        assert_eq!(pantry, before);
    }

    #[test]
    fn test_rename_missing_or_blank_is_a_no_op() {
        let mut pantry = Pantry::seeded(["rice"]);
        assert_eq!(pantry.rename("ghee", "butter"), Ok(false));
        assert_eq!(pantry.rename("rice", "   "), Ok(false));
        assert_eq!(pantry.items(), &["rice".to_string()]);
    }
}
