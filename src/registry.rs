//! Ordered name -> target tables for known sites and applications
//!
//! Keys are canonical lowercase names. Scans follow construction order, so
//! classification stays deterministic when several names could match.

use crate::config::RegistryItem;

#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub name: String,
    pub target: String,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Build from config items. Names are lowercased and trimmed; empty names
    /// are dropped and the first occurrence wins on duplicates.
    pub fn new(items: &[RegistryItem]) -> Self {
        let mut entries: Vec<RegistryEntry> = Vec::with_capacity(items.len());
        for item in items {
            let name = item.name.trim().to_lowercase();
            if name.is_empty() || entries.iter().any(|e| e.name == name) {
                continue;
            }
            entries.push(RegistryEntry {
                name,
                target: item.target.clone(),
            });
        }
        Self { entries }
    }

    pub fn entries(&self) -> std::slice::Iter<'_, RegistryEntry> {
        self.entries.iter()
    }

    /// First entry whose name appears somewhere in `text`.
    pub fn find_in_text(&self, text: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| text.contains(&e.name))
    }
}
