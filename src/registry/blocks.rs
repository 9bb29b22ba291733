//! Block-type registry service.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Registry of known block types with human-readable labels.
///
/// The editing surface offers these as assignment targets; the publish pass
/// silently skips styles whose block is no longer registered.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    /// Block name to display title.
    blocks: RwLock<HashMap<String, String>>,
}

impl BlockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block type. Re-registering a name replaces its title.
    pub fn register(&self, name: impl Into<String>, title: impl Into<String>) {
        self.blocks.write().insert(name.into(), title.into());
    }

    /// Remove a block type.
    pub fn unregister(&self, name: &str) {
        self.blocks.write().remove(name);
    }

    /// Whether a block name is currently registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.blocks.read().contains_key(name)
    }

    /// Display label for a block: its title, falling back to the raw name.
    ///
    /// Returns the raw name even for unregistered blocks, so list screens
    /// can still show a value the registry no longer knows.
    pub fn label(&self, name: &str) -> String {
        let blocks = self.blocks.read();
        match blocks.get(name) {
            Some(title) if !title.is_empty() => title.clone(),
            _ => name.to_string(),
        }
    }

    /// All registered blocks as `(name, label)`, sorted case-insensitively
    /// by label.
    pub fn all(&self) -> Vec<(String, String)> {
        let blocks = self.blocks.read();
        let mut options: Vec<(String, String)> = blocks
            .iter()
            .map(|(name, title)| {
                let label = if title.is_empty() {
                    name.clone()
                } else {
                    title.clone()
                };
                (name.clone(), label)
            })
            .collect();

        options.sort_by(|a, b| {
            a.1.to_lowercase()
                .cmp(&b.1.to_lowercase())
                .then_with(|| a.0.cmp(&b.0))
        });
        options
    }

    /// Number of registered blocks.
    pub fn count(&self) -> usize {
        self.blocks.read().len()
    }
}
