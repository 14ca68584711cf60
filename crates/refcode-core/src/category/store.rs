//! Category Store
//!
//! Loaded category definitions keyed by resource identifier.
//! Enumeration order is the order the caller inserted them in.

use super::definition::CategoryDefinition;

/// Ordered store of category definitions
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    entries: Vec<(String, CategoryDefinition)>,
}

/// Two categories claiming overlapping prefixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixCollision {
    /// Category that wins because it comes first
    pub winner: String,
    pub winner_prefix: String,
    /// Category whose prefix is reachable only through the winner
    pub shadowed: String,
    pub shadowed_prefix: String,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(resource id, definition)` pairs, keeping their order
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, CategoryDefinition)>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for (id, def) in entries {
            store.insert(id, def);
        }
        store
    }

    /// Add a definition at the end of the enumeration order.
    ///
    /// An existing id is replaced in place and keeps its position.
    pub fn insert(&mut self, id: impl Into<String>, def: CategoryDefinition) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = def,
            None => self.entries.push((id, def)),
        }
    }

    /// Category definition by resource id
    pub fn get(&self, id: &str) -> Option<&CategoryDefinition> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, def)| def)
    }

    /// All categories in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryDefinition)> {
        self.entries.iter().map(|(id, def)| (id.as_str(), def))
    }

    /// Resource ids in enumeration order
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prefix pairs across different categories where a later prefix starts
    /// with an earlier one, so references for the later category may be
    /// claimed by the earlier one.
    ///
    /// Diagnostic only; matching is unaffected.
    pub fn prefix_collisions(&self) -> Vec<PrefixCollision> {
        let mut collisions = Vec::new();
        for (i, (winner, winner_def)) in self.entries.iter().enumerate() {
            for (shadowed, shadowed_def) in &self.entries[i + 1..] {
                for wp in &winner_def.prefixes {
                    for sp in &shadowed_def.prefixes {
                        if sp.starts_with(wp.as_str()) {
                            collisions.push(PrefixCollision {
                                winner: winner.clone(),
                                winner_prefix: wp.clone(),
                                shadowed: shadowed.clone(),
                                shadowed_prefix: sp.clone(),
                            });
                        }
                    }
                }
            }
        }
        collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(prefixes: &[&str]) -> CategoryDefinition {
        CategoryDefinition {
            prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_store_keeps_insertion_order() {
        let store = CategoryStore::from_entries([
            ("NVR.json", def(&["DS-7"])),
            ("IPCamera.json", def(&["DS-2CD"])),
            ("PTZ.json", def(&["DS-2DE"])),
        ]);
        assert_eq!(store.ids(), vec!["NVR.json", "IPCamera.json", "PTZ.json"]);
        assert!(store.get("IPCamera.json").is_some());
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut store = CategoryStore::from_entries([("A", def(&["A"])), ("B", def(&["B"]))]);
        store.insert("A", def(&["AA"]));
        assert_eq!(store.ids(), vec!["A", "B"]);
        assert_eq!(store.get("A").unwrap().prefixes, vec!["AA"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_prefix_collisions() {
        let store = CategoryStore::from_entries([
            ("TurboHD.json", def(&["DS-2CE"])),
            ("TurboHDPTZ.json", def(&["DS-2CE7", "DS-2AE"])),
            ("IPCamera.json", def(&["DS-2CD"])),
        ]);
        let collisions = store.prefix_collisions();
        assert_eq!(
            collisions,
            vec![PrefixCollision {
                winner: "TurboHD.json".to_string(),
                winner_prefix: "DS-2CE".to_string(),
                shadowed: "TurboHDPTZ.json".to_string(),
                shadowed_prefix: "DS-2CE7".to_string(),
            }]
        );
    }

    #[test]
    fn test_later_shorter_prefix_is_not_a_collision() {
        let store =
            CategoryStore::from_entries([("PTZ.json", def(&["DS-2DE"])), ("Any.json", def(&["DS-"]))]);
        assert!(store.prefix_collisions().is_empty());
    }
}
