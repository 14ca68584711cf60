//! Category Matcher
//!
//! Picks the category a reference belongs to by prefix.

use tracing::debug;

use super::definition::CategoryDefinition;
use super::store::CategoryStore;

/// Optional leading character some references carry in front of the prefix
pub const LEADING_MARKER: char = 'I';

/// A reference trimmed and uppercased for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRef {
    text: String,
    had_leading_marker: bool,
}

impl NormalizedRef {
    pub fn new(reference: &str) -> Self {
        let text = reference.trim().to_uppercase();
        let had_leading_marker = text.starts_with(LEADING_MARKER);
        Self {
            text,
            had_leading_marker,
        }
    }

    /// Full normalized text, marker included
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Text compared against prefixes, marker removed
    pub fn working(&self) -> &str {
        if self.had_leading_marker {
            &self.text[LEADING_MARKER.len_utf8()..]
        } else {
            &self.text
        }
    }

    pub fn had_leading_marker(&self) -> bool {
        self.had_leading_marker
    }
}

/// Winning category for a reference
#[derive(Debug, Clone, Copy)]
pub struct CategoryMatch<'a> {
    /// Resource id of the category
    pub id: &'a str,
    pub category: &'a CategoryDefinition,
    /// Prefix that matched, as written in the definition
    pub prefix: &'a str,
    pub had_leading_marker: bool,
}

/// Prefix matcher over a borrowed store
#[derive(Debug, Clone, Copy)]
pub struct CategoryMatcher<'a> {
    store: &'a CategoryStore,
}

impl<'a> CategoryMatcher<'a> {
    pub fn new(store: &'a CategoryStore) -> Self {
        Self { store }
    }

    /// First `(category, prefix)` in store order whose prefix starts the
    /// normalized reference.
    pub fn find(&self, reference: &NormalizedRef) -> Option<CategoryMatch<'a>> {
        let working = reference.working();

        for (id, category) in self.store.iter() {
            if let Some(prefix) = category
                .prefixes
                .iter()
                .find(|p| working.starts_with(p.as_str()))
            {
                debug!(category = id, prefix = %prefix, "reference matched category");
                return Some(CategoryMatch {
                    id,
                    category,
                    prefix,
                    had_leading_marker: reference.had_leading_marker(),
                });
            }
        }

        debug!(reference = reference.as_str(), "no category prefix matched");
        None
    }
}
