//! Reference Decoder
//!
//! Matches a category, then tokenizes what follows its prefix.

use tracing::debug;

use crate::category::{CategoryMatcher, CategoryStore, NormalizedRef};

use super::result::{DecodeResult, Decoded, NoCategoryMatch};
use super::tokenizer::tokenize;

/// Decoder over a borrowed, fully loaded store
#[derive(Debug, Clone, Copy)]
pub struct ReferenceDecoder<'a> {
    store: &'a CategoryStore,
}

impl<'a> ReferenceDecoder<'a> {
    pub fn new(store: &'a CategoryStore) -> Self {
        Self { store }
    }

    pub fn decode(&self, reference: &str) -> DecodeResult {
        let normalized = NormalizedRef::new(reference);

        let Some(found) = CategoryMatcher::new(self.store).find(&normalized) else {
            return DecodeResult::NoMatch(NoCategoryMatch::new(reference));
        };

        let remainder = &normalized.working()[found.prefix.len()..];
        let parsed = tokenize(
            remainder,
            &found.category.structure,
            &found.category.options,
        );
        debug!(
            category = found.id,
            segments = parsed.segments.len(),
            options = parsed.options.len(),
            "decoded reference"
        );

        DecodeResult::Decoded(Decoded {
            category_id: found.id.to_string(),
            prefix: found.prefix.to_string(),
            had_leading_marker: found.had_leading_marker,
            parsed,
        })
    }
}

/// Decode one reference against `store`
pub fn decode(reference: &str, store: &CategoryStore) -> DecodeResult {
    ReferenceDecoder::new(store).decode(reference)
}
