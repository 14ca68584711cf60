//! # Category Module
//!
//! Product family definitions and prefix matching.
//!
//! A category describes one family of reference codes: the prefixes that
//! identify it, the positional structure blocks following the prefix, and a
//! dictionary of trailing option codes.
//!
//! ## Modules
//!
//! - `definition`: typed category definitions decoded from JSON resources
//! - `store`: ordered runtime store of definitions
//! - `matcher`: prefix matcher selecting the category for a reference
//!
//! ## Example
//!
//! ```rust
//! use refcode_core::category::{CategoryDefinition, CategoryMatcher, CategoryStore, NormalizedRef};
//!
//! let camera = CategoryDefinition::from_json(r#"{"prefixes": ["DS-2CD"], "structure": []}"#).unwrap();
//! let store = CategoryStore::from_entries([("IPCamera.json", camera)]);
//!
//! let found = CategoryMatcher::new(&store)
//!     .find(&NormalizedRef::new("ids-2cd2042"))
//!     .unwrap();
//! assert_eq!(found.id, "IPCamera.json");
//! assert_eq!(found.prefix, "DS-2CD");
//! assert!(found.had_leading_marker);
//! ```

mod definition;
mod matcher;
mod store;

// Re-exports
pub use definition::{CategoryDefinition, Dictionary, StructureBlock, VARIABLE_LENGTH};
pub use matcher::{CategoryMatch, CategoryMatcher, NormalizedRef, LEADING_MARKER};
pub use store::{CategoryStore, PrefixCollision};
