pub mod category;
pub mod config;
pub mod decode;
pub mod error;
pub mod loader;

pub use category::{
    CategoryDefinition, CategoryMatch, CategoryMatcher, CategoryStore, Dictionary, NormalizedRef,
    PrefixCollision, StructureBlock,
};
pub use config::{CatalogConfig, Config};
pub use decode::{
    decode, tokenize, DecodeResult, Decoded, DecodedOption, NoCategoryMatch, Parsed,
    ReferenceDecoder, Resolution, Segment,
};
pub use error::{RefcodeError, Result};
pub use loader::{analyze, CatalogLoader, LoadReport, SkippedResource, DEFAULT_RESOURCES};
