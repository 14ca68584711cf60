//! # Decode Module
//!
//! Turns a reference string into segments and options.
//!
//! - `tokenizer`: structure block and option tokenizing of a prefix remainder
//! - `decoder`: category matching plus tokenizing
//! - `result`: serializable decode results

mod decoder;
mod result;
mod tokenizer;

pub use decoder::{decode, ReferenceDecoder};
pub use result::{
    DecodeResult, Decoded, DecodedOption, NoCategoryMatch, Parsed, Resolution, Segment,
    FREE_VALUE, KNOWN_KEY_NO_TEXT, NO_MATCHING_CATEGORY, NUMERIC_VALUE, UNKNOWN, UNKNOWN_OPTION,
};
pub use tokenizer::{tokenize, OPTION_SEPARATORS, STRUCTURE_SEPARATOR};
