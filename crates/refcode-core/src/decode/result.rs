//! Decode results
//!
//! Serialized shape matches the JSON consumed by existing front ends:
//! `{"categoryFile", "prefix", "parsed": {"segments", "options", "leftover"}}`
//! on success and `{"error", "ref"}` otherwise.

use serde::Serialize;

use crate::error::{RefcodeError, Result};

pub const UNKNOWN: &str = "Unknown";
pub const FREE_VALUE: &str = "(value)";
pub const NUMERIC_VALUE: &str = "(numeric value)";
pub const KNOWN_KEY_NO_TEXT: &str = "Known key (no mapping text)";
pub const UNKNOWN_OPTION: &str = "Unknown option";
pub const NO_MATCHING_CATEGORY: &str = "No matching category";

/// How a segment's meaning was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Code found in the block's map with text
    Mapped,
    /// Code found in the block's map with empty text
    KnownKey,
    /// Block has a vocabulary and the code is not in it
    Unknown,
    /// Fixed block without a vocabulary
    FreeValue,
    /// Digits taken by the variable block fallback
    Numeric,
}

impl Resolution {
    pub fn is_known(self) -> bool {
        matches!(self, Self::Mapped | Self::KnownKey)
    }
}

/// A decoded structure block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub name: String,
    pub code: String,
    pub meaning: String,
    #[serde(skip)]
    pub resolution: Resolution,
}

/// A decoded trailing option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedOption {
    pub code: String,
    pub meaning: String,
    #[serde(skip)]
    pub known: bool,
}

/// Tokenizer output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parsed {
    pub segments: Vec<Segment>,
    pub options: Vec<DecodedOption>,
    /// Unconsumed text; empty whenever tokenizing completes
    pub leftover: String,
}

impl Parsed {
    /// Whether any segment or option fell through to a fallback meaning
    pub fn has_unknowns(&self) -> bool {
        self.segments
            .iter()
            .any(|s| s.resolution == Resolution::Unknown)
            || self.options.iter().any(|o| !o.known)
    }
}

/// Successful decode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// Resource id of the matched category
    #[serde(rename = "categoryFile")]
    pub category_id: String,
    pub prefix: String,
    #[serde(skip)]
    pub had_leading_marker: bool,
    pub parsed: Parsed,
}

/// No category prefix matched the reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoCategoryMatch {
    pub error: &'static str,
    /// Reference as given by the caller
    #[serde(rename = "ref")]
    pub reference: String,
}

impl NoCategoryMatch {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            error: NO_MATCHING_CATEGORY,
            reference: reference.into(),
        }
    }
}

/// Outcome of decoding one reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DecodeResult {
    Decoded(Decoded),
    NoMatch(NoCategoryMatch),
}

impl DecodeResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }

    pub fn as_decoded(&self) -> Option<&Decoded> {
        match self {
            Self::Decoded(decoded) => Some(decoded),
            Self::NoMatch(_) => None,
        }
    }

    /// Convert a missing match into [`RefcodeError::NoCategoryMatch`]
    pub fn into_result(self) -> Result<Decoded> {
        match self {
            Self::Decoded(decoded) => Ok(decoded),
            Self::NoMatch(miss) => Err(RefcodeError::NoCategoryMatch {
                reference: miss.reference,
            }),
        }
    }
}
