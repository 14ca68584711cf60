//! Category Definitions
//!
//! Typed form of a category resource. Resources are JSON documents of the shape
//!
//! ```json
//! {
//!   "prefixes": ["DS-2CD"],
//!   "structure": [
//!     { "name": "Series", "length": 1, "map": { "2": "2MP" } },
//!     { "name": "Type", "length": "variable", "map": { "T": "Turret" } }
//!   ],
//!   "options": { "IR": "Infrared" }
//! }
//! ```
//!
//! and are converted once, at load time, into [`CategoryDefinition`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Keyword accepted in place of an integer `length`.
pub const VARIABLE_LENGTH: &str = "variable";

/// Code to meaning dictionary with a precomputed prefix scan order.
///
/// Used both for structure block code maps and for category option tables.
/// Keys are scanned longest first. Equal lengths are scanned in sorted key
/// order, not in the order the resource lists them, so keys differing only in
/// case (`"IR"` before `"Ir"`) resolve to the same code every time.
///
/// A `null` text in the resource is kept as an empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<String>>",
    into = "BTreeMap<String, String>"
)]
pub struct Dictionary {
    entries: BTreeMap<String, String>,
    scan_order: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact lookup
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest key that is a case-insensitive prefix of `text`.
    ///
    /// Returns the key as written in the dictionary together with its text.
    pub fn longest_prefix_of(&self, text: &str) -> Option<(&str, &str)> {
        self.scan_order
            .iter()
            .find(|key| starts_with_ignore_case(text, key))
            .and_then(|key| self.entries.get_key_value(key))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for Dictionary {
    fn from(entries: BTreeMap<String, String>) -> Self {
        let mut scan_order: Vec<String> = entries
            .keys()
            .filter(|k| !k.is_empty())
            .cloned()
            .collect();
        // stable: ties keep BTreeMap order
        scan_order.sort_by(|a, b| b.len().cmp(&a.len()));
        Self {
            entries,
            scan_order,
        }
    }
}

impl From<BTreeMap<String, Option<String>>> for Dictionary {
    fn from(entries: BTreeMap<String, Option<String>>) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k, v.unwrap_or_default()))
            .collect::<BTreeMap<_, _>>()
            .into()
    }
}

impl From<Dictionary> for BTreeMap<String, String> {
    fn from(dict: Dictionary) -> Self {
        dict.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<BTreeMap<_, _>>()
            .into()
    }
}

/// One positional field of a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub enum StructureBlock {
    /// Consumes exactly `width` characters.
    Fixed {
        name: String,
        width: usize,
        codes: Dictionary,
    },
    /// Width decided by the longest matching code, a 1-3 digit run, or a
    /// single character.
    Variable { name: String, codes: Dictionary },
}

impl StructureBlock {
    pub fn fixed(name: impl Into<String>, width: usize, codes: Dictionary) -> Self {
        Self::Fixed {
            name: name.into(),
            width,
            codes,
        }
    }

    pub fn variable(name: impl Into<String>, codes: Dictionary) -> Self {
        Self::Variable {
            name: name.into(),
            codes,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Fixed { name, .. } | Self::Variable { name, .. } => name,
        }
    }

    pub fn codes(&self) -> &Dictionary {
        match self {
            Self::Fixed { codes, .. } | Self::Variable { codes, .. } => codes,
        }
    }
}

/// Resource-level representation of a block
#[derive(Serialize, Deserialize)]
struct RawBlock {
    #[serde(default)]
    name: String,
    length: RawLength,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    map: Dictionary,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawLength {
    Width(usize),
    Keyword(String),
}

impl TryFrom<RawBlock> for StructureBlock {
    type Error = String;

    fn try_from(raw: RawBlock) -> std::result::Result<Self, Self::Error> {
        match raw.length {
            RawLength::Width(width) => Ok(Self::Fixed {
                name: raw.name,
                width,
                codes: raw.map,
            }),
            RawLength::Keyword(k) if k == VARIABLE_LENGTH => Ok(Self::Variable {
                name: raw.name,
                codes: raw.map,
            }),
            RawLength::Keyword(k) => Err(format!(
                "block '{}': length must be an integer or \"{}\", got \"{}\"",
                raw.name, VARIABLE_LENGTH, k
            )),
        }
    }
}

impl From<StructureBlock> for RawBlock {
    fn from(block: StructureBlock) -> Self {
        match block {
            StructureBlock::Fixed { name, width, codes } => RawBlock {
                name,
                length: RawLength::Width(width),
                map: codes,
            },
            StructureBlock::Variable { name, codes } => RawBlock {
                name,
                length: RawLength::Keyword(VARIABLE_LENGTH.to_string()),
                map: codes,
            },
        }
    }
}

/// Encoding rules for one product family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Reference prefixes, checked in order
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Positional fields following the prefix
    #[serde(default)]
    pub structure: Vec<StructureBlock>,
    /// Trailing option codes
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub options: Dictionary,
}

impl CategoryDefinition {
    /// Parse a category resource
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// ASCII case-insensitive `starts_with` that never splits a character.
fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource() {
        let def = CategoryDefinition::from_json(
            r#"{
                "prefixes": ["DS-2CD"],
                "structure": [
                    {"name": "Series", "length": 1, "map": {"2": "2MP"}},
                    {"name": "Type", "length": "variable", "map": {"T": "Turret"}},
                    {"name": "Lens", "length": 2}
                ],
                "options": {"IR": "Infrared"}
            }"#,
        )
        .unwrap();

        assert_eq!(def.prefixes, vec!["DS-2CD"]);
        assert_eq!(def.structure.len(), 3);
        assert!(matches!(
            &def.structure[0],
            StructureBlock::Fixed { width: 1, .. }
        ));
        assert!(matches!(&def.structure[1], StructureBlock::Variable { .. }));
        assert_eq!(def.structure[1].name(), "Type");
        assert!(def.structure[2].codes().is_empty());
        assert_eq!(def.options.get("IR"), Some("Infrared"));
    }

    #[test]
    fn test_options_and_map_are_optional() {
        let def = CategoryDefinition::from_json(
            r#"{"prefixes": ["NVR"], "structure": [{"name": "Ch", "length": "variable"}]}"#,
        )
        .unwrap();
        assert!(def.options.is_empty());
        assert!(def.structure[0].codes().is_empty());
    }

    #[test]
    fn test_rejects_unknown_length_keyword() {
        let err = CategoryDefinition::from_json(
            r#"{"prefixes": ["X"], "structure": [{"name": "Bad", "length": "wide"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("wide"), "{}", err);
    }

    #[test]
    fn test_serialize_keeps_resource_shape() {
        let def = CategoryDefinition {
            prefixes: vec!["DS-2CD".to_string()],
            structure: vec![StructureBlock::variable(
                "Type",
                [("T", "Turret")].into_iter().collect(),
            )],
            options: Dictionary::new(),
        };
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["structure"][0]["length"], "variable");
        assert_eq!(value["structure"][0]["map"]["T"], "Turret");
        assert!(value.get("options").is_none());
    }

    #[test]
    fn test_longest_prefix_prefers_longer_key() {
        let dict: Dictionary = [("A", "y"), ("AB", "x"), ("ABC", "z")]
            .into_iter()
            .collect();
        assert_eq!(dict.longest_prefix_of("ABD"), Some(("AB", "x")));
        assert_eq!(dict.longest_prefix_of("abcd"), Some(("ABC", "z")));
        assert_eq!(dict.longest_prefix_of("B"), None);
    }

    #[test]
    fn test_null_text_loads_as_empty() {
        let def = CategoryDefinition::from_json(
            r#"{
                "prefixes": ["DS-2CD"],
                "structure": [{"name": "Type", "length": "variable", "map": {"T": null}}],
                "options": {"IR": null, "H": "Heater"}
            }"#,
        )
        .unwrap();

        assert_eq!(def.structure[0].codes().get("T"), Some(""));
        assert_eq!(def.options.get("IR"), Some(""));
        assert_eq!(def.options.longest_prefix_of("IR"), Some(("IR", "")));
        assert_eq!(def.options.get("H"), Some("Heater"));
    }

    #[test]
    fn test_equal_length_keys_scan_in_sorted_order() {
        let dict: Dictionary = [("Ir", "lower"), ("IR", "upper")].into_iter().collect();
        assert_eq!(dict.longest_prefix_of("IR"), Some(("IR", "upper")));
    }

    #[test]
    fn test_empty_key_never_matches_by_prefix() {
        let dict: Dictionary = [("", "nothing")].into_iter().collect();
        assert_eq!(dict.longest_prefix_of("ABC"), None);
        assert_eq!(dict.get(""), Some("nothing"));
    }

    #[test]
    fn test_starts_with_ignore_case_respects_char_boundaries() {
        assert!(starts_with_ignore_case("ir-h", "IR"));
        assert!(!starts_with_ignore_case("I", "IR"));
        assert!(!starts_with_ignore_case("éA", "E"));
    }
}
