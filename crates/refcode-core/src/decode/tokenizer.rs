//! Structural Tokenizer
//!
//! Splits the part of a reference after its prefix into structure segments
//! and trailing options. Every step consumes at least one character once the
//! structure blocks run out, so tokenizing always terminates with nothing left
//! over.

use crate::category::{Dictionary, StructureBlock};

use super::result::{
    DecodedOption, Parsed, Resolution, Segment, FREE_VALUE, KNOWN_KEY_NO_TEXT, NUMERIC_VALUE,
    UNKNOWN, UNKNOWN_OPTION,
};

/// Ends the structure blocks early
pub const STRUCTURE_SEPARATOR: char = '-';

/// Skipped between option codes
pub const OPTION_SEPARATORS: [char; 2] = ['-', '/'];

/// Longest digit run taken by the variable block fallback
const MAX_NUMERIC_DIGITS: usize = 3;

/// Forward-only position in an immutable input
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn advance(&mut self, bytes: usize) -> &'a str {
        let rest = self.rest();
        let taken = &rest[..bytes];
        self.pos += bytes;
        taken
    }

    /// Up to `n` characters; fewer when the input runs out
    fn take_chars(&mut self, n: usize) -> &'a str {
        let rest = self.rest();
        let end = rest.char_indices().nth(n).map_or(rest.len(), |(i, _)| i);
        self.advance(end)
    }

    fn eat(&mut self, c: char) -> bool {
        self.eat_any(&[c])
    }

    fn eat_any(&mut self, chars: &[char]) -> bool {
        match self.rest().chars().next() {
            Some(c) if chars.contains(&c) => {
                self.advance(c.len_utf8());
                true
            }
            _ => false,
        }
    }

    fn take_digits(&mut self, max: usize) -> Option<&'a str> {
        let len = self
            .rest()
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        (len > 0).then(|| self.advance(len))
    }
}

/// Decode `remainder` against `structure`, then read options from the rest.
pub fn tokenize(remainder: &str, structure: &[StructureBlock], options: &Dictionary) -> Parsed {
    let mut cursor = Cursor::new(remainder);
    let mut segments = Vec::with_capacity(structure.len());

    for block in structure {
        if cursor.eat(STRUCTURE_SEPARATOR) {
            break;
        }

        let segment = match block {
            StructureBlock::Fixed { name, width, codes } => {
                fixed_segment(&mut cursor, name, *width, codes)
            }
            StructureBlock::Variable { name, codes } => variable_segment(&mut cursor, name, codes),
        };
        segments.push(segment);
    }

    let options = read_options(&mut cursor, options);

    Parsed {
        segments,
        options,
        leftover: cursor.rest().to_string(),
    }
}

fn fixed_segment(cursor: &mut Cursor<'_>, name: &str, width: usize, codes: &Dictionary) -> Segment {
    let code = cursor.take_chars(width).to_uppercase();

    let (meaning, resolution) = match codes.get(&code) {
        Some(text) if !text.is_empty() => (text.to_string(), Resolution::Mapped),
        _ if !codes.is_empty() => (UNKNOWN.to_string(), Resolution::Unknown),
        _ => (FREE_VALUE.to_string(), Resolution::FreeValue),
    };

    Segment {
        name: name.to_string(),
        code,
        meaning,
        resolution,
    }
}

fn variable_segment(cursor: &mut Cursor<'_>, name: &str, codes: &Dictionary) -> Segment {
    if let Some((key, text)) = codes.longest_prefix_of(cursor.rest()) {
        cursor.advance(key.len());
        let (meaning, resolution) = if text.is_empty() {
            (KNOWN_KEY_NO_TEXT.to_string(), Resolution::KnownKey)
        } else {
            (text.to_string(), Resolution::Mapped)
        };
        return Segment {
            name: name.to_string(),
            code: key.to_uppercase(),
            meaning,
            resolution,
        };
    }

    if let Some(digits) = cursor.take_digits(MAX_NUMERIC_DIGITS) {
        return Segment {
            name: name.to_string(),
            code: digits.to_string(),
            meaning: NUMERIC_VALUE.to_string(),
            resolution: Resolution::Numeric,
        };
    }

    Segment {
        name: name.to_string(),
        code: cursor.take_chars(1).to_string(),
        meaning: UNKNOWN.to_string(),
        resolution: Resolution::Unknown,
    }
}

fn read_options(cursor: &mut Cursor<'_>, dict: &Dictionary) -> Vec<DecodedOption> {
    let mut options = Vec::new();

    while !cursor.is_empty() {
        if cursor.eat_any(&OPTION_SEPARATORS) {
            continue;
        }

        if let Some((key, text)) = dict.longest_prefix_of(cursor.rest()) {
            cursor.advance(key.len());
            options.push(DecodedOption {
                code: key.to_string(),
                meaning: text.to_string(),
                known: true,
            });
            continue;
        }

        options.push(DecodedOption {
            code: cursor.take_chars(1).to_string(),
            meaning: UNKNOWN_OPTION.to_string(),
            known: false,
        });
    }

    options
}
