//! Type definitions for the Quill delta input model
//!
//! The `insert` field of a delta operation is dynamically typed in the wire
//! format (string, object, or anything else). It is classified exactly once
//! at deserialization into the `Insert` sum type and never re-inspected by
//! type downstream.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{RenderError, RenderResult};

/// Top-level parsed input document
#[derive(Debug, Clone, Deserialize)]
pub struct QuillDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub presenter: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Ordered operation sequence; a missing `content` array is a parse error
    pub content: Vec<DeltaOp>,
}

/// One entry of the `content` sequence
#[derive(Debug, Clone, Deserialize)]
pub struct DeltaOp {
    pub insert: Insert,
    #[serde(default)]
    pub attributes: Option<Attributes>,
}

/// Payload of an `insert` field, decided at parse time
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    /// Plain text run
    Text(String),
    /// Tagged non-text entity (notes/bookmarks/highlights/verse payloads)
    Entity(Map<String, Value>),
    /// Anything else (number, bool, array, null) - reported and skipped
    Unsupported(Value),
}

/// Per-operation formatting descriptor
///
/// `size <= 0` means "do not override the current font size". `list` is part
/// of the schema but unused by the rendering logic.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size: f32,
    pub background: Option<String>,
    #[serde(deserialize_with = "align_from_str")]
    pub align: Option<Align>,
    pub list: Option<String>,
}

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    /// Map an alignment name to its variant; unknown names fall back to left
    pub fn from_name(name: &str) -> Self {
        match name {
            "center" => Align::Center,
            "right" => Align::Right,
            "justify" => Align::Justify,
            _ => Align::Left,
        }
    }
}

fn align_from_str<'de, D>(deserializer: D) -> Result<Option<Align>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|name| Align::from_name(&name)))
}

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn black() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        }
    }

    /// Parse a 6-hex-digit RGB string, optional leading `#`, case-insensitive
    pub fn from_hex(hex: &str) -> RenderResult<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RenderError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| -> f64 {
            // validated above, so the radix parse cannot fail
            u8::from_str_radix(&digits[range], 16).unwrap_or(0) as f64 / 255.0
        };

        Ok(Self {
            r: channel(0..2),
            g: channel(2..4),
            b: channel(4..6),
        })
    }
}
