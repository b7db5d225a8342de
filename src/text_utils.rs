//! Text encoding and measurement for the built-in Type1 faces
//!
//! Provides conversion from Unicode to WinAnsiEncoding bytes for PDF text
//! rendering, plus the approximate Helvetica metrics used for line breaking.
//! Characters outside WinAnsiEncoding are replaced with '?'.

/// Approximate advance width of one character, in points
pub fn char_width(font_size: f64) -> f64 {
    font_size * 0.6
}

/// Approximate width of a piece of text, in points
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * char_width(font_size)
}

/// Approximate width of a word space, in points
pub fn space_width(font_size: f64) -> f64 {
    font_size * 0.3
}

/// Line height for a given font size
pub fn line_height(font_size: f64) -> f64 {
    font_size * 1.4
}

/// Baseline ascent above the text origin
pub fn ascent(font_size: f64) -> f64 {
    font_size * 0.8
}

/// Descent below the text origin
pub fn descent(font_size: f64) -> f64 {
    font_size * 0.2
}

/// Convert a Unicode string to WinAnsiEncoding bytes.
///
/// WinAnsiEncoding matches Latin-1 in the 0xA0-0xFF range; the 0x80-0x9F
/// range holds the Windows-1252 specials (smart quotes, dashes, euro sign).
pub fn unicode_to_winansi(text: &str) -> Vec<u8> {
    text.chars().map(winansi_byte).collect()
}

fn winansi_byte(ch: char) -> u8 {
    let code = ch as u32;
    match ch {
        _ if code < 0x80 => code as u8,
        _ if (0xA0..=0xFF).contains(&code) => code as u8,
        '\u{20AC}' => 0x80, // euro sign
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85, // ellipsis
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91, // left single quote
        '\u{2019}' => 0x92, // right single quote
        '\u{201C}' => 0x93, // left double quote
        '\u{201D}' => 0x94, // right double quote
        '\u{2022}' => 0x95, // bullet
        '\u{2013}' => 0x96, // en dash
        '\u{2014}' => 0x97, // em dash
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99, // trademark
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}
