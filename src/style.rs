//! Run styling: translates operation attributes into concrete style state
//!
//! Font selection is the 2x2 combination of bold/italic; underline, size
//! override and background fill are independent of it. Alignment is NOT part
//! of run style - it is a paragraph-level property applied at flush time.

use pdf_writer::Name;

use crate::error::RenderResult;
use crate::types::{Attributes, Color};

/// Color used for clickable reference-code runs
pub const LINK_COLOR: Color = Color {
    r: 0.05,
    g: 0.25,
    b: 0.65,
};

/// The four built-in font faces, selected by the bold/italic combination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontVariant {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontVariant {
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontVariant::Regular,
            (true, false) => FontVariant::Bold,
            (false, true) => FontVariant::Italic,
            (true, true) => FontVariant::BoldItalic,
        }
    }

    /// PDF base font name of the built-in face
    pub fn base_font(self) -> Name<'static> {
        match self {
            FontVariant::Regular => Name(b"Helvetica"),
            FontVariant::Bold => Name(b"Helvetica-Bold"),
            FontVariant::Italic => Name(b"Helvetica-Oblique"),
            FontVariant::BoldItalic => Name(b"Helvetica-BoldOblique"),
        }
    }

    /// Page resource name the face is registered under
    pub fn resource_name(self) -> Name<'static> {
        match self {
            FontVariant::Regular => Name(b"F1"),
            FontVariant::Bold => Name(b"F2"),
            FontVariant::Italic => Name(b"F3"),
            FontVariant::BoldItalic => Name(b"F4"),
        }
    }
}

/// Concrete styling of one appended text run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStyle {
    pub variant: FontVariant,
    pub underline: bool,
    /// Font size override; `None` inherits the document base size
    pub size: Option<f32>,
    pub background: Option<Color>,
    /// Fill color override; `None` renders black
    pub color: Option<Color>,
}

impl RunStyle {
    /// Build the run style for a text operation's attributes.
    ///
    /// A malformed background color fails the conversion: invalid style
    /// input indicates a corrupt document contract, not user prose.
    pub fn from_attributes(attrs: Option<&Attributes>) -> RenderResult<Self> {
        let Some(attrs) = attrs else {
            return Ok(Self::default());
        };

        let background = match attrs.background.as_deref() {
            Some(hex) if !hex.is_empty() => Some(Color::from_hex(hex)?),
            _ => None,
        };

        Ok(Self {
            variant: FontVariant::from_flags(attrs.bold, attrs.italic),
            underline: attrs.underline,
            size: (attrs.size > 0.0).then_some(attrs.size),
            background,
            color: None,
        })
    }

    /// Style of an entity's display text: italicized, otherwise default
    pub fn entity_text() -> Self {
        Self {
            variant: FontVariant::Italic,
            ..Self::default()
        }
    }

    /// Style of a clickable reference-code run: underlined and colored
    pub fn reference() -> Self {
        Self {
            underline: true,
            color: Some(LINK_COLOR),
            ..Self::default()
        }
    }

    /// Style of a header line
    pub fn header(size: f32, bold: bool) -> Self {
        Self {
            variant: FontVariant::from_flags(bold, false),
            size: Some(size),
            ..Self::default()
        }
    }
}
