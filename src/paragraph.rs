//! Finished paragraph model and the output document seam
//!
//! A `Paragraph` is the unit handed from the conversion pipeline to the
//! rendering collaborator. The `DocumentSink` trait is that collaborator's
//! contract; the concrete PDF renderer implements it, and tests substitute
//! an in-memory sink.

use crate::error::RenderResult;
use crate::style::RunStyle;
use crate::types::Align;

/// One finalized output paragraph, owned by the sink after emission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub align: Align,
}

impl Paragraph {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn push_text(&mut self, text: impl Into<String>, style: RunStyle) {
        self.runs.push(Run::Text(TextRun {
            text: text.into(),
            style,
            link: None,
        }));
    }

    pub fn push_link(&mut self, text: impl Into<String>, style: RunStyle, target: String) {
        self.runs.push(Run::Text(TextRun {
            text: text.into(),
            style,
            link: Some(target),
        }));
    }

    pub fn push_icon(&mut self, icon_ref: impl Into<String>) {
        self.runs.push(Run::Icon(IconRun {
            icon_ref: icon_ref.into(),
        }));
    }
}

/// One run inside a paragraph
#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    Text(TextRun),
    Icon(IconRun),
}

/// A styled run of text, optionally carrying a hyperlink target
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: RunStyle,
    pub link: Option<String>,
}

/// An inline icon, resolved against the icon asset directory at render time
#[derive(Debug, Clone, PartialEq)]
pub struct IconRun {
    pub icon_ref: String,
}

/// Output document contract of the rendering collaborator
pub trait DocumentSink {
    /// Append a finalized paragraph; paragraph order is append-only
    fn append_paragraph(&mut self, paragraph: Paragraph) -> RenderResult<()>;
}
