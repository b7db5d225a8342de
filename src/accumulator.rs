//! Paragraph accumulation state machine
//!
//! Walks the operation stream strictly in order, splitting text runs on
//! embedded line breaks and deciding when the pending paragraph is emitted
//! to the sink. Entities never join the pending paragraph: each renders as
//! its own standalone paragraph, interleaved with whatever text is still
//! accumulating.

use log::warn;

use crate::entity::{self, EntityKind};
use crate::error::{RenderError, RenderResult};
use crate::paragraph::{DocumentSink, Paragraph};
use crate::style::RunStyle;
use crate::types::{DeltaOp, Insert};

/// Accumulates text runs into paragraphs as operations are processed.
///
/// Holds the single in-flight paragraph; ownership of each paragraph
/// transfers to the sink on flush.
#[derive(Debug, Default)]
pub struct Accumulator {
    pending: Paragraph,
    emitted: u32,
    skipped: u32,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraphs emitted to the sink so far
    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    /// Operations skipped with a diagnostic so far
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// Process one operation, emitting any paragraphs it completes
    pub fn push<S: DocumentSink>(&mut self, op: &DeltaOp, sink: &mut S) -> RenderResult<()> {
        match &op.insert {
            Insert::Text(text) => self.push_text(text, op, sink),
            Insert::Entity(payload) => self.push_entity(payload, sink),
            Insert::Unsupported(raw) => {
                warn!("{}", RenderError::UnsupportedInsert(raw.to_string()));
                self.skipped += 1;
                Ok(())
            }
        }
    }

    /// Emit the pending paragraph if it holds any runs (end of input)
    pub fn finish<S: DocumentSink>(&mut self, sink: &mut S) -> RenderResult<()> {
        if !self.pending.is_empty() {
            self.flush(sink)?;
        }
        Ok(())
    }

    /// Split text on line breaks; every segment but the last completes the
    /// pending paragraph, the last segment stays pending to be joined by the
    /// next operation. A lone line break flushes even when nothing new was
    /// appended. Text without any line break only appends.
    fn push_text<S: DocumentSink>(
        &mut self,
        text: &str,
        op: &DeltaOp,
        sink: &mut S,
    ) -> RenderResult<()> {
        let style = RunStyle::from_attributes(op.attributes.as_ref())?;
        let segments: Vec<&str> = text.split('\n').collect();
        let last = segments.len() - 1;

        for (i, segment) in segments.iter().enumerate() {
            if !segment.is_empty() {
                self.pending.push_text(*segment, style.clone());
            }
            if i < last {
                // alignment is a paragraph property, taken from the
                // operation that triggers the flush
                if let Some(align) = op.attributes.as_ref().and_then(|a| a.align) {
                    self.pending.align = align;
                }
                self.flush(sink)?;
            }
        }
        Ok(())
    }

    /// Entities render as standalone paragraphs emitted immediately; the
    /// pending text paragraph keeps accumulating afterwards.
    fn push_entity<S: DocumentSink>(
        &mut self,
        payload: &serde_json::Map<String, serde_json::Value>,
        sink: &mut S,
    ) -> RenderResult<()> {
        let resolved = entity::resolve(payload);
        if !resolved.should_render() {
            if EntityKind::classify(payload).is_none() {
                let tags: Vec<&str> = payload.keys().map(String::as_str).collect();
                warn!("{}", RenderError::UnknownEntity(tags.join(", ")));
                self.skipped += 1;
            }
            return Ok(());
        }

        let mut paragraph = Paragraph::default();
        if resolved.has_icon() {
            paragraph.push_icon(resolved.icon_ref.clone());
        }
        paragraph.push_text(resolved.display_text.clone(), RunStyle::entity_text());
        if resolved.has_link() {
            paragraph.push_link(
                resolved.reference_code.clone(),
                RunStyle::reference(),
                resolved.link_target(),
            );
        }

        self.emitted += 1;
        sink.append_paragraph(paragraph)
    }

    fn flush<S: DocumentSink>(&mut self, sink: &mut S) -> RenderResult<()> {
        let paragraph = std::mem::take(&mut self.pending);
        self.emitted += 1;
        sink.append_paragraph(paragraph)
    }
}
