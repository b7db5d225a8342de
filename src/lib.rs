//! Quill delta to PDF converter
//!
//! Walks a delta document's ordered operation list, accumulates text runs
//! into styled paragraphs, resolves tagged entities (notes, bookmarks,
//! highlights, verses) into displayable text with reference links and
//! inline icons, and renders the result as a PDF using pdf-writer.

pub mod accumulator;
pub mod assembler;
mod canvas;
pub mod entity;
pub mod error;
mod font_registry;
mod icon_registry;
mod json_helpers;
pub mod paragraph;
pub mod pdf_renderer;
pub mod style;
mod text_utils;
pub mod types;

pub use assembler::{assemble, convert_file, ConversionStats};
pub use error::{RenderError, RenderResult};
pub use paragraph::{DocumentSink, Paragraph};
pub use pdf_renderer::{PageConfig, PdfRenderer};
pub use types::QuillDocument;
