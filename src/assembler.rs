//! Document assembly: header metadata plus accumulated paragraphs
//!
//! The assembler is the external-facing orchestrator: it wires the parsed
//! document through the accumulator into a `DocumentSink`, and owns the
//! file-to-file conversion entry point used by the CLI.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::accumulator::Accumulator;
use crate::error::{RenderError, RenderResult};
use crate::paragraph::{DocumentSink, Paragraph};
use crate::pdf_renderer::{PageConfig, PdfRenderer};
use crate::style::RunStyle;
use crate::types::QuillDocument;

/// Counters reported after a successful conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Paragraphs emitted to the output document (header lines excluded)
    pub paragraphs: u32,
    /// Operations skipped with a diagnostic
    pub skipped: u32,
}

/// Emit the header block and every accumulated paragraph into the sink.
///
/// Header fields render as empty interpolation when the source metadata is
/// absent. On error the sink's partial content must be discarded by the
/// caller; nothing has been written to disk at this point.
pub fn assemble<S: DocumentSink>(doc: &QuillDocument, sink: &mut S) -> RenderResult<ConversionStats> {
    let title = doc.title.as_deref().unwrap_or("");
    let presenter = doc.presenter.as_deref().unwrap_or("");
    let summary = doc.summary.as_deref().unwrap_or("");

    sink.append_paragraph(header_line(format!("Title {}", title), 18.0, true))?;
    sink.append_paragraph(header_line(format!("Presenter: {}", presenter), 14.0, true))?;
    sink.append_paragraph(header_line(format!("Summary: {}", summary), 12.0, false))?;
    sink.append_paragraph(Paragraph::default())?;

    let mut accumulator = Accumulator::new();
    for op in &doc.content {
        accumulator.push(op, sink)?;
    }
    accumulator.finish(sink)?;

    debug!(
        "assembled {} paragraphs, {} operations skipped",
        accumulator.emitted(),
        accumulator.skipped()
    );

    Ok(ConversionStats {
        paragraphs: accumulator.emitted(),
        skipped: accumulator.skipped(),
    })
}

fn header_line(text: String, size: f32, bold: bool) -> Paragraph {
    let mut paragraph = Paragraph::default();
    paragraph.push_text(text, RunStyle::header(size, bold));
    paragraph
}

/// Convert a delta JSON file into a PDF at `output`.
///
/// The conversion either completes or fails atomically: the PDF is built in
/// memory and written in one step, so no half-written file is left behind.
pub fn convert_file(
    input: &Path,
    output: &Path,
    icon_dir: Option<&Path>,
) -> RenderResult<ConversionStats> {
    let raw = fs::read_to_string(input).map_err(|source| RenderError::InputRead {
        path: input.display().to_string(),
        source,
    })?;
    let doc: QuillDocument = serde_json::from_str(&raw)?;
    info!("parsed {} operations from {}", doc.content.len(), input.display());

    let mut renderer = PdfRenderer::new(PageConfig::default(), icon_dir.map(Path::to_path_buf));
    let stats = assemble(&doc, &mut renderer)?;
    renderer.save(output)?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paragraph::Run;

    #[derive(Default)]
    struct VecSink {
        paragraphs: Vec<Paragraph>,
    }

    impl DocumentSink for VecSink {
        fn append_paragraph(&mut self, paragraph: Paragraph) -> RenderResult<()> {
            self.paragraphs.push(paragraph);
            Ok(())
        }
    }

    fn first_text(paragraph: &Paragraph) -> &str {
        match &paragraph.runs[0] {
            Run::Text(run) => &run.text,
            other => panic!("expected text run, got {:?}", other),
        }
    }

    fn doc(json: serde_json::Value) -> QuillDocument {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_header_round_trip() {
        let doc = doc(serde_json::json!({
            "title": "T", "presenter": "P", "summary": "S", "content": []
        }));
        let mut sink = VecSink::default();
        assemble(&doc, &mut sink).unwrap();

        assert_eq!(first_text(&sink.paragraphs[0]), "Title T");
        assert_eq!(first_text(&sink.paragraphs[1]), "Presenter: P");
        assert_eq!(first_text(&sink.paragraphs[2]), "Summary: S");
        assert!(sink.paragraphs[3].is_empty());
    }

    #[test]
    fn test_absent_metadata_renders_empty() {
        let doc = doc(serde_json::json!({"content": []}));
        let mut sink = VecSink::default();
        let stats = assemble(&doc, &mut sink).unwrap();

        assert_eq!(first_text(&sink.paragraphs[0]), "Title ");
        assert_eq!(first_text(&sink.paragraphs[1]), "Presenter: ");
        assert_eq!(first_text(&sink.paragraphs[2]), "Summary: ");
        // empty content: only the header block
        assert_eq!(sink.paragraphs.len(), 4);
        assert_eq!(stats.paragraphs, 0);
    }

    #[test]
    fn test_header_sizes() {
        let doc = doc(serde_json::json!({"content": []}));
        let mut sink = VecSink::default();
        assemble(&doc, &mut sink).unwrap();

        let sizes: Vec<Option<f32>> = sink.paragraphs[..3]
            .iter()
            .map(|p| match &p.runs[0] {
                Run::Text(run) => run.style.size,
                _ => None,
            })
            .collect();
        assert_eq!(sizes, vec![Some(18.0), Some(14.0), Some(12.0)]);
    }

    #[test]
    fn test_skipped_operations_do_not_fail_assembly() {
        let doc = doc(serde_json::json!({"content": [
            {"insert": {"mystery": {}}},
            {"insert": true},
            {"insert": "kept\n"}
        ]}));
        let mut sink = VecSink::default();
        let stats = assemble(&doc, &mut sink).unwrap();

        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.paragraphs, 1);
        assert_eq!(first_text(&sink.paragraphs[4]), "kept");
    }
}
