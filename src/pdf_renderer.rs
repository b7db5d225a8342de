//! Concrete PDF output document built on pdf-writer
//!
//! Implements `DocumentSink`: paragraphs flow top-down through a single page
//! sequence with word-level line breaking, automatic page breaks, per-run
//! styling (face, size, background, underline), inline icons and URI link
//! annotations. Content streams are written as pages fill up; page objects,
//! page tree and catalog are written at save time so every page's resources
//! cover all fonts and icons registered during rendering.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Finish, Pdf, Rect as PdfRect, Ref, Str};

use crate::canvas::PdfCanvas;
use crate::error::{RenderError, RenderResult};
use crate::font_registry::FontRegistry;
use crate::icon_registry::{EmbeddedIcon, IconRegistry};
use crate::paragraph::{DocumentSink, Paragraph, Run};
use crate::style::RunStyle;
use crate::text_utils;
use crate::types::{Align, Color};

/// Page geometry and typography defaults (US Letter, points)
#[derive(Debug, Clone, Copy)]
pub struct PageConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub base_font_size: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin: 56.0,
            base_font_size: 12.0,
        }
    }
}

impl PageConfig {
    fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }
}

/// A clickable area recorded while drawing, written as a page annotation
struct LinkArea {
    rect: [f64; 4],
    url: String,
}

/// A page whose content stream is already written
struct FinishedPage {
    page_id: Ref,
    content_id: Ref,
    links: Vec<LinkArea>,
}

/// One word or icon placed by the line breaker
struct Atom {
    kind: AtomKind,
    style: RunStyle,
    link: Option<String>,
    size: f64,
    width: f64,
    /// whether a word space separates this atom from its predecessor
    space_before: bool,
}

enum AtomKind {
    Word(String),
    Icon(EmbeddedIcon),
}

/// PDF renderer: the concrete output document
pub struct PdfRenderer {
    pdf: Pdf,
    page: PageConfig,
    page_tree_id: Ref,
    next_ref_id: i32,
    fonts: FontRegistry,
    icons: IconRegistry,
    canvas: PdfCanvas,
    cursor_y: f64,
    current_links: Vec<LinkArea>,
    finished: Vec<FinishedPage>,
}

impl PdfRenderer {
    pub fn new(page: PageConfig, icon_dir: Option<PathBuf>) -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        pdf.catalog(catalog_id).pages(page_tree_id);

        Self {
            pdf,
            page,
            page_tree_id,
            next_ref_id: 3,
            fonts: FontRegistry::new(1000),
            icons: IconRegistry::new(2000, icon_dir),
            canvas: PdfCanvas::new(),
            cursor_y: page.height - page.margin,
            current_links: Vec::new(),
            finished: Vec::new(),
        }
    }

    fn next_ref(&mut self) -> Ref {
        let r = Ref::new(self.next_ref_id);
        self.next_ref_id += 1;
        r
    }

    /// Stream the current page's content and start a fresh one
    fn new_page(&mut self) {
        self.finalize_current_page();
        self.cursor_y = self.page.height - self.page.margin;
    }

    fn finalize_current_page(&mut self) {
        let canvas = std::mem::take(&mut self.canvas);
        let content = canvas.finish();
        let content_id = self.next_ref();
        let page_id = self.next_ref();
        self.pdf.stream(content_id, &content);
        self.finished.push(FinishedPage {
            page_id,
            content_id,
            links: std::mem::take(&mut self.current_links),
        });
    }

    /// Finalize pages, page tree and catalog, then write the whole document
    /// in one step (no partial file on failure).
    pub fn save(mut self, output: &Path) -> RenderResult<()> {
        self.finalize_current_page();
        debug!("writing {} pages to {}", self.finished.len(), output.display());

        for page in &self.finished {
            let mut pdf_page = self.pdf.page(page.page_id);
            pdf_page.media_box(PdfRect::new(
                0.0,
                0.0,
                self.page.width as f32,
                self.page.height as f32,
            ));
            pdf_page.parent(self.page_tree_id);
            pdf_page.contents(page.content_id);

            {
                let mut resources = pdf_page.resources();
                self.fonts.write_resources(&mut resources);
                self.icons.write_resources(&mut resources);
            }

            if !page.links.is_empty() {
                let mut annotations = pdf_page.annotations();
                for link in &page.links {
                    let mut annotation = annotations.push();
                    annotation.subtype(AnnotationType::Link);
                    annotation.rect(PdfRect::new(
                        link.rect[0] as f32,
                        link.rect[1] as f32,
                        link.rect[2] as f32,
                        link.rect[3] as f32,
                    ));
                    annotation
                        .action()
                        .action_type(ActionType::Uri)
                        .uri(Str(link.url.as_bytes()));
                    annotation.finish();
                }
                annotations.finish();
            }

            pdf_page.finish();
        }

        let kids: Vec<Ref> = self.finished.iter().map(|p| p.page_id).collect();
        self.pdf
            .pages(self.page_tree_id)
            .kids(kids.iter().copied())
            .count(kids.len() as i32);

        fs::write(output, self.pdf.finish()).map_err(|source| RenderError::OutputWrite {
            path: output.display().to_string(),
            source,
        })
    }

    /// Break a paragraph's runs into placeable word/icon atoms
    fn layout_atoms(&mut self, paragraph: &Paragraph) -> Vec<Atom> {
        let base = self.page.base_font_size;
        let mut atoms: Vec<Atom> = Vec::new();
        let mut pending_space = false;

        for run in &paragraph.runs {
            match run {
                Run::Icon(icon_run) => {
                    if let Some(icon) = self.icons.get_or_embed(&mut self.pdf, &icon_run.icon_ref)
                    {
                        atoms.push(Atom {
                            width: icon.scaled_width(base),
                            kind: AtomKind::Icon(icon),
                            style: RunStyle::default(),
                            link: None,
                            size: base,
                            space_before: pending_space && !atoms.is_empty(),
                        });
                        pending_space = true;
                    }
                }
                Run::Text(text_run) => {
                    let size = text_run.style.size.map(f64::from).unwrap_or(base);
                    for (i, word) in text_run.text.split(' ').enumerate() {
                        if i > 0 {
                            pending_space = true;
                        }
                        if word.is_empty() {
                            continue;
                        }
                        atoms.push(Atom {
                            kind: AtomKind::Word(word.to_string()),
                            style: text_run.style.clone(),
                            link: text_run.link.clone(),
                            size,
                            width: text_utils::text_width(word, size),
                            space_before: pending_space && !atoms.is_empty(),
                        });
                        pending_space = false;
                    }
                }
            }
        }
        atoms
    }

    /// Greedy word wrapping against the writeable width
    fn break_lines(&self, atoms: Vec<Atom>) -> Vec<Vec<Atom>> {
        let max_width = self.page.content_width();
        let mut lines: Vec<Vec<Atom>> = Vec::new();
        let mut current: Vec<Atom> = Vec::new();
        let mut width = 0.0;

        for atom in atoms {
            let space = if current.is_empty() || !atom.space_before {
                0.0
            } else {
                text_utils::space_width(atom.size)
            };

            if !current.is_empty() && width + space + atom.width > max_width {
                lines.push(std::mem::take(&mut current));
                width = atom.width;
                current.push(atom);
            } else {
                width += space + atom.width;
                current.push(atom);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn line_width(line: &[Atom]) -> f64 {
        let mut width = 0.0;
        for (i, atom) in line.iter().enumerate() {
            if i > 0 && atom.space_before {
                width += text_utils::space_width(atom.size);
            }
            width += atom.width;
        }
        width
    }

    fn render_line(&mut self, line: Vec<Atom>, align: Align, is_last: bool) {
        let line_size = line
            .iter()
            .map(|a| a.size)
            .fold(self.page.base_font_size, f64::max);
        let line_height = text_utils::line_height(line_size);

        if self.cursor_y - line_height < self.page.margin {
            self.new_page();
        }
        self.cursor_y -= line_height;
        let baseline = self.cursor_y + text_utils::descent(line_size);

        let content_width = self.page.content_width();
        let width = Self::line_width(&line);
        let margin = self.page.margin;

        // alignment offset; justify distributes leftover width across gaps
        let mut justify_extra = 0.0;
        let mut x = match align {
            Align::Left => margin,
            Align::Center => margin + ((content_width - width) / 2.0).max(0.0),
            Align::Right => margin + (content_width - width).max(0.0),
            Align::Justify => {
                let gaps = line.iter().skip(1).filter(|a| a.space_before).count();
                if !is_last && gaps > 0 && width < content_width {
                    justify_extra = (content_width - width) / gaps as f64;
                }
                margin
            }
        };

        for (i, atom) in line.iter().enumerate() {
            if i > 0 && atom.space_before {
                x += text_utils::space_width(atom.size) + justify_extra;
            }
            match &atom.kind {
                AtomKind::Icon(icon) => {
                    self.canvas
                        .draw_image(icon.name, x, baseline, atom.width, atom.size);
                }
                AtomKind::Word(word) => self.draw_word(word, atom, x, baseline),
            }
            x += atom.width;
        }
    }

    fn draw_word(&mut self, word: &str, atom: &Atom, x: f64, baseline: f64) {
        let size = atom.size;
        let color = atom.style.color.unwrap_or_else(Color::black);

        if let Some(background) = atom.style.background {
            self.canvas.save_state();
            self.canvas.set_fill_color(background);
            self.canvas.fill_rect(
                x,
                baseline - text_utils::descent(size),
                atom.width,
                text_utils::ascent(size) + text_utils::descent(size),
            );
            self.canvas.restore_state();
        }

        let font_name = self.fonts.get_or_register(&mut self.pdf, atom.style.variant);
        self.canvas.set_font(font_name, size);
        self.canvas.set_fill_color(color);
        self.canvas.draw_string(x, baseline, word);

        if atom.style.underline {
            let underline_y = baseline - size * 0.1;
            self.canvas.save_state();
            self.canvas.set_stroke_color(color);
            self.canvas.set_line_width(size * 0.05);
            self.canvas.line(x, underline_y, x + atom.width, underline_y);
            self.canvas.restore_state();
        }

        if let Some(url) = &atom.link {
            self.current_links.push(LinkArea {
                rect: [
                    x,
                    baseline - text_utils::descent(size),
                    x + atom.width,
                    baseline + text_utils::ascent(size),
                ],
                url: url.clone(),
            });
        }
    }
}

impl DocumentSink for PdfRenderer {
    fn append_paragraph(&mut self, paragraph: Paragraph) -> RenderResult<()> {
        if paragraph.is_empty() {
            // blank separator line
            self.cursor_y -= text_utils::line_height(self.page.base_font_size);
            return Ok(());
        }

        let atoms = self.layout_atoms(&paragraph);
        let lines = self.break_lines(atoms);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.into_iter().enumerate() {
            self.render_line(line, paragraph.align, i == last);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_atom(text: &str, size: f64, space_before: bool) -> Atom {
        Atom {
            kind: AtomKind::Word(text.to_string()),
            style: RunStyle::default(),
            link: None,
            size,
            width: text_utils::text_width(text, size),
            space_before,
        }
    }

    #[test]
    fn test_break_lines_wraps_at_content_width() {
        let renderer = PdfRenderer::new(PageConfig::default(), None);
        // each word ~360pt at size 60, content width 500pt: one word per line
        let atoms = vec![
            word_atom("abcdefghij", 60.0, false),
            word_atom("abcdefghij", 60.0, true),
        ];
        let lines = renderer.break_lines(atoms);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_break_lines_keeps_short_text_on_one_line() {
        let renderer = PdfRenderer::new(PageConfig::default(), None);
        let atoms = vec![
            word_atom("one", 12.0, false),
            word_atom("two", 12.0, true),
            word_atom("three", 12.0, true),
        ];
        let lines = renderer.break_lines(atoms);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 3);
    }

    #[test]
    fn test_layout_atoms_preserves_run_adjacency() {
        let mut renderer = PdfRenderer::new(PageConfig::default(), None);
        let mut paragraph = Paragraph::default();
        paragraph.push_text("one ", RunStyle::default());
        paragraph.push_text("two", RunStyle::default());
        paragraph.push_text("three", RunStyle::default());

        let atoms = renderer.layout_atoms(&paragraph);
        assert_eq!(atoms.len(), 3);
        // "one " ends with a space, so "two" is separated
        assert!(atoms[1].space_before);
        // "two" and "three" abut with no space in the source
        assert!(!atoms[2].space_before);
    }

    #[test]
    fn test_layout_atoms_resolves_size_override() {
        let mut renderer = PdfRenderer::new(PageConfig::default(), None);
        let mut paragraph = Paragraph::default();
        paragraph.push_text(
            "big",
            RunStyle {
                size: Some(18.0),
                ..RunStyle::default()
            },
        );
        paragraph.push_text("normal", RunStyle::default());

        let atoms = renderer.layout_atoms(&paragraph);
        assert_eq!(atoms[0].size, 18.0);
        assert_eq!(atoms[1].size, 12.0);
    }

    #[test]
    fn test_page_breaks_accumulate_pages() {
        let mut renderer = PdfRenderer::new(PageConfig::default(), None);
        // enough paragraphs to overflow one page
        for _ in 0..60 {
            let mut paragraph = Paragraph::default();
            paragraph.push_text("line", RunStyle::default());
            renderer.append_paragraph(paragraph).unwrap();
        }
        assert!(!renderer.finished.is_empty());
    }

    #[test]
    fn test_save_writes_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        let mut renderer = PdfRenderer::new(PageConfig::default(), None);
        let mut paragraph = Paragraph::default();
        paragraph.push_text("hello", RunStyle::default());
        paragraph.push_link(
            "JW 12",
            RunStyle::reference(),
            "https://example.org/JW 12".to_string(),
        );
        renderer.append_paragraph(paragraph).unwrap();
        renderer.save(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let renderer = PdfRenderer::new(PageConfig::default(), None);
        let err = renderer
            .save(Path::new("/nonexistent-dir/out.pdf"))
            .unwrap_err();
        assert!(matches!(err, RenderError::OutputWrite { .. }));
    }
}
