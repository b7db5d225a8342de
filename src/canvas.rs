//! High-level canvas wrapper for pdf-writer content streams
//!
//! Tracks graphics/text state for one page and exposes the drawing
//! operations the paragraph renderer needs: styled strings, rules
//! (underlines), fill rects (run backgrounds) and inline images.

use pdf_writer::{Content, Name, Str};

use crate::text_utils::unicode_to_winansi;
use crate::types::Color;

/// Canvas state for graphics operations
#[derive(Clone)]
struct CanvasState {
    fill_color: Color,
    font_name: Name<'static>,
    font_size: f64,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            fill_color: Color::black(),
            font_name: Name(b"F1"),
            font_size: 12.0,
        }
    }
}

/// Per-page canvas wrapping a pdf-writer `Content` stream
pub struct PdfCanvas {
    content: Content,
    state: CanvasState,
    state_stack: Vec<CanvasState>,
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            state: CanvasState::default(),
            state_stack: Vec::new(),
        }
    }

    /// Finish the page and return the content stream bytes
    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    // ===== State Management =====

    pub fn save_state(&mut self) {
        self.state_stack.push(self.state.clone());
        self.content.save_state();
    }

    pub fn restore_state(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
            self.content.restore_state();
        }
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
        self.content
            .set_fill_rgb(color.r as f32, color.g as f32, color.b as f32);
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.content
            .set_stroke_rgb(color.r as f32, color.g as f32, color.b as f32);
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.content.set_line_width(width as f32);
    }

    pub fn set_font(&mut self, font_name: Name<'static>, size: f64) {
        self.state.font_name = font_name;
        self.state.font_size = size;
    }

    // ===== Drawing =====

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.content
            .rect(x as f32, y as f32, width as f32, height as f32);
        self.content.fill_nonzero();
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.content.move_to(x1 as f32, y1 as f32);
        self.content.line_to(x2 as f32, y2 as f32);
        self.content.stroke();
    }

    /// Draw a string at the given baseline origin using the current font,
    /// converting to WinAnsiEncoding for the built-in Type1 faces
    pub fn draw_string(&mut self, x: f64, y: f64, text: &str) {
        self.content.begin_text();
        self.content
            .set_font(self.state.font_name, self.state.font_size as f32);
        self.content.next_line(x as f32, y as f32);
        self.content.show(Str(&unicode_to_winansi(text)));
        self.content.end_text();
    }

    /// Draw an image XObject scaled to `width` x `height` with its
    /// bottom-left corner at (x, y)
    pub fn draw_image(&mut self, image_name: Name<'static>, x: f64, y: f64, width: f64, height: f64) {
        self.content.save_state();
        self.content.transform([
            width as f32,
            0.0,
            0.0,
            height as f32,
            x as f32,
            y as f32,
        ]);
        self.content.x_object(image_name);
        self.content.restore_state();
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}
