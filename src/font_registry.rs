//! Font registry for the built-in Type1 faces
//!
//! Caches font objects keyed by style variant so each face is created in the
//! PDF exactly once, no matter how many runs use it.

use std::collections::HashMap;

use pdf_writer::{Name, Pdf, Ref};

use crate::style::FontVariant;

pub struct FontRegistry {
    next_ref_id: i32,
    fonts: HashMap<FontVariant, (Ref, Name<'static>)>,
}

impl FontRegistry {
    pub fn new(start_ref: i32) -> Self {
        Self {
            next_ref_id: start_ref,
            fonts: HashMap::new(),
        }
    }

    fn next_ref(&mut self) -> Ref {
        let r = Ref::new(self.next_ref_id);
        self.next_ref_id += 1;
        r
    }

    /// Get the resource name of a face, registering it on first use
    pub fn get_or_register(&mut self, pdf: &mut Pdf, variant: FontVariant) -> Name<'static> {
        if let Some(&(_, name)) = self.fonts.get(&variant) {
            return name;
        }

        let font_id = self.next_ref();
        pdf.type1_font(font_id).base_font(variant.base_font());
        let name = variant.resource_name();
        self.fonts.insert(variant, (font_id, name));
        name
    }

    /// Write all registered fonts into page Resources
    pub fn write_resources(&self, resources: &mut pdf_writer::writers::Resources<'_>) {
        if self.fonts.is_empty() {
            return;
        }
        let mut dict = resources.fonts();
        for (_variant, (id, name)) in &self.fonts {
            dict.pair(*name, *id);
        }
    }
}
