//! Icon registry for inline entity icons
//!
//! Resolves icon identifiers against the configured asset directory, decodes
//! them with the image crate and embeds each one as an RGB image XObject
//! (alpha split into an SMask) exactly once. An unresolvable icon is logged
//! and skipped; icon loss never fails a conversion.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use image::io::Reader as ImageReader;
use log::warn;
use pdf_writer::{Name, Pdf, Ref};

use crate::error::{RenderError, RenderResult};

/// An image XObject already written into the PDF
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedIcon {
    pub id: Ref,
    pub name: Name<'static>,
    pub width: u32,
    pub height: u32,
}

impl EmbeddedIcon {
    /// Width when scaled to the given display height, preserving aspect
    pub fn scaled_width(&self, display_height: f64) -> f64 {
        if self.height == 0 {
            return display_height;
        }
        display_height * self.width as f64 / self.height as f64
    }
}

pub struct IconRegistry {
    next_ref_id: i32,
    icon_dir: Option<PathBuf>,
    // icon identifier -> embedded XObject
    icons: HashMap<String, EmbeddedIcon>,
    // identifiers that already failed, to warn only once
    missing: HashSet<String>,
}

impl IconRegistry {
    pub fn new(start_ref: i32, icon_dir: Option<PathBuf>) -> Self {
        Self {
            next_ref_id: start_ref,
            icon_dir,
            icons: HashMap::new(),
            missing: HashSet::new(),
        }
    }

    fn next_ref(&mut self) -> Ref {
        let r = Ref::new(self.next_ref_id);
        self.next_ref_id += 1;
        r
    }

    /// Get an embedded icon, embedding it on first use. Returns `None` when
    /// the identifier cannot be resolved or decoded.
    pub fn get_or_embed(&mut self, pdf: &mut Pdf, icon_ref: &str) -> Option<EmbeddedIcon> {
        if let Some(icon) = self.icons.get(icon_ref) {
            return Some(*icon);
        }
        if self.missing.contains(icon_ref) {
            return None;
        }

        match self.embed(pdf, icon_ref) {
            Ok(icon) => {
                self.icons.insert(icon_ref.to_string(), icon);
                Some(icon)
            }
            Err(err) => {
                warn!("skipping icon {}: {}", icon_ref, err);
                self.missing.insert(icon_ref.to_string());
                None
            }
        }
    }

    fn resolve_path(&self, icon_ref: &str) -> RenderResult<PathBuf> {
        let direct = Path::new(icon_ref);
        if direct.is_file() {
            return Ok(direct.to_path_buf());
        }
        if let Some(dir) = &self.icon_dir {
            let joined = dir.join(icon_ref);
            if joined.is_file() {
                return Ok(joined);
            }
        }
        Err(RenderError::Icon(format!("asset not found: {}", icon_ref)))
    }

    fn embed(&mut self, pdf: &mut Pdf, icon_ref: &str) -> RenderResult<EmbeddedIcon> {
        let path = self.resolve_path(icon_ref)?;
        let img = ImageReader::open(&path)
            .map_err(|e| RenderError::Icon(format!("failed to open {}: {}", path.display(), e)))?
            .with_guessed_format()
            .map_err(|e| RenderError::Icon(format!("failed to read {}: {}", path.display(), e)))?
            .decode()
            .map_err(|e| RenderError::Icon(format!("failed to decode {}: {}", path.display(), e)))?;

        // Split RGBA into RGB + alpha; alpha becomes an SMask
        let has_alpha = img.color().has_alpha();
        let (rgb_data, width, height, alpha_data) = if has_alpha {
            let rgba = img.to_rgba8();
            let (w, h) = rgba.dimensions();
            let bytes = rgba.into_raw();
            let mut rgb = Vec::with_capacity((w * h * 3) as usize);
            let mut alpha = Vec::with_capacity((w * h) as usize);
            for chunk in bytes.chunks_exact(4) {
                rgb.push(chunk[0]);
                rgb.push(chunk[1]);
                rgb.push(chunk[2]);
                alpha.push(chunk[3]);
            }
            (rgb, w, h, Some(alpha))
        } else {
            let rgb = img.to_rgb8();
            let (w, h) = rgb.dimensions();
            (rgb.into_raw(), w, h, None)
        };

        let smask_id = alpha_data.map(|alpha| {
            let id = self.next_ref();
            let mut smask = pdf.image_xobject(id, &alpha);
            smask.width(width as i32);
            smask.height(height as i32);
            smask.color_space().device_gray();
            smask.bits_per_component(8);
            id
        });

        let image_id = self.next_ref();
        {
            let mut xobject = pdf.image_xobject(image_id, &rgb_data);
            xobject.width(width as i32);
            xobject.height(height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
            if let Some(smask_id) = smask_id {
                xobject.s_mask(smask_id);
            }
        }

        // XObject resource names need a 'static lifetime
        let name_str: &'static str = Box::leak(format!("Im{}", image_id.get()).into_boxed_str());
        Ok(EmbeddedIcon {
            id: image_id,
            name: Name(name_str.as_bytes()),
            width,
            height,
        })
    }

    /// Write all embedded icons into page Resources
    pub fn write_resources(&self, resources: &mut pdf_writer::writers::Resources<'_>) {
        if self.icons.is_empty() {
            return;
        }
        let mut dict = resources.x_objects();
        for (_key, icon) in &self.icons {
            dict.pair(icon.name, icon.id);
        }
    }
}
