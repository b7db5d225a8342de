//! Entity resolution for non-text insert operations
//!
//! Maps a tagged entity payload (note, bookmark, highlight, verse) to the
//! text to display, an optional reference code used for linking, and an
//! optional inline icon. Resolution is a pure function of the payload.

use serde_json::{Map, Value};

use crate::json_helpers::{get_nested_str, get_object_opt, get_str_or};

/// Base URL that reference codes are joined onto for link annotations
pub const REFERENCE_BASE_URL: &str = "https://wol.jw.org/finder?q=";

/// Icon identifier attached to verse entities, resolved against the
/// configured icon asset directory at render time
pub const VERSE_ICON: &str = "verse.png";

/// The recognized entity kinds, in dispatch priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Note,
    Bookmark,
    Highlight,
    Verse,
}

impl EntityKind {
    const DISPATCH_ORDER: [EntityKind; 4] = [
        EntityKind::Note,
        EntityKind::Bookmark,
        EntityKind::Highlight,
        EntityKind::Verse,
    ];

    /// The top-level payload key that tags this kind
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Note => "notes",
            EntityKind::Bookmark => "bookmarks",
            EntityKind::Highlight => "highlights",
            EntityKind::Verse => "verse",
        }
    }

    /// Classify a payload by its tag key; first match in dispatch order wins.
    /// Tags are expected to be mutually exclusive, but when several are
    /// present the dispatch order governs.
    pub fn classify(payload: &Map<String, Value>) -> Option<EntityKind> {
        Self::DISPATCH_ORDER
            .into_iter()
            .find(|kind| payload.contains_key(kind.tag()))
    }
}

/// Output of entity resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEntity {
    /// Text to display; empty means "nothing to render"
    pub display_text: String,
    /// Reference code rendered as a clickable run; whitespace-only means no link
    pub reference_code: String,
    /// Icon identifier to render inline before the display text
    pub icon_ref: String,
}

impl ResolvedEntity {
    pub fn should_render(&self) -> bool {
        !self.display_text.is_empty()
    }

    pub fn has_link(&self) -> bool {
        !self.reference_code.trim().is_empty()
    }

    pub fn has_icon(&self) -> bool {
        !self.icon_ref.is_empty()
    }

    /// The link target for this entity's reference code
    pub fn link_target(&self) -> String {
        format!("{}{}", REFERENCE_BASE_URL, self.reference_code)
    }
}

/// Resolve an entity payload into displayable content.
///
/// An unrecognized payload resolves to the all-empty entity; the caller is
/// responsible for skipping it and surfacing a diagnostic.
pub fn resolve(payload: &Map<String, Value>) -> ResolvedEntity {
    let Some(kind) = EntityKind::classify(payload) else {
        return ResolvedEntity::default();
    };
    let body = &payload[kind.tag()];

    match kind {
        EntityKind::Note | EntityKind::Bookmark => {
            let code = get_nested_str(body, "publication", "code");
            let para_id = get_nested_str(body, "entity", "paraId");
            let text = get_nested_str(body, "entity", "text");
            ResolvedEntity {
                display_text: with_separator(text),
                reference_code: format!("{} {}", code, para_id),
                icon_ref: String::new(),
            }
        }
        EntityKind::Highlight => {
            let code = get_nested_str(body, "publication", "code");
            let range = get_object_opt(body, "entity")
                .map(|e| get_nested_str(e, "range", "range"))
                .unwrap_or("");
            let selected = get_nested_str(body, "entity", "selected");
            ResolvedEntity {
                display_text: with_separator(selected),
                reference_code: format!("{} {}", code, para_before_range(range)),
                icon_ref: String::new(),
            }
        }
        EntityKind::Verse => {
            let id = get_str_or(body, "id", "");
            ResolvedEntity {
                display_text: format!("[Verse: {}]", id),
                // a bare space renders no link run
                reference_code: " ".to_string(),
                icon_ref: VERSE_ICON.to_string(),
            }
        }
    }
}

/// Append the separating space before the reference-code run. Empty text
/// stays empty so the operation is suppressed entirely.
fn with_separator(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("{} ", text)
    }
}

/// Paragraph id of a highlight: the part of `range` before its first `-`,
/// empty when there is no `-` at all
fn para_before_range(range: &str) -> &str {
    match range.find('-') {
        Some(idx) => &range[..idx],
        None => "",
    }
}
