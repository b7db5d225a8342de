//! Error types for the delta-to-PDF conversion
//!
//! Fatal errors abort the whole conversion with no output file written.
//! `UnsupportedInsert` and `UnknownEntity` are diagnostics: the offending
//! operation is skipped and conversion continues.

use thiserror::Error;

/// Custom error type for conversion operations
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to read input {path}: {source}")]
    InputRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse delta JSON: {0}")]
    InputParse(String),

    #[error("unsupported insert shape (expected text or entity object): {0}")]
    UnsupportedInsert(String),

    #[error("entity payload matches no known kind: {0}")]
    UnknownEntity(String),

    #[error("invalid background color {0:?} (expected 6 hex digits, optional leading '#')")]
    InvalidColor(String),

    #[error("icon error: {0}")]
    Icon(String),

    #[error("failed to write output {path}: {source}")]
    OutputWrite {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for conversion operations
pub type RenderResult<T> = Result<T, RenderError>;

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::InputParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RenderError = parse_err.into();
        assert!(matches!(err, RenderError::InputParse(_)));
    }

    #[test]
    fn test_invalid_color_display() {
        let err = RenderError::InvalidColor("xyz".to_string());
        assert!(err.to_string().contains("xyz"));
    }
}
