//! Preview payload boundary
//!
//! The formatting backend answers a preview request with a tagged JSON body,
//! `{"type": "pdf", "content": <base64>}` or `{"type": "html", "content":
//! <markup>}`. The tag is decoded into a sum type at the boundary so the
//! renderer matches exhaustively instead of branching on a string field.

use serde::{Deserialize, Serialize};

/// One preview response from the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum PreviewPayload {
    /// Base64-encoded PDF, rasterized page by page by the session
    Pdf(String),
    /// Ready-to-embed HTML fragment; placed by the shell, never rasterized
    Html(String),
}

impl PreviewPayload {
    /// Whether this payload can be rasterized by the preview session
    pub fn is_pdf(&self) -> bool {
        matches!(self, Self::Pdf(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pdf_variant() {
        let payload: PreviewPayload =
            serde_json::from_str(r#"{"type": "pdf", "content": "JVBERi0xLjQ="}"#).unwrap();
        assert_eq!(payload, PreviewPayload::Pdf("JVBERi0xLjQ=".to_string()));
        assert!(payload.is_pdf());
    }

    #[test]
    fn test_decode_html_variant() {
        let payload: PreviewPayload =
            serde_json::from_str(r#"{"type": "html", "content": "<p>hi</p>"}"#).unwrap();
        assert_eq!(payload, PreviewPayload::Html("<p>hi</p>".to_string()));
        assert!(!payload.is_pdf());
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let result: Result<PreviewPayload, _> =
            serde_json::from_str(r#"{"type": "docx", "content": ""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_preserves_tag() {
        let payload = PreviewPayload::Pdf("AAAA".to_string());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "pdf");
        assert_eq!(json["content"], "AAAA");
    }
}
