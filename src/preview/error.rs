//! Preview error taxonomy

use thiserror::Error;

/// Errors a preview render attempt can surface
///
/// Every variant is terminal for the in-progress attempt; nothing is retried.
/// The session reports each one as a user-visible message in the container,
/// and the shell may start over with a fresh load.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Payload is not valid base64
    #[error("Decode error: {0}")]
    Decode(String),

    /// Decoded bytes are not a well-formed document
    #[error("Parse error: {0}")]
    Parse(String),

    /// A specific page (1-based) failed to rasterize; pages before it stay
    /// visible in the container
    #[error("Render error on page {page}: {reason}")]
    PageRender { page: usize, reason: String },

    /// The payload was the HTML variant, which the shell embeds directly
    #[error("HTML preview content cannot be rasterized")]
    HtmlPayload,
}

/// Result type alias for preview operations
pub type Result<T> = std::result::Result<T, PreviewError>;
