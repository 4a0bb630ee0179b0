//! Platform PDF capability
//!
//! The preview session treats PDF parsing and rasterization as an external
//! collaborator: [`DocumentEngine`] opens raw bytes into a
//! [`DocumentHandle`], which reports page geometry and rasterizes one page at
//! a time. The session never sees a PDF byte stream beyond handing it to the
//! engine.
//!
//! The MuPDF-backed implementation lives in [`mupdf`] behind the
//! `mupdf-backend` feature; tests substitute mock implementations.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::preview::PageSurface;

#[cfg(feature = "mupdf-backend")]
pub mod mupdf;

/// Errors from the document engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Bytes could not be opened as a document
    #[error("failed to open document: {0}")]
    Open(String),

    /// Page index past the end of the document
    #[error("page index {0} out of range")]
    PageOutOfRange(usize),

    /// Rasterization of a page failed
    #[error("render failed: {0}")]
    Render(String),
}

/// Result type alias for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Opens raw document bytes into a handle
#[async_trait]
pub trait DocumentEngine: Send + Sync {
    /// Parse `bytes` into a document handle
    async fn open(&self, bytes: Vec<u8>) -> EngineResult<Arc<dyn DocumentHandle>>;
}

/// A parsed multi-page document, opaque outside the engine
#[async_trait]
pub trait DocumentHandle: Send + Sync {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Intrinsic (unscaled) page size in points, 0-based index
    async fn page_size(&self, index: usize) -> EngineResult<(f32, f32)>;

    /// Rasterize one page at the given scale, 0-based index
    ///
    /// The returned surface is sized to the page's viewport at that scale.
    async fn render_page(&self, index: usize, scale: f32) -> EngineResult<PageSurface>;
}
