//! Preview session
//!
//! [`PreviewSession`] holds the state of one active preview: the decoded
//! document handle, the raw base64 payload retained for re-renders at a new
//! scale, and the current zoom factor. All mutation goes through its methods;
//! there is no ambient module state.
//!
//! # Concurrency
//!
//! Every operation takes `&mut self`, so two render passes over the same
//! session can never interleave; a zoom-triggered re-render always observes
//! the previous pass completed. Within one pass, pages render strictly one at
//! a time in ascending order, which bounds peak memory to a single page's
//! raster buffer.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::engine::{DocumentEngine, DocumentHandle};
use crate::preview::error::{PreviewError, Result};
use crate::preview::payload::PreviewPayload;
use crate::preview::scale::{self, ScaleMode, DEFAULT_SCALE};
use crate::preview::surface::SurfaceHost;

/// State and operations for one preview
pub struct PreviewSession {
    engine: Arc<dyn DocumentEngine>,
    host: Arc<dyn SurfaceHost>,
    document: Option<Arc<dyn DocumentHandle>>,
    raw_payload: Option<String>,
    scale: f32,
}

impl PreviewSession {
    /// Create a session painting into `host` and parsing through `engine`
    pub fn new(engine: Arc<dyn DocumentEngine>, host: Arc<dyn SurfaceHost>) -> Self {
        Self {
            engine,
            host,
            document: None,
            raw_payload: None,
            scale: DEFAULT_SCALE,
        }
    }

    /// Current zoom factor
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether a document is currently loaded
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Render a backend preview response
    ///
    /// PDF payloads go through [`load_and_render`](Self::load_and_render);
    /// the HTML variant is rejected so the shell can place the markup itself.
    pub async fn load_payload(&mut self, payload: &PreviewPayload, mode: ScaleMode) -> Result<()> {
        match payload {
            PreviewPayload::Pdf(content) => self.load_and_render(content, mode).await,
            PreviewPayload::Html(_) => Err(PreviewError::HtmlPayload),
        }
    }

    /// Decode `payload` and paint every page into the host at the requested
    /// scale
    ///
    /// The first failing page aborts the pass with
    /// [`PreviewError::PageRender`] and leaves the already-rendered prefix in
    /// place. Decode and parse failures clear the container before the error
    /// message is shown. On success the host's zoom label shows the rounded
    /// percentage of the scale used.
    pub async fn load_and_render(&mut self, payload: &str, mode: ScaleMode) -> Result<()> {
        match self.render_pass(payload, mode).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!("preview render failed: {}", err);
                if matches!(err, PreviewError::Decode(_) | PreviewError::Parse(_)) {
                    self.host.clear();
                }
                self.host.show_message(&err.to_string());
                Err(err)
            }
        }
    }

    async fn render_pass(&mut self, payload: &str, mode: ScaleMode) -> Result<()> {
        self.host.show();

        let bytes = BASE64
            .decode(payload)
            .map_err(|e| PreviewError::Decode(e.to_string()))?;

        let document = self
            .engine
            .open(bytes)
            .await
            .map_err(|e| PreviewError::Parse(e.to_string()))?;

        // Replacing the handle releases the previously loaded document.
        self.document = Some(Arc::clone(&document));
        self.raw_payload = Some(payload.to_string());

        // Drop the previous pass's content now, so any failure past this
        // point leaves at most the current pass's rendered prefix behind.
        self.host.clear();

        self.scale = match mode {
            ScaleMode::Explicit(value) => value,
            ScaleMode::FitWidth => {
                let (intrinsic_width, _) =
                    document.page_size(0).await.map_err(|e| PreviewError::PageRender {
                        page: 1,
                        reason: e.to_string(),
                    })?;
                scale::fit_width_scale(self.host.client_width(), intrinsic_width)
            }
        };

        tracing::debug!(
            pages = document.page_count(),
            scale = self.scale,
            "rendering preview"
        );

        for index in 0..document.page_count() {
            let surface = document
                .render_page(index, self.scale)
                .await
                .map_err(|e| PreviewError::PageRender {
                    page: index + 1,
                    reason: e.to_string(),
                })?;
            self.host.append_surface(surface);
        }

        self.host.set_zoom_label(&scale::zoom_label(self.scale));
        Ok(())
    }

    /// Step the zoom in by one notch and re-render from the retained payload
    ///
    /// Saturates at the 300% ceiling (the re-render still runs there).
    /// Silently does nothing when no preview has been loaded.
    pub async fn zoom_in(&mut self) -> Result<()> {
        self.scale = scale::zoom_in(self.scale);
        self.rerender().await
    }

    /// Step the zoom out by one notch and re-render from the retained payload
    ///
    /// Saturates at the 30% floor (the re-render still runs there).
    /// Silently does nothing when no preview has been loaded.
    pub async fn zoom_out(&mut self) -> Result<()> {
        self.scale = scale::zoom_out(self.scale);
        self.rerender().await
    }

    /// Recompute the scale from the current container width and re-render
    ///
    /// Does nothing when no document is loaded.
    pub async fn fit_to_width(&mut self) -> Result<()> {
        if self.document.is_none() {
            return Ok(());
        }

        let Some(payload) = self.raw_payload.clone() else {
            return Ok(());
        };
        self.load_and_render(&payload, ScaleMode::FitWidth).await
    }

    async fn rerender(&mut self) -> Result<()> {
        let Some(payload) = self.raw_payload.clone() else {
            return Ok(());
        };
        let current = self.scale;
        self.load_and_render(&payload, ScaleMode::Explicit(current)).await
    }

    /// Tear the session down
    ///
    /// Releases the document handle, drops the retained payload, resets the
    /// zoom to 100% and hides the emptied container.
    pub fn close(&mut self) {
        self.document = None;
        self.raw_payload = None;
        self.scale = DEFAULT_SCALE;
        self.host.clear();
        self.host.hide();
        tracing::debug!("preview session closed");
    }
}
