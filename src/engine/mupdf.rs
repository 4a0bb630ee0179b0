//! MuPDF-backed document engine
//!
//! MuPDF documents are not thread-safe, so the handle keeps only the raw
//! bytes and a cached page count, serializes access behind a mutex and opens
//! a fresh `mupdf::Document` for each operation. Rasterization is CPU-bound
//! and runs on the blocking thread pool; the surface comes back as a PNG
//! encoded with the `image` crate.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use image::DynamicImage;
use mupdf::{Colorspace, Document, Matrix};
use parking_lot::Mutex;

use super::{DocumentEngine, DocumentHandle, EngineError, EngineResult};
use crate::preview::PageSurface;

const PDF_MIME: &str = "application/pdf";

/// Engine that parses and rasterizes PDFs through MuPDF
#[derive(Debug, Default)]
pub struct MupdfEngine;

impl MupdfEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentEngine for MupdfEngine {
    async fn open(&self, bytes: Vec<u8>) -> EngineResult<Arc<dyn DocumentHandle>> {
        let inner = tokio::task::spawn_blocking(move || Inner::from_bytes(bytes))
            .await
            .map_err(|e| EngineError::Open(format!("task join error: {e}")))??;

        Ok(Arc::new(MupdfDocument {
            inner: Arc::new(inner),
        }))
    }
}

/// MuPDF document handle
pub struct MupdfDocument {
    inner: Arc<Inner>,
}

struct Inner {
    data: Vec<u8>,
    page_count: usize,
    lock: Mutex<()>,
}

impl Inner {
    fn from_bytes(data: Vec<u8>) -> EngineResult<Self> {
        // Validate the bytes open cleanly and cache the page count up front.
        let doc = Document::from_bytes(&data, PDF_MIME)
            .map_err(|e| EngineError::Open(e.to_string()))?;
        let page_count = doc
            .page_count()
            .map_err(|e| EngineError::Open(e.to_string()))? as usize;

        Ok(Self {
            data,
            page_count,
            lock: Mutex::new(()),
        })
    }

    /// Run `f` against a freshly opened document, serialized by the mutex so
    /// no two MuPDF operations on this handle overlap
    fn with_doc<F, R>(&self, f: F) -> EngineResult<R>
    where
        F: FnOnce(&Document) -> EngineResult<R>,
    {
        let _guard = self.lock.lock();
        let doc = Document::from_bytes(&self.data, PDF_MIME)
            .map_err(|e| EngineError::Open(e.to_string()))?;
        f(&doc)
    }

    fn page_size(&self, index: usize) -> EngineResult<(f32, f32)> {
        if index >= self.page_count {
            return Err(EngineError::PageOutOfRange(index));
        }

        self.with_doc(|doc| {
            let page = doc
                .load_page(index as i32)
                .map_err(|e| EngineError::Render(e.to_string()))?;
            let bounds = page.bounds().map_err(|e| EngineError::Render(e.to_string()))?;
            Ok((bounds.x1 - bounds.x0, bounds.y1 - bounds.y0))
        })
    }

    fn render(&self, index: usize, scale: f32) -> EngineResult<PageSurface> {
        if index >= self.page_count {
            return Err(EngineError::PageOutOfRange(index));
        }

        self.with_doc(|doc| {
            let page = doc
                .load_page(index as i32)
                .map_err(|e| EngineError::Render(e.to_string()))?;

            let matrix = Matrix::new_scale(scale, scale);
            let colorspace = Colorspace::device_rgb();
            let pixmap = page
                .to_pixmap(&matrix, &colorspace, true, true)
                .map_err(|e| EngineError::Render(e.to_string()))?;

            encode_pixmap(&pixmap)
        })
    }
}

#[async_trait]
impl DocumentHandle for MupdfDocument {
    fn page_count(&self) -> usize {
        self.inner.page_count
    }

    async fn page_size(&self, index: usize) -> EngineResult<(f32, f32)> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.page_size(index))
            .await
            .map_err(|e| EngineError::Render(format!("task join error: {e}")))?
    }

    async fn render_page(&self, index: usize, scale: f32) -> EngineResult<PageSurface> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.render(index, scale))
            .await
            .map_err(|e| EngineError::Render(format!("task join error: {e}")))?
    }
}

fn encode_pixmap(pixmap: &mupdf::Pixmap) -> EngineResult<PageSurface> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            let a = if n >= 4 {
                samples.get(offset + 3).copied().unwrap_or(255)
            } else {
                255
            };
            rgba.extend_from_slice(&[r, g, b, a]);
        }
    }

    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| EngineError::Render("pixmap buffer size mismatch".to_string()))?;

    let mut data = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
        .map_err(|e| EngineError::Render(e.to_string()))?;

    Ok(PageSurface { data, width, height })
}
