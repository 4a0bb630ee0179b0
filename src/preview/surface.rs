//! Render targets and the container contract
//!
//! A [`PageSurface`] is one rendered page: an encoded raster image sized to
//! the page's scaled viewport. Surfaces are ephemeral; every render pass
//! recreates them from the document handle, nothing is cached across scale
//! changes.
//!
//! [`SurfaceHost`] is the contract the UI shell's container fulfils. The
//! session only ever talks to the container through it, which is also what
//! makes the render pipeline testable without a UI.

use parking_lot::Mutex;

/// One rendered page
#[derive(Debug, Clone)]
pub struct PageSurface {
    /// Encoded image bytes (PNG for the MuPDF engine)
    pub data: Vec<u8>,
    /// Raster width in device units
    pub width: u32,
    /// Raster height in device units
    pub height: u32,
}

/// Container the renderer paints into, provided by the UI shell
pub trait SurfaceHost: Send + Sync {
    /// Current inner width of the container, re-measured per call so
    /// fit-to-width tracks resizes
    fn client_width(&self) -> f32;

    /// Drop all children (surfaces and messages)
    fn clear(&self);

    /// Append one rendered page after the existing children
    fn append_surface(&self, surface: PageSurface);

    /// Append a user-visible message without clearing existing children
    fn show_message(&self, text: &str);

    /// Update the zoom percentage label
    fn set_zoom_label(&self, label: &str);

    /// Make the preview surface visible
    fn show(&self);

    /// Hide the preview surface
    fn hide(&self);
}

#[derive(Debug, Default)]
struct HostState {
    client_width: f32,
    surfaces: Vec<PageSurface>,
    messages: Vec<String>,
    zoom_label: Option<String>,
    visible: bool,
}

/// In-process [`SurfaceHost`] backed by a mutex
///
/// Used by embedding shells that composite the surfaces themselves, and by
/// tests to read back what a render pass produced.
pub struct MemorySurfaceHost {
    state: Mutex<HostState>,
}

impl MemorySurfaceHost {
    /// Create a host whose container measures `client_width` units across
    pub fn new(client_width: f32) -> Self {
        Self {
            state: Mutex::new(HostState {
                client_width,
                visible: true,
                ..HostState::default()
            }),
        }
    }

    /// Simulate a container resize
    pub fn set_client_width(&self, client_width: f32) {
        self.state.lock().client_width = client_width;
    }

    /// Rendered surfaces currently attached, in append order
    pub fn surfaces(&self) -> Vec<PageSurface> {
        self.state.lock().surfaces.clone()
    }

    /// Number of rendered surfaces currently attached
    pub fn surface_count(&self) -> usize {
        self.state.lock().surfaces.len()
    }

    /// Messages currently shown, in append order
    pub fn messages(&self) -> Vec<String> {
        self.state.lock().messages.clone()
    }

    /// Last zoom label written by the session, if any
    pub fn zoom_label(&self) -> Option<String> {
        self.state.lock().zoom_label.clone()
    }

    /// Whether the preview surface is visible
    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }
}

impl SurfaceHost for MemorySurfaceHost {
    fn client_width(&self) -> f32 {
        self.state.lock().client_width
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        state.surfaces.clear();
        state.messages.clear();
    }

    fn append_surface(&self, surface: PageSurface) {
        self.state.lock().surfaces.push(surface);
    }

    fn show_message(&self, text: &str) {
        self.state.lock().messages.push(text.to_string());
    }

    fn set_zoom_label(&self, label: &str) {
        self.state.lock().zoom_label = Some(label.to_string());
    }

    fn show(&self) {
        self.state.lock().visible = true;
    }

    fn hide(&self) {
        self.state.lock().visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_drops_surfaces_and_messages() {
        let host = MemorySurfaceHost::new(800.0);
        host.append_surface(PageSurface { data: vec![1], width: 10, height: 20 });
        host.show_message("oops");

        host.clear();

        assert_eq!(host.surface_count(), 0);
        assert!(host.messages().is_empty());
    }

    #[test]
    fn test_show_message_keeps_existing_surfaces() {
        let host = MemorySurfaceHost::new(800.0);
        host.append_surface(PageSurface { data: vec![1], width: 10, height: 20 });

        host.show_message("page 2 failed");

        assert_eq!(host.surface_count(), 1);
        assert_eq!(host.messages(), vec!["page 2 failed".to_string()]);
    }

    #[test]
    fn test_resize_changes_measured_width() {
        let host = MemorySurfaceHost::new(440.0);
        assert_eq!(host.client_width(), 440.0);

        host.set_client_width(640.0);
        assert_eq!(host.client_width(), 640.0);
    }
}
