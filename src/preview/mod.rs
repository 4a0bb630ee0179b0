//! Preview session and rendering pipeline
//!
//! This module owns the state and behavior of one preview: decoding the
//! backend's payload, choosing a render scale, painting pages into the host
//! container and the zoom operations that trigger re-renders.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  PreviewSession                     │
//! │  (document handle, retained payload, zoom scale)    │
//! └─────────────────────────────────────────────────────┘
//!          │                                  │
//!          ▼                                  ▼
//! ┌──────────────────┐             ┌──────────────────┐
//! │  DocumentEngine  │             │   SurfaceHost    │
//! │  (parse/render)  │             │  (UI container)  │
//! └──────────────────┘             └──────────────────┘
//! ```
//!
//! The engine and the host are both collaborators behind traits: the session
//! never parses PDF data itself and never touches the UI beyond the
//! [`SurfaceHost`] contract.

mod error;
mod payload;
pub mod scale;
mod session;
mod surface;

pub use error::{PreviewError, Result};
pub use payload::PreviewPayload;
pub use scale::ScaleMode;
pub use session::PreviewSession;
pub use surface::{MemorySurfaceHost, PageSurface, SurfaceHost};
