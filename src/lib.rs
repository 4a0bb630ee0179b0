//! EasyWord preview renderer
//!
//! The EasyWord formatting backend answers a preview request with a tagged
//! JSON body: either a base64-encoded PDF rendition of the formatted document
//! or a ready-to-embed HTML fragment. This crate implements the client side of
//! that pipeline: it decodes the PDF variant and paints every page into a
//! host-provided container at a session-scoped zoom scale, with zoom in/out,
//! fit-to-width and close operations.
//!
//! # Modules
//!
//! - `preview`: the preview session, zoom arithmetic, payload boundary and
//!   surface contract
//! - `engine`: the platform PDF capability behind a trait (MuPDF-backed
//!   implementation behind the `mupdf-backend` feature)
//! - `client`: typed client for the formatting backend API

pub mod client;
pub mod engine;
pub mod preview;
