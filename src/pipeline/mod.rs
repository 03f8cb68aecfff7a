//! Pipeline stages for PDF-to-image conversion.
//!
//! Each submodule implements exactly one transformation step and is
//! independently testable; [`crate::session`] strings them together.
//!
//! ## Data Flow
//!
//! ```text
//! render ──▶ persist ──▶ archive
//! (pdfium)   (page_N.png) (zip in memory)
//!    │
//!    └─────▶ collage ──▶ encode
//!            (grid)      (png / data URI)
//! ```
//!
//! 1. [`render`] : rasterise every page; runs in `spawn_blocking` because
//!    pdfium is not async-safe
//! 2. [`persist`]: write `page_<N>.png` files into the request workspace
//! 3. [`archive`]: pack the written files into an in-memory ZIP
//! 4. [`collage`]: contain-fit the leading pages onto a fixed grid
//! 5. [`encode`] : PNG bytes and base64 data URIs

pub mod archive;
pub mod collage;
pub mod encode;
pub mod persist;
pub mod render;
