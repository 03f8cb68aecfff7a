//! # pdf2img
//!
//! Rasterise every page of a PDF to PNG, bundle the pages into a ZIP archive
//! and build a thumbnail collage of the first few pages.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Render   rasterise pages via pdfium at 300 DPI (spawn_blocking)
//!  ├─ 2. Persist  page_1.png … page_N.png in a request-scoped temp dir
//!  ├─ 3. Archive  converted_images.zip, built in memory
//!  ├─ 4. Collage  first 4 pages, 300×300 cells, horizontal or vertical
//!  └─ 5. Output   every artifact as an in-memory download
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2img::{run_session, ConversionConfig, Orientation, RequestContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Blocking: may download PDFium on first run.
//!     tokio::task::spawn_blocking(|| pdf2img::ensure_backend(None)).await??;
//!
//!     let bytes = std::fs::read("document.pdf")?;
//!     let ctx = RequestContext::new("document.pdf", bytes, Orientation::Horizontal);
//!     let output = run_session(ctx, &ConversionConfig::default()).await?;
//!
//!     println!("{} pages, collage {}x{}",
//!         output.pages.len(), output.collage_width, output.collage_height);
//!     pdf2img::write_outputs(&output, "out").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2img` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{ensure_backend, is_backend_installed};
pub use config::{ConversionConfig, ConversionConfigBuilder, Orientation};
pub use error::Pdf2ImgError;
pub use output::{ConversionStats, Download, OutputSummary, PageArtifact, SessionOutput};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use session::{run_session, run_session_sync, write_outputs, RequestContext, ScopedWorkspace};
