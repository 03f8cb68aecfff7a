//! Start-up check for the PDFium rendering engine.
//!
//! Binaries call [`ensure_backend`] once before accepting work. When the
//! library is missing it is downloaded into the user cache; if that fails the
//! caller is expected to report the error and exit. The resolved location is
//! remembered for the rest of the process, so later calls are free.

use crate::error::Pdf2ImgError;
use pdfium_render::prelude::Pdfium;
use std::path::PathBuf;
use tracing::{debug, info};

/// Make sure PDFium is present, installing it if necessary.
///
/// `on_progress` receives `(bytes_downloaded, total_bytes)` while downloading.
///
/// This call blocks, and the first one may perform a network download. From
/// async code run it through `tokio::task::spawn_blocking` or
/// `tokio::task::block_in_place`, never directly on a runtime worker.
pub fn ensure_backend(
    on_progress: Option<&dyn Fn(u64, Option<u64>)>,
) -> Result<PathBuf, Pdf2ImgError> {
    if let Some(path) = pdfium_setup::installed_library() {
        debug!("PDFium found at {}", path.display());
    } else {
        info!("PDFium not found; installing");
    }

    pdfium_setup::ensure_library(on_progress)
        .map_err(|e| Pdf2ImgError::DependencyMissing(e.to_string()))
}

/// `true` when no download is needed before the first render.
pub fn is_backend_installed() -> bool {
    pdfium_setup::installed_library().is_some()
}

/// Bind a fresh PDFium instance for one rendering job.
pub(crate) fn bind() -> Result<Pdfium, Pdf2ImgError> {
    let path = ensure_backend(None)?;
    pdfium_setup::bind(&path).map_err(|e| Pdf2ImgError::DependencyMissing(e.to_string()))
}
