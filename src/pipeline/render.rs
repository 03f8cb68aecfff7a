//! PDF rasterisation: render every page to a `DynamicImage` via pdfium.
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which keeps
//! thread-local state and must not run on Tokio worker threads.
//! [`render_pdf_bytes`] therefore moves the work onto the blocking pool;
//! synchronous callers can use [`render_pdf_bytes_blocking`] directly.
//!
//! Each page is rendered at `points × dpi / 72` pixels per edge, so output
//! dimensions follow both the requested DPI and the page's physical size.

use crate::backend;
use crate::config::ConversionConfig;
use crate::error::Pdf2ImgError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::{debug, info};

/// Byte window searched for the `%PDF` header.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Rasterise every page of an in-memory PDF, in document order.
///
/// Fails with [`Pdf2ImgError::Decode`] for malformed, encrypted or empty
/// documents; no partial result is ever returned.
pub async fn render_pdf_bytes(
    pdf_bytes: Vec<u8>,
    config: &ConversionConfig,
) -> Result<Vec<DynamicImage>, Pdf2ImgError> {
    let dpi = config.dpi;
    let max_pixels = config.max_rendered_pixels;
    let password = config.password.clone();

    tokio::task::spawn_blocking(move || {
        render_pdf_bytes_blocking(&pdf_bytes, dpi, max_pixels, password.as_deref())
    })
    .await
    .map_err(|e| Pdf2ImgError::Internal(format!("Render task panicked: {e}")))?
}

/// Blocking implementation of page rendering.
pub fn render_pdf_bytes_blocking(
    pdf_bytes: &[u8],
    dpi: u32,
    max_pixels: Option<u32>,
    password: Option<&str>,
) -> Result<Vec<DynamicImage>, Pdf2ImgError> {
    check_pdf_header(pdf_bytes)?;

    let pdfium = backend::bind()?;

    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, password)
        .map_err(|e| {
            let err_str = format!("{e:?}");
            let detail = if err_str.contains("Password") || err_str.contains("password") {
                if password.is_some() {
                    "wrong password".to_string()
                } else {
                    "document is encrypted and requires a password".to_string()
                }
            } else {
                format!("document could not be opened: {err_str}")
            };
            Pdf2ImgError::Decode { detail }
        })?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    if total_pages == 0 {
        return Err(Pdf2ImgError::Decode {
            detail: "document has no pages".into(),
        });
    }
    info!("PDF loaded: {} pages, rendering at {} DPI", total_pages, dpi);

    let mut results = Vec::with_capacity(total_pages);

    for (idx, page) in pages.iter().enumerate() {
        // One factor for both axes; the pixel cap is folded into it.
        let scale = page_scale(page.width().value, page.height().value, dpi, max_pixels);
        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| Pdf2ImgError::Decode {
                detail: format!("page {} failed to render: {e:?}", idx + 1),
            })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            idx + 1,
            image.width(),
            image.height()
        );

        results.push(image);
    }

    Ok(results)
}

/// Uniform points → pixels factor for a page rendered at `dpi`.
///
/// When `max_pixels` is set and the longest edge would exceed it, the factor
/// shrinks so that edge lands on the cap and the aspect ratio is unchanged.
fn page_scale(width_pt: f32, height_pt: f32, dpi: u32, max_pixels: Option<u32>) -> f32 {
    let scale = dpi as f32 / 72.0;
    let longest = width_pt.max(height_pt);
    match max_pixels {
        Some(cap) if longest > 0.0 && longest * scale > cap as f32 => cap as f32 / longest,
        _ => scale,
    }
}

/// Pixel size of a page at `scale`, at least 1 px per edge.
#[cfg(test)]
fn scaled_size(width_pt: f32, height_pt: f32, scale: f32) -> (u32, u32) {
    let w = (width_pt * scale).round().max(1.0) as u32;
    let h = (height_pt * scale).round().max(1.0) as u32;
    (w, h)
}

/// Reject input without a `%PDF` header before touching pdfium.
fn check_pdf_header(bytes: &[u8]) -> Result<(), Pdf2ImgError> {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    if window.windows(4).any(|w| w == b"%PDF") {
        Ok(())
    } else {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        Err(Pdf2ImgError::Decode {
            detail: format!("input is not a PDF (first bytes: {magic:?})"),
        })
    }
}
