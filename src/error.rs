//! Error types for the pdf2img library.
//!
//! Every failure is terminal for the request that hit it: there is no
//! partial-success mode and nothing is retried. The variants fall into three
//! families that callers treat differently:
//!
//! * **Decode**: the PDF could not be rasterised. Shown to the user as-is.
//! * **Storage**: a local read/write failed while persisting pages, building
//!   the archive or saving the collage. Shown to the user generically.
//! * **DependencyMissing**: the PDFium engine is absent and could not be
//!   provisioned. Only ever expected at process start-up.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2img library.
#[derive(Debug, Error)]
pub enum Pdf2ImgError {
    // ── Rasterisation ─────────────────────────────────────────────────────
    /// The PDF is corrupt, encrypted, empty, or PDFium failed to render it.
    #[error("Failed to convert PDF to images: {detail}")]
    Decode { detail: String },

    // ── Storage ───────────────────────────────────────────────────────────
    /// A file under the request workspace (or the output directory) could
    /// not be written or read back.
    #[error("Storage failure at '{path}': {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Engine availability ───────────────────────────────────────────────
    /// PDFium could not be located, downloaded or bound.
    #[error(
        "PDF rendering engine unavailable: {0}\n\n\
PDFium is normally downloaded automatically on first run.\n\
If the auto-download failed, you can:\n\
  • Check your internet connection and try again.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n"
    )]
    DependencyMissing(String),

    // ── Caller errors ─────────────────────────────────────────────────────
    /// Orientation must be exactly `horizontal` or `vertical`.
    #[error("Invalid collage orientation '{0}': expected 'horizontal' or 'vertical'")]
    InvalidOrientation(String),

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error (task join failure, runtime creation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Pdf2ImgError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// `true` when the failure was caused by the uploaded document itself,
    /// as opposed to the host environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::InvalidOrientation(_) | Self::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_display_carries_detail() {
        let e = Pdf2ImgError::Decode {
            detail: "not a PDF".into(),
        };
        assert!(e.to_string().contains("not a PDF"));
        assert!(e.is_user_error());
    }

    #[test]
    fn storage_display_names_path() {
        let e = Pdf2ImgError::storage(
            "/tmp/ws/page_1.png",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = e.to_string();
        assert!(msg.contains("page_1.png"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
        assert!(!e.is_user_error());
    }

    #[test]
    fn dependency_missing_mentions_override() {
        let e = Pdf2ImgError::DependencyMissing("download failed".into());
        assert!(e.to_string().contains("PDFIUM_LIB_PATH"));
    }

    #[test]
    fn invalid_orientation_display() {
        let e = Pdf2ImgError::InvalidOrientation("Diagonal".into());
        assert!(e.to_string().contains("Diagonal"));
    }
}
