//! Output types produced by a conversion session.
//!
//! Everything a front end needs to offer the user is held in memory by
//! [`SessionOutput`], so the request's temporary workspace can be deleted as
//! soon as the session returns.

use crate::config::Orientation;
use crate::pipeline::encode;
use serde::{Deserialize, Serialize};

/// File name of the all-pages archive.
pub const ARCHIVE_FILE_NAME: &str = "converted_images.zip";

/// File name of the collage image.
pub const COLLAGE_FILE_NAME: &str = "collage.png";

pub const MIME_ZIP: &str = "application/zip";
pub const MIME_PNG: &str = "image/png";

/// File name of page `page_num` (1-indexed).
pub fn page_file_name(page_num: usize) -> String {
    format!("page_{page_num}.png")
}

/// One user-downloadable artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn new(file_name: impl Into<String>, mime_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type,
            bytes,
        }
    }

    /// `data:` URI embedding the artifact, for inline display or download links.
    pub fn data_uri(&self) -> String {
        encode::to_data_uri(&self.bytes, self.mime_type)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// A single converted page.
#[derive(Debug, Clone)]
pub struct PageArtifact {
    /// 1-indexed page number.
    pub page_num: usize,
    pub width: u32,
    pub height: u32,
    /// The persisted `page_<N>.png`.
    pub download: Download,
}

/// Timing and count statistics for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    pub total_pages: usize,
    /// Pages placed in the collage.
    pub collage_pages: usize,
    pub render_duration_ms: u64,
    pub persist_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Everything one conversion request produces.
#[derive(Debug, Clone)]
pub struct SessionOutput {
    /// Original upload name, for display.
    pub source_name: String,
    pub pages: Vec<PageArtifact>,
    /// `converted_images.zip`.
    pub archive: Download,
    /// `collage.png`.
    pub collage: Download,
    pub collage_width: u32,
    pub collage_height: u32,
    pub orientation: Orientation,
    pub stats: ConversionStats,
}

impl SessionOutput {
    /// All downloads, in the order they are offered: archive, pages, collage.
    pub fn downloads(&self) -> impl Iterator<Item = &Download> {
        std::iter::once(&self.archive)
            .chain(self.pages.iter().map(|p| &p.download))
            .chain(std::iter::once(&self.collage))
    }

    /// Serializable summary without the payload bytes.
    pub fn summary(&self) -> OutputSummary {
        OutputSummary {
            source_name: self.source_name.clone(),
            orientation: self.orientation,
            artifacts: self
                .downloads()
                .map(|d| ArtifactSummary {
                    file_name: d.file_name.clone(),
                    mime_type: d.mime_type.to_string(),
                    size: d.size(),
                })
                .collect(),
            stats: self.stats.clone(),
        }
    }
}

/// JSON-friendly description of a [`SessionOutput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSummary {
    pub source_name: String,
    pub orientation: Orientation,
    pub artifacts: Vec<ArtifactSummary>,
    pub stats: ConversionStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub file_name: String,
    pub mime_type: String,
    pub size: usize,
}
