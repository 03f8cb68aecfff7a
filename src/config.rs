//! Configuration types for PDF-to-image conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the fixed
//! behaviour of the tool: 300 DPI, a 4-image collage, 300 × 300 px cells.

use crate::error::Pdf2ImgError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default rasterisation resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Default number of leading pages placed in the collage.
pub const DEFAULT_MAX_COLLAGE_IMAGES: usize = 4;

/// Edge length, in pixels, of one collage cell.
pub const THUMBNAIL_SIZE: u32 = 300;

const MIN_DPI: u32 = 72;
const MAX_DPI: u32 = 600;

/// Bounds for `max_rendered_pixels`; pdfium sizes bitmaps with a C `int`.
const MIN_RENDERED_PIXELS: u32 = 100;
const MAX_RENDERED_PIXELS: u32 = i32::MAX as u32;

/// Configuration for a PDF-to-image conversion.
///
/// # Example
/// ```rust
/// use pdf2img::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .dpi(150)
///     .max_collage_images(2)
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 150);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Rendering DPI. Range: 72–600. Default: 300.
    ///
    /// A page is rendered at `points × dpi / 72` pixels per edge, so an A4 page
    /// at 300 DPI comes out at roughly 2480 × 3508 px.
    pub dpi: u32,

    /// Optional cap on the longest rendered edge, in pixels. Default: none.
    pub max_rendered_pixels: Option<u32>,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Number of leading pages placed in the collage. Default: 4.
    pub max_collage_images: usize,

    /// Receives per-page events while pages are persisted.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            max_rendered_pixels: None,
            password: None,
            max_collage_images: DEFAULT_MAX_COLLAGE_IMAGES,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("dpi", &self.dpi)
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_collage_images", &self.max_collage_images)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = Some(px.clamp(MIN_RENDERED_PIXELS, MAX_RENDERED_PIXELS));
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn max_collage_images(mut self, n: usize) -> Self {
        self.config.max_collage_images = n;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2ImgError> {
        let c = &self.config;
        if !(MIN_DPI..=MAX_DPI).contains(&c.dpi) {
            return Err(Pdf2ImgError::InvalidConfig(format!(
                "DPI must be {MIN_DPI}–{MAX_DPI}, got {}",
                c.dpi
            )));
        }
        if c.max_collage_images == 0 {
            return Err(Pdf2ImgError::InvalidConfig(
                "Collage must hold at least one image".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Collage layout direction.
///
/// Parsing accepts only the canonical lowercase names; front ends lower-case
/// the user-facing label (`Horizontal` / `Vertical`) before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// One row, N columns. (default)
    #[default]
    Horizontal,
    /// N rows, one column.
    Vertical,
}

impl Orientation {
    /// Both choices, in selector order.
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Orientation::Horizontal => "Horizontal",
            Orientation::Vertical => "Vertical",
        }
    }

    /// Canonical lowercase value.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }

    /// Grid shape `(columns, rows)` for `n` cells.
    pub fn grid(self, n: u32) -> (u32, u32) {
        match self {
            Orientation::Horizontal => (n, 1),
            Orientation::Vertical => (1, n),
        }
    }
}

impl FromStr for Orientation {
    type Err = Pdf2ImgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            other => Err(Pdf2ImgError::InvalidOrientation(other.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
