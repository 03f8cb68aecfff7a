//! One conversion request, start to finish.
//!
//! [`run_session`] is the request handler shared by every front end. It takes
//! everything it needs through a [`RequestContext`] and returns every
//! artifact in memory, so no state survives between requests.
//!
//! ```text
//! RequestContext
//!  │
//!  ├─ 1. Render    pdf bytes → page images            (abort on failure)
//!  ├─ 2. Persist   page_1.png … page_N.png in a ScopedWorkspace
//!  ├─ 3. Archive   converted_images.zip
//!  ├─ 4. Pages     one download per page_N.png
//!  ├─ 5. Collage   leading pages on a grid → collage.png
//!  └─ 6. Release   workspace removed on return, success or not
//! ```

use crate::config::{ConversionConfig, Orientation};
use crate::error::Pdf2ImgError;
use crate::output::{
    ConversionStats, Download, PageArtifact, SessionOutput, ARCHIVE_FILE_NAME, COLLAGE_FILE_NAME,
    MIME_PNG, MIME_ZIP,
};
use crate::pipeline::{archive, collage, encode, persist, render};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::TempDir;
use tracing::{debug, error, info};

/// Inputs for one conversion request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Name of the uploaded file, used for logging and display.
    pub file_name: String,
    pub pdf_bytes: Vec<u8>,
    pub orientation: Orientation,
}

impl RequestContext {
    pub fn new(file_name: impl Into<String>, pdf_bytes: Vec<u8>, orientation: Orientation) -> Self {
        Self {
            file_name: file_name.into(),
            pdf_bytes,
            orientation,
        }
    }
}

/// A request-private temporary directory, removed recursively on drop.
#[derive(Debug)]
pub struct ScopedWorkspace {
    dir: TempDir,
}

impl ScopedWorkspace {
    pub fn create() -> Result<Self, Pdf2ImgError> {
        let dir = tempfile::Builder::new()
            .prefix("pdf2img-")
            .tempdir()
            .map_err(|e| Pdf2ImgError::storage(std::env::temp_dir(), e))?;
        debug!("Workspace created at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace now, surfacing any deletion error.
    pub fn close(self) -> Result<(), Pdf2ImgError> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| Pdf2ImgError::storage(path, e))
    }
}

/// Run one conversion request.
///
/// Any failure aborts the whole request; the workspace is removed either way.
pub async fn run_session(
    ctx: RequestContext,
    config: &ConversionConfig,
) -> Result<SessionOutput, Pdf2ImgError> {
    let total_start = Instant::now();
    let RequestContext {
        file_name,
        pdf_bytes,
        orientation,
    } = ctx;
    info!(
        "Starting conversion: '{}' ({} bytes, {} collage)",
        file_name,
        pdf_bytes.len(),
        orientation.as_str()
    );

    // ── Step 1: Rasterise ────────────────────────────────────────────────
    let render_start = Instant::now();
    let images = render::render_pdf_bytes(pdf_bytes, config)
        .await
        .inspect_err(|e| error!("Error converting PDF to images: {}", e))?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    info!("Rendered {} pages in {}ms", images.len(), render_duration_ms);

    // ── Steps 2–5 run inside the workspace ───────────────────────────────
    let workspace = ScopedWorkspace::create()?;
    let result = assemble(&images, workspace.path(), orientation, config);
    if let Err(e) = workspace.close() {
        error!("Failed to remove workspace: {}", e);
    }
    let (pages, archive, collage, (collage_width, collage_height), persist_duration_ms) = result?;

    let stats = ConversionStats {
        total_pages: images.len(),
        collage_pages: images.len().min(config.max_collage_images),
        render_duration_ms,
        persist_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Conversion complete: {} pages, {}ms total",
        stats.total_pages, stats.total_duration_ms
    );
    if let Some(cb) = config.progress_callback.as_deref() {
        cb.on_conversion_complete(stats.total_pages);
    }

    Ok(SessionOutput {
        source_name: file_name,
        pages,
        archive,
        collage,
        collage_width,
        collage_height,
        orientation,
        stats,
    })
}

type Assembled = (Vec<PageArtifact>, Download, Download, (u32, u32), u64);

fn assemble(
    images: &[DynamicImage],
    dir: &Path,
    orientation: Orientation,
    config: &ConversionConfig,
) -> Result<Assembled, Pdf2ImgError> {
    let progress = config.progress_callback.as_deref();
    if let Some(cb) = progress {
        cb.on_conversion_start(images.len());
    }

    // ── Step 2: Persist ──────────────────────────────────────────────────
    let persist_start = Instant::now();
    let paths = persist::persist_images(images, dir, progress)?;
    let persist_duration_ms = persist_start.elapsed().as_millis() as u64;
    info!("Saved {} pages in {}ms", paths.len(), persist_duration_ms);

    // ── Step 3: Archive ──────────────────────────────────────────────────
    let archive = Download::new(ARCHIVE_FILE_NAME, MIME_ZIP, archive::build_zip(&paths)?);
    debug!("Archive ready: {} bytes", archive.size());

    // ── Step 4: Per-page downloads ───────────────────────────────────────
    let pages = paths
        .iter()
        .zip(images)
        .enumerate()
        .map(|(i, (path, img))| {
            let bytes = read_back(path)?;
            let file_name = file_name_of(path);
            Ok(PageArtifact {
                page_num: i + 1,
                width: img.width(),
                height: img.height(),
                download: Download::new(file_name, MIME_PNG, bytes),
            })
        })
        .collect::<Result<Vec<_>, Pdf2ImgError>>()?;

    // ── Step 5: Collage ──────────────────────────────────────────────────
    let canvas = collage::compose_collage(images, config.max_collage_images, orientation);
    let dims = canvas.dimensions();
    if let Some(cb) = progress {
        cb.on_collage_ready(dims.0, dims.1);
    }

    let collage_path = dir.join(COLLAGE_FILE_NAME);
    let png = encode::encode_png(&DynamicImage::ImageRgb8(canvas))
        .map_err(|e| Pdf2ImgError::storage(&collage_path, std::io::Error::other(e)))?;
    std::fs::write(&collage_path, &png).map_err(|e| Pdf2ImgError::storage(&collage_path, e))?;
    let collage = Download::new(COLLAGE_FILE_NAME, MIME_PNG, read_back(&collage_path)?);
    info!("Collage ready: {}x{} px ({})", dims.0, dims.1, orientation);

    Ok((pages, archive, collage, dims, persist_duration_ms))
}

/// Synchronous wrapper around [`run_session`].
///
/// Creates a temporary tokio runtime internally.
pub fn run_session_sync(
    ctx: RequestContext,
    config: &ConversionConfig,
) -> Result<SessionOutput, Pdf2ImgError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2ImgError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(run_session(ctx, config))
}

/// Write every download of `output` into `dir`.
///
/// Each file is written to a `.tmp` sibling first and renamed into place, so
/// a failed run never leaves a truncated artifact behind.
pub async fn write_outputs(
    output: &SessionOutput,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, Pdf2ImgError> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Pdf2ImgError::storage(dir, e))?;

    let mut written = Vec::new();
    for download in output.downloads() {
        let path = dir.join(&download.file_name);
        let tmp_path = dir.join(format!("{}.tmp", download.file_name));

        tokio::fs::write(&tmp_path, &download.bytes)
            .await
            .map_err(|e| Pdf2ImgError::storage(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| Pdf2ImgError::storage(&path, e))?;

        debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn read_back(path: &Path) -> Result<Vec<u8>, Pdf2ImgError> {
    std::fs::read(path).map_err(|e| Pdf2ImgError::storage(path, e))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
