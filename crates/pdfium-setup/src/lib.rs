//! # pdfium-setup
//!
//! Makes sure a [PDFium](https://pdfium.googlesource.com/pdfium/) shared
//! library is available to `pdfium-render`, fetching it on first use.
//!
//! Resolution order, first match wins:
//!
//! 1. `PDFIUM_LIB_PATH`: an existing library on disk.
//! 2. `<cache>/pdf2img/pdfium-{VERSION}/<lib>` from an earlier run.
//! 3. Download `pdfium-<platform>.tgz` from
//!    [bblanchon/pdfium-binaries](https://github.com/bblanchon/pdfium-binaries),
//!    extract the library into the cache directory.
//!
//! The resolved path is remembered for the lifetime of the process.
//!
//! ```rust,no_run
//! let path = pdfium_setup::ensure_library(None).expect("PDFium unavailable");
//! let pdfium = pdfium_setup::bind(&path).expect("bind failed");
//! ```

mod cache;
mod fetch;
mod platform;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use pdfium_render::prelude::Pdfium;
use thiserror::Error;
use tracing::{info, warn};

pub use cache::{cache_dir, ENV_CACHE_DIR, ENV_LIB_PATH};
pub use platform::Platform;

/// The pdfium-binaries release tag used for downloads.
pub const PDFIUM_VERSION: &str = "7690";

const BASE_URL: &str = "https://github.com/bblanchon/pdfium-binaries/releases/download";

/// Errors raised while provisioning or binding PDFium.
#[derive(Error, Debug)]
pub enum SetupError {
    /// No release asset exists for this OS / architecture.
    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The cache directory could not be created.
    #[error("Cache directory error: {0}")]
    CacheDir(#[source] std::io::Error),

    /// Network download failed.
    #[error("Download failed: {0}")]
    Download(String),

    /// gzip/tar extraction failed.
    #[error("Archive extraction failed: {0}")]
    Extract(String),

    /// `pdfium-render` could not load the library.
    #[error("Failed to bind PDFium from '{path}': {reason}")]
    Bind { path: PathBuf, reason: String },
}

static RESOLVED: OnceLock<PathBuf> = OnceLock::new();

/// Path of a usable library if one is already on disk. Never downloads.
pub fn installed_library() -> Option<PathBuf> {
    if let Some(p) = RESOLVED.get() {
        return Some(p.clone());
    }
    cache::env_override().or_else(|| {
        let info = platform::current().ok()?;
        let p = cache_dir().join(info.lib_name);
        p.exists().then_some(p)
    })
}

/// Returns the library path, downloading it into the cache when absent.
///
/// `on_progress` receives `(bytes_downloaded, total_bytes)` during a download.
/// Safe to call repeatedly; after the first success it returns immediately.
pub fn ensure_library(on_progress: Option<&dyn Fn(u64, Option<u64>)>) -> Result<PathBuf, SetupError> {
    if let Some(path) = RESOLVED.get() {
        return Ok(path.clone());
    }

    let path = resolve(on_progress)?;
    Ok(RESOLVED.get_or_init(|| path).clone())
}

/// Binds to the library at `path`.
pub fn bind(path: &Path) -> Result<Pdfium, SetupError> {
    Pdfium::bind_to_library(path)
        .map(Pdfium::new)
        .map_err(|e| SetupError::Bind {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn resolve(on_progress: Option<&dyn Fn(u64, Option<u64>)>) -> Result<PathBuf, SetupError> {
    if let Some(p) = cache::env_override() {
        return Ok(p);
    }
    if let Ok(p) = std::env::var(ENV_LIB_PATH) {
        if !p.is_empty() {
            warn!("{} '{}' not found; falling back to download", ENV_LIB_PATH, p);
        }
    }

    let info = platform::current()?;
    let dir = cache_dir();
    let lib_path = dir.join(info.lib_name);
    if lib_path.exists() {
        return Ok(lib_path);
    }

    let url = format!("{BASE_URL}/chromium%2F{PDFIUM_VERSION}/{}", info.archive);
    info!("Downloading PDFium {} from {}", PDFIUM_VERSION, url);

    std::fs::create_dir_all(&dir).map_err(SetupError::CacheDir)?;
    let archive = fetch::download(&url, on_progress)?;
    fetch::extract(&archive, info.member, &lib_path)?;

    info!("PDFium installed at {}", lib_path.display());
    Ok(lib_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_platform_is_supported() {
        platform::current().expect("current platform should be supported");
    }

    #[test]
    fn bind_reports_path_on_failure() {
        let err = bind(Path::new("/definitely/not/libpdfium.so"))
            .err()
            .expect("binding a missing file must fail");
        assert!(err.to_string().contains("/definitely/not/libpdfium.so"));
    }
}
