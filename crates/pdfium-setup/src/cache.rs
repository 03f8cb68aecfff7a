//! Cache directory and environment overrides.

use crate::PDFIUM_VERSION;
use std::path::PathBuf;

/// Points at an existing library; skips the download entirely.
pub const ENV_LIB_PATH: &str = "PDFIUM_LIB_PATH";

/// Replaces the base of the cache directory.
pub const ENV_CACHE_DIR: &str = "PDFIUM_SETUP_CACHE_DIR";

const APP_DIR: &str = "pdf2img";

/// Per-version cache directory for the library.
///
/// - **Linux**: `~/.cache/pdf2img/pdfium-{VERSION}/`
/// - **macOS**: `~/Library/Caches/pdf2img/pdfium-{VERSION}/`
/// - **Windows**: `%LOCALAPPDATA%\pdf2img\pdfium-{VERSION}\`
pub fn cache_dir() -> PathBuf {
    let versioned = format!("pdfium-{PDFIUM_VERSION}");

    if let Ok(base) = std::env::var(ENV_CACHE_DIR) {
        if !base.is_empty() {
            return PathBuf::from(base).join(versioned);
        }
    }

    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(versioned)
}

/// Library path named by `PDFIUM_LIB_PATH`, if it is set and exists.
pub fn env_override() -> Option<PathBuf> {
    std::env::var(ENV_LIB_PATH)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .filter(|p| p.exists())
}
