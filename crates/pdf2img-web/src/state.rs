//! Shared application state.

use pdf2img::ConversionConfig;

/// Read-only settings shared by every request.
///
/// Holds no per-user data; concurrent conversions never see each other.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ConversionConfig,
}

impl AppState {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }
}
