//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to see each
//! page the moment it lands on disk. The CLI prints a line per page; a GUI
//! can show the image straight away.
//!
//! # Example
//!
//! ```rust
//! use pdf2img::{ConversionProgressCallback, ConversionConfig};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     saved: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_saved(&self, page_num: usize, total: usize, path: &Path, _w: u32, _h: u32) {
//!         self.saved.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Page {}/{} → {}", page_num, total, path.display());
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { saved: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it moves through its stages.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events arrive in page order.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once rasterisation has finished.
    ///
    /// # Arguments
    /// * `total_pages`: number of pages that will be persisted
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called right after `page_<page_num>.png` has been written.
    ///
    /// # Arguments
    /// * `page_num`   : 1-indexed page number
    /// * `total_pages`: total pages in the document
    /// * `path`       : location of the written PNG
    /// * `width`, `height`: pixel dimensions of the page image
    fn on_page_saved(&self, page_num: usize, total_pages: usize, path: &Path, width: u32, height: u32) {
        let _ = (page_num, total_pages, path, width, height);
    }

    /// Called once the collage has been composed.
    fn on_collage_ready(&self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Called once every artifact is ready for download.
    fn on_conversion_complete(&self, total_pages: usize) {
        let _ = total_pages;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCallback {
        saved: Mutex<Vec<(usize, PathBuf)>>,
        completed: Mutex<Option<usize>>,
    }

    impl ConversionProgressCallback for RecordingCallback {
        fn on_page_saved(&self, page_num: usize, _total: usize, path: &Path, _w: u32, _h: u32) {
            self.saved.lock().unwrap().push((page_num, path.to_path_buf()));
        }

        fn on_conversion_complete(&self, total_pages: usize) {
            *self.completed.lock().unwrap() = Some(total_pages);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(5);
        cb.on_page_saved(1, 5, Path::new("page_1.png"), 10, 10);
        cb.on_collage_ready(1200, 300);
        cb.on_conversion_complete(5);
    }

    #[test]
    fn recording_callback_receives_events() {
        let rec = RecordingCallback::default();
        rec.on_page_saved(1, 2, Path::new("a/page_1.png"), 1, 1);
        rec.on_page_saved(2, 2, Path::new("a/page_2.png"), 1, 1);
        rec.on_conversion_complete(2);

        let saved = rec.saved.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].0, 2);
        assert_eq!(*rec.completed.lock().unwrap(), Some(2));
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(10);
        cb.on_collage_ready(300, 300);
    }
}
