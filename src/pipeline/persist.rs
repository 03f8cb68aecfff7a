//! Write rasterised pages to `page_<N>.png` files.

use crate::error::Pdf2ImgError;
use crate::output::page_file_name;
use crate::progress::ConversionProgressCallback;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persist `images` into `dir` as `page_1.png … page_N.png`.
///
/// `dir` is created if missing. Paths are returned in input order. The first
/// failed write aborts the batch; files already written are left for the
/// owning workspace to clean up.
pub fn persist_images(
    images: &[DynamicImage],
    dir: &Path,
    progress: Option<&dyn ConversionProgressCallback>,
) -> Result<Vec<PathBuf>, Pdf2ImgError> {
    std::fs::create_dir_all(dir).map_err(|e| Pdf2ImgError::storage(dir, e))?;

    let total = images.len();
    let mut paths = Vec::with_capacity(total);

    for (i, image) in images.iter().enumerate() {
        let page_num = i + 1;
        let path = dir.join(page_file_name(page_num));

        image
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| Pdf2ImgError::storage(&path, into_io_error(e)))?;
        debug!("Saved page {} → {}", page_num, path.display());

        if let Some(cb) = progress {
            cb.on_page_saved(page_num, total, &path, image.width(), image.height());
        }
        paths.push(path);
    }

    Ok(paths)
}

fn into_io_error(e: image::ImageError) -> std::io::Error {
    match e {
        image::ImageError::IoError(io) => io,
        other => std::io::Error::other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::sync::Mutex;

    fn solid(w: u32, h: u32, shade: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([shade, shade, shade])))
    }

    #[derive(Default)]
    struct Order(Mutex<Vec<usize>>);

    impl ConversionProgressCallback for Order {
        fn on_page_saved(&self, page_num: usize, _t: usize, path: &Path, _w: u32, _h: u32) {
            assert!(path.exists(), "callback must fire after the write");
            self.0.lock().unwrap().push(page_num);
        }
    }

    #[test]
    fn writes_numbered_pngs_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let images = vec![solid(4, 4, 0), solid(5, 3, 128), solid(2, 7, 255)];

        let paths = persist_images(&images, tmp.path(), None).unwrap();

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["page_1.png", "page_2.png", "page_3.png"]);

        let second = image::open(&paths[1]).unwrap();
        assert_eq!((second.width(), second.height()), (5, 3));
    }

    #[test]
    fn creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let paths = persist_images(&[solid(1, 1, 0)], &nested, None).unwrap();
        assert!(paths[0].starts_with(&nested));
        // Idempotent on an existing directory.
        persist_images(&[solid(1, 1, 0)], &nested, None).unwrap();
    }

    #[test]
    fn reports_each_page_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let order = Order::default();
        persist_images(&[solid(1, 1, 0), solid(1, 1, 1)], tmp.path(), Some(&order)).unwrap();
        assert_eq!(*order.0.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn unwritable_target_is_a_storage_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let err = persist_images(&[solid(1, 1, 0)], &blocker, None).unwrap_err();
        assert!(matches!(err, Pdf2ImgError::Storage { .. }));
    }

    #[test]
    fn empty_input_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = persist_images(&[], tmp.path(), None).unwrap();
        assert!(paths.is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
