//! Persist → archive → collage, wired together without PDFium.
//!
//! Page images are synthesised in memory so these run everywhere.

use image::{DynamicImage, Rgb, RgbImage};
use pdf2img::pipeline::{archive, collage, encode, persist};
use pdf2img::{ConversionProgressCallback, Orientation};
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Mutex;

fn page(w: u32, h: u32, shade: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([shade, 0, 0])))
}

#[derive(Default)]
struct Recorder {
    saved: Mutex<Vec<(usize, usize, String)>>,
}

impl ConversionProgressCallback for Recorder {
    fn on_page_saved(&self, page_num: usize, total: usize, path: &Path, _w: u32, _h: u32) {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.saved.lock().unwrap().push((page_num, total, name));
    }
}

#[test]
fn persisted_pages_round_trip_through_the_archive() {
    let dir = tempfile::tempdir().unwrap();
    let images: Vec<_> = (0..5).map(|i| page(40 + i * 10, 60, 50 * i as u8)).collect();
    let recorder = Recorder::default();

    let paths = persist::persist_images(&images, dir.path(), Some(&recorder)).unwrap();
    assert_eq!(
        *recorder.saved.lock().unwrap(),
        (1..=5)
            .map(|n| (n, 5, format!("page_{n}.png")))
            .collect::<Vec<_>>()
    );

    let zip_bytes = archive::build_zip(&paths).unwrap();
    let mut zip = zip::ZipArchive::new(Cursor::new(zip_bytes)).unwrap();
    assert_eq!(zip.len(), 5);

    for (i, path) in paths.iter().enumerate() {
        let mut entry = zip.by_index(i).unwrap();
        assert_eq!(entry.name(), format!("page_{}.png", i + 1));
        assert_eq!(entry.compression(), zip::CompressionMethod::Stored);

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, std::fs::read(path).unwrap());

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), images[i].width());
    }
}

#[test]
fn vertical_collage_pads_short_thumbnails_with_white() {
    let images: Vec<_> = (0..5).map(|_| page(600, 300, 200)).collect();

    let canvas = collage::compose_collage(&images, 4, Orientation::Vertical);
    assert_eq!(canvas.dimensions(), (300, 1200));

    // 600×300 shrinks to 300×150 at the top of each 300×300 cell.
    for cell in 0..4 {
        let top = cell * 300;
        assert_eq!(*canvas.get_pixel(10, top + 10), Rgb([200, 0, 0]));
        assert_eq!(*canvas.get_pixel(10, top + 200), Rgb([255, 255, 255]));
    }
}

#[test]
fn collage_png_and_data_uri_agree() {
    let images = vec![page(300, 300, 10), page(300, 300, 20)];
    let canvas = collage::compose_collage(&images, 4, Orientation::Horizontal);

    let png = encode::encode_png(&DynamicImage::ImageRgb8(canvas)).unwrap();
    let uri = encode::to_data_uri(&png, "image/png");
    assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));

    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (600, 300));
}
