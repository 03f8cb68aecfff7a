//! Thumbnail collage of the leading pages.
//!
//! The canvas is a white grid of square cells, one row for
//! [`Orientation::Horizontal`] or one column for [`Orientation::Vertical`].
//! Each page is shrunk to fit its cell without changing aspect ratio and
//! pasted at the cell's top-left corner; smaller thumbnails leave white space
//! to the right and below.

use crate::config::{Orientation, THUMBNAIL_SIZE};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Compose up to `max_images` leading images onto a fixed-cell grid.
///
/// Images past `max_images` are ignored. An empty input yields a 0×0 canvas.
pub fn compose_collage(
    images: &[DynamicImage],
    max_images: usize,
    orientation: Orientation,
) -> RgbImage {
    let n = images.len().min(max_images);
    let (width, height) = collage_dimensions(n, orientation);
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

    let (cols, _rows) = orientation.grid(n as u32);
    for (i, img) in images.iter().take(n).enumerate() {
        let i = i as u32;
        let x = (i % cols) * THUMBNAIL_SIZE;
        let y = (i / cols) * THUMBNAIL_SIZE;

        let thumb = thumbnail(img, THUMBNAIL_SIZE);
        debug!(
            "Collage cell {} at ({}, {}) ← {}x{} thumbnail",
            i + 1,
            x,
            y,
            thumb.width(),
            thumb.height()
        );
        imageops::replace(&mut canvas, &thumb, i64::from(x), i64::from(y));
    }

    canvas
}

/// Canvas size `(width, height)` for `n` cells.
pub fn collage_dimensions(n: usize, orientation: Orientation) -> (u32, u32) {
    if n == 0 {
        return (0, 0);
    }
    let (cols, rows) = orientation.grid(n as u32);
    (cols * THUMBNAIL_SIZE, rows * THUMBNAIL_SIZE)
}

/// Shrink `img` to fit a `bound`×`bound` box, never enlarging it.
fn thumbnail(img: &DynamicImage, bound: u32) -> RgbImage {
    let rgb = img.to_rgb8();
    let (w, h) = contain_fit(rgb.width(), rgb.height(), bound);
    if (w, h) == rgb.dimensions() {
        rgb
    } else {
        imageops::resize(&rgb, w, h, FilterType::CatmullRom)
    }
}

/// Target dimensions for a contain-fit into a square box.
///
/// The constrained edge is set to `bound`; the other edge is whichever of
/// floor/ceil keeps the aspect ratio closest to the source, at least 1 px.
pub(crate) fn contain_fit(width: u32, height: u32, bound: u32) -> (u32, u32) {
    if width <= bound && height <= bound {
        return (width, height);
    }

    let aspect = f64::from(width) / f64::from(height);
    let b = f64::from(bound);

    if aspect <= 1.0 {
        // Height-limited: derive the width.
        let w = closest_edge(b * aspect, |n| (aspect - n / b).abs());
        (w, bound)
    } else {
        let h = closest_edge(b / aspect, |n| (aspect - b / n).abs());
        (bound, h)
    }
}

fn closest_edge(exact: f64, error: impl Fn(f64) -> f64) -> u32 {
    let lo = exact.floor().max(1.0);
    let hi = exact.ceil().max(1.0);
    let pick = if error(hi) < error(lo) { hi } else { lo };
    pick as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(rgb)))
    }

    const RED: [u8; 3] = [255, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn horizontal_canvas_is_n_cells_wide() {
        for n in 1..=6usize {
            let imgs: Vec<_> = (0..n).map(|_| solid(50, 50, RED)).collect();
            let c = compose_collage(&imgs, 4, Orientation::Horizontal);
            assert_eq!(c.dimensions(), (n.min(4) as u32 * 300, 300), "n={n}");
        }
    }

    #[test]
    fn vertical_canvas_is_n_cells_tall() {
        for n in 1..=6usize {
            let imgs: Vec<_> = (0..n).map(|_| solid(50, 50, RED)).collect();
            let c = compose_collage(&imgs, 4, Orientation::Vertical);
            assert_eq!(c.dimensions(), (300, n.min(4) as u32 * 300), "n={n}");
        }
    }

    #[test]
    fn six_pages_horizontal_uses_first_four_only() {
        let colours: Vec<[u8; 3]> = (0..6).map(|i| [i as u8 * 40, 10, 10]).collect();
        let imgs: Vec<_> = colours.iter().map(|&c| solid(600, 600, c)).collect();

        let c = compose_collage(&imgs, 4, Orientation::Horizontal);
        assert_eq!(c.dimensions(), (1200, 300));
        for (cell, colour) in colours.iter().take(4).enumerate() {
            assert_eq!(*c.get_pixel(cell as u32 * 300 + 150, 150), Rgb(*colour));
        }
    }

    #[test]
    fn two_pages_vertical_stack_top_to_bottom() {
        let imgs = vec![solid(300, 300, RED), solid(300, 300, BLUE)];
        let c = compose_collage(&imgs, 4, Orientation::Vertical);
        assert_eq!(c.dimensions(), (300, 600));
        assert_eq!(*c.get_pixel(0, 0), Rgb(RED));
        assert_eq!(*c.get_pixel(0, 299), Rgb(RED));
        assert_eq!(*c.get_pixel(0, 300), Rgb(BLUE));
        assert_eq!(*c.get_pixel(299, 599), Rgb(BLUE));
    }

    #[test]
    fn small_images_are_not_upscaled_and_sit_top_left() {
        let imgs = vec![solid(100, 40, RED)];
        let c = compose_collage(&imgs, 4, Orientation::Horizontal);
        assert_eq!(*c.get_pixel(0, 0), Rgb(RED));
        assert_eq!(*c.get_pixel(99, 39), Rgb(RED));
        assert_eq!(*c.get_pixel(100, 0), WHITE);
        assert_eq!(*c.get_pixel(0, 40), WHITE);
        assert_eq!(*c.get_pixel(299, 299), WHITE);
    }

    #[test]
    fn portrait_page_leaves_whitespace_on_the_right() {
        // Letter at 300 DPI.
        let imgs = vec![solid(2550, 3300, BLUE)];
        let c = compose_collage(&imgs, 4, Orientation::Horizontal);
        assert_eq!(*c.get_pixel(10, 299), Rgb(BLUE));
        assert_eq!(*c.get_pixel(240, 150), WHITE);
    }

    #[test]
    fn contain_fit_never_upscales() {
        assert_eq!(contain_fit(120, 80, 300), (120, 80));
        assert_eq!(contain_fit(300, 300, 300), (300, 300));
    }

    #[test]
    fn contain_fit_preserves_aspect() {
        assert_eq!(contain_fit(2550, 3300, 300), (232, 300));
        assert_eq!(contain_fit(3300, 2550, 300), (300, 232));
        assert_eq!(contain_fit(600, 600, 300), (300, 300));
        assert_eq!(contain_fit(400, 100, 300), (300, 75));
        assert_eq!(contain_fit(200, 400, 300), (150, 300));
    }

    #[test]
    fn contain_fit_keeps_at_least_one_pixel() {
        assert_eq!(contain_fit(10_000, 1, 300), (300, 1));
    }

    #[test]
    fn composing_twice_is_pixel_identical() {
        let imgs = vec![solid(900, 500, RED), solid(333, 777, BLUE)];
        let a = compose_collage(&imgs, 4, Orientation::Horizontal);
        let b = compose_collage(&imgs, 4, Orientation::Horizontal);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn zero_cells_have_no_area_in_either_orientation() {
        assert_eq!(collage_dimensions(0, Orientation::Horizontal), (0, 0));
        assert_eq!(collage_dimensions(0, Orientation::Vertical), (0, 0));
        let c = compose_collage(&[solid(50, 50, RED)], 0, Orientation::Vertical);
        assert_eq!(c.dimensions(), (0, 0));
    }

    #[test]
    fn no_images_gives_empty_canvas() {
        let c = compose_collage(&[], 4, Orientation::Horizontal);
        assert_eq!(c.dimensions(), (0, 0));
        let c = compose_collage(&[], 4, Orientation::Vertical);
        assert_eq!(c.dimensions(), (0, 0));
    }
}
