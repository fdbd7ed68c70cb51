//! Overlay image preparation for comparison charts.
//!
//! Logos and product shots arrive on white backgrounds of arbitrary size.
//! They are made transparent where near-white, then letterboxed into a fixed
//! canvas so every series in a chart gets an overlay of the same footprint.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::CoreError;

/// A channel value strictly above this counts as "white".
pub const BACKGROUND_THRESHOLD: u8 = 240;

/// Canvas for product images.
pub const PRODUCT_CANVAS: (u32, u32) = (256, 256);

/// Canvas for brand logos.
pub const LOGO_CANVAS: (u32, u32) = (128, 64);

/// Whether a pixel is part of a near-white background.
pub fn is_background(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, _] = pixel.0;
    r > BACKGROUND_THRESHOLD && g > BACKGROUND_THRESHOLD && b > BACKGROUND_THRESHOLD
}

/// Make every near-white pixel fully transparent, in place.
pub fn strip_background(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        if is_background(pixel) {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

/// Scale `img` to fit inside `width` x `height` keeping its aspect ratio and
/// centre it on a transparent canvas of exactly that size.
pub fn letterbox(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    let (src_w, src_h) = img.dimensions();
    if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
        return canvas;
    }

    let scale = f64::min(
        f64::from(width) / f64::from(src_w),
        f64::from(height) / f64::from(src_h),
    );
    let new_w = ((f64::from(src_w) * scale).round() as u32).clamp(1, width);
    let new_h = ((f64::from(src_h) * scale).round() as u32).clamp(1, height);

    let resized = imageops::resize(img, new_w, new_h, FilterType::Triangle);
    let x = (width - new_w) / 2;
    let y = (height - new_h) / 2;
    imageops::overlay(&mut canvas, &resized, i64::from(x), i64::from(y));
    canvas
}

/// Decode raw image bytes, strip the background, letterbox into `canvas`,
/// and re-encode as PNG.
pub fn prepare_overlay(bytes: &[u8], canvas: (u32, u32)) -> Result<Vec<u8>, CoreError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CoreError::Validation(format!("Undecodable image: {e}")))?;
    let mut rgba = decoded.to_rgba8();
    strip_background(&mut rgba);
    let boxed = letterbox(&rgba, canvas.0, canvas.1);

    let mut out = Cursor::new(Vec::new());
    boxed
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| CoreError::Internal(format!("PNG encode failed: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_is_background_black_is_not() {
        assert!(is_background(&Rgba([255, 255, 255, 255])));
        assert!(!is_background(&Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn threshold_is_strict_and_per_channel() {
        assert!(!is_background(&Rgba([240, 240, 240, 255])));
        assert!(is_background(&Rgba([241, 241, 241, 255])));
        assert!(!is_background(&Rgba([255, 255, 200, 255])));
        assert!(!is_background(&Rgba([255, 100, 255, 255])));
    }

    #[test]
    fn strip_only_touches_background() {
        let mut img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([250, 250, 250, 255])
            } else {
                Rgba([10, 20, 30, 255])
            }
        });
        strip_background(&mut img);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(*img.get_pixel(1, 0), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn wide_image_is_padded_vertically() {
        let src = RgbaImage::from_pixel(200, 100, Rgba([0, 0, 255, 255]));
        let out = letterbox(&src, 100, 100);
        assert_eq!(out.dimensions(), (100, 100));
        // Scaled to 100x50 and centred: rows 25..75 are filled.
        assert_eq!(out.get_pixel(50, 10)[3], 0);
        assert_eq!(out.get_pixel(50, 90)[3], 0);
        assert_eq!(*out.get_pixel(50, 50), Rgba([0, 0, 255, 255]));
        assert_eq!(out.get_pixel(0, 50)[3], 255);
        assert_eq!(out.get_pixel(99, 50)[3], 255);
    }

    #[test]
    fn tall_image_is_padded_horizontally() {
        let src = RgbaImage::from_pixel(50, 200, Rgba([255, 0, 0, 255]));
        let out = letterbox(&src, 128, 64);
        assert_eq!(out.dimensions(), (128, 64));
        // Scaled to 16x64 and centred: columns 56..72 are filled.
        assert_eq!(out.get_pixel(10, 32)[3], 0);
        assert_eq!(out.get_pixel(120, 32)[3], 0);
        assert_eq!(*out.get_pixel(64, 32), Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(64, 0)[3], 255);
        assert_eq!(out.get_pixel(64, 63)[3], 255);
    }

    #[test]
    fn prepare_overlay_round_trips_through_png() {
        let mut src = RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 255]));
        src.put_pixel(20, 10, Rgba([0, 0, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        src.write_to(&mut bytes, ImageFormat::Png).unwrap();

        let png = prepare_overlay(&bytes.into_inner(), LOGO_CANVAS).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), LOGO_CANVAS);
        // The white field became transparent.
        assert_eq!(decoded.get_pixel(64, 2)[3], 0);
    }

    #[test]
    fn prepare_overlay_rejects_garbage() {
        assert!(prepare_overlay(b"not an image", PRODUCT_CANVAS).is_err());
    }
}
