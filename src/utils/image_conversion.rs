//! Image file conversion utilities for `image` crate and [`FrameBuffer`]
//! interoperability.

use crate::frame::FrameBuffer;
use crate::Result;
use image::{DynamicImage, RgbImage, RgbaImage};
use std::path::Path;

/// Decode an image file into an RGBA frame
///
/// # Errors
///
/// * Returns error if the file cannot be opened or decoded
/// * Returns error if the decoded image has a zero dimension
pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<FrameBuffer> {
    let image = image::open(path)?;
    dynamic_image_to_frame(image)
}

/// Convert any decoded image into an RGBA frame
///
/// # Errors
///
/// Returns error if the image has a zero dimension
pub fn dynamic_image_to_frame(image: DynamicImage) -> Result<FrameBuffer> {
    rgba_image_to_frame(image.into_rgba8())
}

/// Convert an RGBA image into a frame without copying pixels
///
/// # Errors
///
/// Returns error if the image has a zero dimension
pub fn rgba_image_to_frame(image: RgbaImage) -> Result<FrameBuffer> {
    let (width, height) = image.dimensions();
    FrameBuffer::new(width, height, image.into_raw())
}

/// Convert a frame back into an RGBA image
#[must_use]
pub fn frame_to_image(frame: &FrameBuffer) -> RgbaImage {
    // Length invariant of FrameBuffer guarantees the container fits
    RgbaImage::from_fn(frame.width(), frame.height(), |x, y| {
        let i = frame.offset(x, y);
        let d = frame.data();
        image::Rgba([d[i], d[i + 1], d[i + 2], d[i + 3]])
    })
}

/// Drop the alpha channel of a frame
#[must_use]
pub fn frame_to_rgb_image(frame: &FrameBuffer) -> RgbImage {
    RgbImage::from_fn(frame.width(), frame.height(), |x, y| {
        let px = frame.pixel(x, y);
        image::Rgb([px.r, px.g, px.b])
    })
}

/// Save a frame as an image file, format chosen by extension
///
/// # Errors
///
/// Returns error if encoding or writing fails
pub fn save_frame<P: AsRef<Path>>(frame: &FrameBuffer, path: P) -> Result<()> {
    frame_to_image(frame).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_rgba_round_trip() {
        let frame = FrameBuffer::from_fn(5, 3, |x, y| Rgb::new((x * 40) as u8, (y * 80) as u8, 9));
        let image = frame_to_image(&frame);
        assert_eq!(image.dimensions(), (5, 3));
        assert_eq!(image.get_pixel(4, 2).0, [160, 160, 9, 255]);

        let back = rgba_image_to_frame(image).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_rgb_image_drops_alpha() {
        let mut frame = FrameBuffer::filled(3, 2, Rgb::new(10, 20, 30));
        frame.data_mut()[3] = 0;
        let image = frame_to_rgb_image(&frame);
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(image.into_raw().len(), 18);
    }

    #[test]
    fn test_dynamic_rgb_image_gets_alpha() {
        let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let frame = dynamic_image_to_frame(DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(frame.pixel(1, 1), Rgb::new(10, 20, 30));
        assert_eq!(frame.data()[3], 255);
    }

    #[test]
    fn test_save_and_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let frame = FrameBuffer::filled(8, 6, Rgb::new(200, 100, 50));

        save_frame(&frame, &path).unwrap();
        let loaded = load_frame(&path).unwrap();
        assert_eq!(loaded, frame);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_frame("/nonexistent/frame.png").is_err());
    }
}
