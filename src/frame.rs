//! Owned RGBA8 frame buffer with a checked dimension invariant.

use crate::color::Rgb;
use crate::{Error, Result};

/// Bytes per interleaved RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// A row-major grid of interleaved 8-bit RGBA samples.
///
/// The buffer length always equals `width * height * 4`, so every
/// in-bounds coordinate maps to a valid pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Wrap an RGBA8 buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either dimension is zero or the buffer
    /// length does not match `width * height * 4`
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "Frame dimensions must be positive, got {width}x{height}"
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| Error::InvalidInput(format!("Frame {width}x{height} is too large")))?;

        if data.len() != expected {
            return Err(Error::InvalidInput(format!(
                "Frame buffer length {} does not match {width}x{height}x{BYTES_PER_PIXEL} = {expected}",
                data.len()
            )));
        }

        Ok(Self { width, height, data })
    }

    /// Build a frame by evaluating `f` for every pixel; alpha is opaque
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero
    #[must_use]
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        assert!(width > 0 && height > 0, "Frame dimensions must be positive");
        let mut data = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                let px = f(x, y);
                data.extend_from_slice(&[px.r, px.g, px.b, u8::MAX]);
            }
        }
        Self { width, height, data }
    }

    /// Build a frame filled with a single color; alpha is opaque
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self::from_fn(width, height, |_, _| color)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes; the length cannot change
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame, returning its bytes
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Total pixel count
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte offset of the pixel at (x, y)
    #[inline]
    #[must_use]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// RGB at (x, y), or `None` when out of bounds
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // bounds checked above
        Some(self.pixel(x as u32, y as u32))
    }

    /// RGB at (x, y)
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let i = self.offset(x, y);
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// RGB of the pixel with linear index `index`
    #[inline]
    #[must_use]
    pub fn pixel_at_index(&self, index: usize) -> Rgb {
        let i = index * BYTES_PER_PIXEL;
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Grayscale value at (x, y)
    #[inline]
    #[must_use]
    pub fn luma(&self, x: u32, y: u32) -> f64 {
        self.pixel(x, y).grayscale()
    }
}
