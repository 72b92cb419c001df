//! Polygon rasterisation against a frame buffer.
//!
//! Samples are collected on a regular grid inside the polygon's bounding
//! box. The grid stride grows with the box area so large regions (the
//! forehead) cost about the same as small ones (the cheeks).

use crate::color::Rgb;
use crate::constants::{
    COARSE_SAMPLE_STEP, FINE_SAMPLE_STEP, LARGE_REGION_AREA, MIN_POLYGON_VERTICES, SAMPLE_MAX_BRIGHTNESS,
    SAMPLE_MIN_BRIGHTNESS,
};
use crate::frame::FrameBuffer;
use crate::landmarks::Point;
use crate::utils::safe_cast::{f64_ceil_clamp, f64_floor_clamp};

/// Open brightness interval a sample must fall in to be kept
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessWindow {
    pub min: f64,
    pub max: f64,
}

impl BrightnessWindow {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Brightness strictly inside the window
    #[must_use]
    pub fn accepts(&self, pixel: &Rgb) -> bool {
        let brightness = pixel.brightness();
        brightness > self.min && brightness < self.max
    }
}

impl Default for BrightnessWindow {
    fn default() -> Self {
        Self::new(SAMPLE_MIN_BRIGHTNESS, SAMPLE_MAX_BRIGHTNESS)
    }
}

/// Axis-aligned pixel bounds, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl PixelBounds {
    /// Bounding box of `polygon` clipped to the frame, or `None` for an
    /// empty polygon
    #[must_use]
    pub fn of_polygon(polygon: &[Point], width: u32, height: u32) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = polygon_extent(polygon)?;
        let last_x = i64::from(width) - 1;
        let last_y = i64::from(height) - 1;
        Some(Self {
            min_x: f64_floor_clamp(min_x, 0, last_x),
            min_y: f64_floor_clamp(min_y, 0, last_y),
            max_x: f64_ceil_clamp(max_x, 0, last_x),
            max_y: f64_ceil_clamp(max_y, 0, last_y),
        })
    }
}

/// Raw (min_x, min_y, max_x, max_y) of the polygon's finite vertices
fn polygon_extent(polygon: &[Point]) -> Option<(f64, f64, f64, f64)> {
    polygon.iter().filter(|p| p.is_finite()).fold(None, |acc, p| {
        Some(match acc {
            None => (p.x, p.y, p.x, p.y),
            Some((min_x, min_y, max_x, max_y)) => (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)),
        })
    })
}

/// Area of the polygon's bounding box in square pixels
#[must_use]
pub fn bounding_box_area(polygon: &[Point]) -> f64 {
    polygon_extent(polygon).map_or(0.0, |(min_x, min_y, max_x, max_y)| (max_x - min_x) * (max_y - min_y))
}

/// Raster stride for a polygon: coarse above 10 000 px² of bounding box
#[must_use]
pub fn sample_step(polygon: &[Point]) -> usize {
    if bounding_box_area(polygon) > LARGE_REGION_AREA {
        COARSE_SAMPLE_STEP
    } else {
        FINE_SAMPLE_STEP
    }
}

/// Even-odd ray-crossing containment test
#[must_use]
pub fn point_in_polygon(x: f64, y: f64, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < MIN_POLYGON_VERTICES {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Sample a pixel-space polygon with the default brightness window
#[must_use]
pub fn sample_region(frame: &FrameBuffer, polygon: &[Point]) -> Vec<Rgb> {
    sample_polygon(frame, polygon, BrightnessWindow::default())
}

/// Sample a pixel-space polygon, keeping pixels inside `window`.
///
/// Returns an empty list for polygons with fewer than three vertices.
#[must_use]
pub fn sample_polygon(frame: &FrameBuffer, polygon: &[Point], window: BrightnessWindow) -> Vec<Rgb> {
    if polygon.len() < MIN_POLYGON_VERTICES {
        return Vec::new();
    }
    let Some(bounds) = PixelBounds::of_polygon(polygon, frame.width(), frame.height()) else {
        return Vec::new();
    };

    let step = sample_step(polygon);
    let mut samples = Vec::new();

    for y in (bounds.min_y..=bounds.max_y).step_by(step) {
        for x in (bounds.min_x..=bounds.max_x).step_by(step) {
            #[allow(clippy::cast_precision_loss)] // pixel coordinates are small
            if !point_in_polygon(x as f64, y as f64, polygon) {
                continue;
            }
            if let Some(pixel) = frame.get(x, y) {
                if window.accepts(&pixel) {
                    samples.push(pixel);
                }
            }
        }
    }

    samples
}
