//! Local brightness flattening applied before analysis when lighting is
//! uneven.
//!
//! Every interior pixel is rescaled so its neighborhood mean brightness
//! moves to 128. Local means are read from an integral image of the
//! unmodified frame, so the result does not depend on scan order.

use crate::constants::{DEFAULT_LIGHTING_WINDOW, LIGHTING_MIN_LOCAL_MEAN, LIGHTING_MIN_WINDOW, LIGHTING_TARGET_MEAN};
use crate::frame::{FrameBuffer, BYTES_PER_PIXEL};
use crate::utils::image_conversion::frame_to_rgb_image;
use crate::utils::safe_cast::f64_to_channel;
use crate::{Error, Result};
use image::ImageBuffer;
use imageproc::integral_image::{integral_image, sum_image_pixels};
use log::trace;

/// Per-channel running sums, one row and column larger than the frame
type IntegralRgb = ImageBuffer<image::Rgb<u64>, Vec<u64>>;

/// Sum of `r + g + b` over the square of radius `half` around (x, y)
fn window_sum(integral: &IntegralRgb, x: u32, y: u32, half: u32) -> u64 {
    sum_image_pixels(integral, x - half, y - half, x + half, y + half)
        .iter()
        .sum()
}

/// Flatten lighting with the default 15 px neighborhood
pub fn normalize_lighting(frame: &mut FrameBuffer) -> usize {
    // The default window is odd and above the minimum
    normalize_lighting_with(frame, DEFAULT_LIGHTING_WINDOW).unwrap_or(0)
}

/// Flatten lighting with a custom odd neighborhood size.
///
/// Pixels closer than `window` to any edge are left untouched, as is the
/// alpha channel. Returns the number of pixels rescaled.
///
/// # Errors
///
/// Returns `InvalidInput` if `window` is even or smaller than 3
#[allow(clippy::cast_precision_loss)] // sums of at most a few million bytes
pub fn normalize_lighting_with(frame: &mut FrameBuffer, window: usize) -> Result<usize> {
    if window < LIGHTING_MIN_WINDOW || window % 2 == 0 {
        return Err(Error::InvalidInput(format!(
            "Lighting window must be odd and at least {LIGHTING_MIN_WINDOW}, got {window}"
        )));
    }

    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let border = window;
    if width <= 2 * border || height <= 2 * border {
        trace!("Frame {width}x{height} has no interior for lighting window {window}");
        return Ok(0);
    }

    let integral: IntegralRgb = integral_image::<_, u64>(&frame_to_rgb_image(frame));
    #[allow(clippy::cast_possible_truncation)] // window is narrower than the frame
    let half = (window / 2) as u32;
    let area = (window * window * 3) as f64;
    let data = frame.data_mut();

    for (y, row) in data.chunks_exact_mut(width * BYTES_PER_PIXEL).enumerate().take(height - border).skip(border) {
        for x in border..width - border {
            #[allow(clippy::cast_possible_truncation)] // x and y index a u32-sized frame
            let sum = window_sum(&integral, x as u32, y as u32, half);
            let local_mean = sum as f64 / area;
            let factor = LIGHTING_TARGET_MEAN / local_mean.max(LIGHTING_MIN_LOCAL_MEAN);

            let offset = x * BYTES_PER_PIXEL;
            for channel in &mut row[offset..offset + 3] {
                *channel = f64_to_channel(f64::from(*channel) * factor);
            }
        }
    }

    let adjusted = (width - 2 * border) * (height - 2 * border);
    trace!("Normalized lighting on {adjusted} pixels with window {window}");
    Ok(adjusted)
}
