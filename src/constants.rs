//! Constants used throughout the estimation pipeline
//!
//! These values are the calibrated model: weights, thresholds and landmark
//! indices. Changing any of them changes the meaning of the scores.

/// Minimum number of landmarks a face-mesh detection must provide
pub const MIN_LANDMARK_COUNT: usize = 468;

/// Face-mesh indices outlining the left cheek, in polygon order
pub const LEFT_CHEEK_INDICES: [usize; 14] = [116, 117, 118, 119, 100, 126, 209, 49, 203, 206, 216, 207, 187, 123];

/// Face-mesh indices outlining the right cheek, in polygon order
pub const RIGHT_CHEEK_INDICES: [usize; 14] = [345, 346, 347, 348, 329, 355, 429, 279, 423, 426, 436, 427, 411, 352];

/// Face-mesh indices outlining the forehead, in polygon order
pub const FOREHEAD_INDICES: [usize; 15] = [10, 338, 297, 332, 284, 334, 296, 336, 9, 107, 66, 105, 103, 67, 109];

/// Number of distinct landmark indices required to build all three regions
pub const REQUIRED_LANDMARK_COUNT: usize = 43;

/// Minimum polygon vertex count
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Sample brightness window for ROI sampling (exclusive bounds)
pub const SAMPLE_MIN_BRIGHTNESS: f64 = 20.0;
pub const SAMPLE_MAX_BRIGHTNESS: f64 = 240.0;

/// Bounding-box area above which the sampler switches to the coarse stride
pub const LARGE_REGION_AREA: f64 = 10_000.0;

/// Sampler raster strides
pub const FINE_SAMPLE_STEP: usize = 2;
pub const COARSE_SAMPLE_STEP: usize = 3;

/// Minimum samples for a region to produce non-neutral scores
pub const MIN_REGION_SAMPLES: usize = 30;

/// Minimum samples for each texture sub-computation
pub const MIN_TEXTURE_SAMPLES: usize = 9;

/// Neutral score reported when data is insufficient
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Score bounds
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Texture: sliding window length for local variance
pub const LOCAL_VARIANCE_WINDOW: usize = 5;

/// Texture: local variance to score-points factor
pub const LOCAL_VARIANCE_SCALE: f64 = 0.5;

/// Texture: LBP patterns with at most this many bit transitions are uniform
pub const LBP_UNIFORM_TRANSITIONS: u32 = 2;

/// Texture: gradient pass stride over the ROI bounding box
pub const GRADIENT_STEP: usize = 2;

/// Texture: gradient magnitude variance to score-points factor
pub const GRADIENT_VARIANCE_SCALE: f64 = 0.1;

/// Texture blend weights (local variance, LBP, gradient)
pub const TEXTURE_VARIANCE_WEIGHT: f64 = 0.5;
pub const TEXTURE_LBP_WEIGHT: f64 = 0.3;
pub const TEXTURE_GRADIENT_WEIGHT: f64 = 0.2;

/// Redness blend weights for the three per-sample ratios
pub const REDNESS_RATIO_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

/// Blended redness ratios outside this open interval are noise
pub const REDNESS_NOISE_MIN: f64 = 0.3;
pub const REDNESS_NOISE_MAX: f64 = 2.0;

/// Redness ratio range mapped onto [0, 100]
pub const REDNESS_RANGE_MIN: f64 = 0.35;
pub const REDNESS_RANGE_MAX: f64 = 1.4;

/// Shine: plain highlight (value, max saturation)
pub const HIGHLIGHT_MIN_VALUE: f64 = 0.75;
pub const HIGHLIGHT_MAX_SATURATION: f64 = 0.25;

/// Shine: specular highlight (value, max channel spread)
pub const SPECULAR_MIN_VALUE: f64 = 0.8;
pub const SPECULAR_MAX_CHANNEL_SPREAD: u8 = 20;

/// Shine: oily highlight (value, max saturation, hue range in degrees)
pub const OILY_MIN_VALUE: f64 = 0.7;
pub const OILY_MAX_SATURATION: f64 = 0.4;
pub const OILY_HUE_MIN: f64 = 20.0;
pub const OILY_HUE_MAX: f64 = 60.0;

/// Shine: highlight fraction offset and gain
pub const SHINE_FRACTION_OFFSET: f64 = 0.05;
pub const SHINE_FRACTION_GAIN: f64 = 200.0;

/// Confidence: global sampling stride in pixels
pub const CONFIDENCE_PIXEL_STRIDE: usize = 16;

/// Confidence: adequate mean brightness (exclusive bounds)
pub const CONFIDENCE_MIN_BRIGHTNESS: f64 = 50.0;
pub const CONFIDENCE_MAX_BRIGHTNESS: f64 = 200.0;

/// Confidence: brightness variance above which contrast is adequate
pub const CONFIDENCE_MIN_VARIANCE: f64 = 100.0;

/// Confidence: scores for adequate / inadequate brightness and contrast
pub const ADEQUATE_SCORE: f64 = 100.0;
pub const INADEQUATE_BRIGHTNESS_SCORE: f64 = 40.0;
pub const LOW_CONTRAST_BASE_SCORE: f64 = 40.0;

/// Confidence: brightness vs contrast weights in the global heuristic
pub const BRIGHTNESS_WEIGHT: f64 = 0.6;
pub const CONTRAST_WEIGHT: f64 = 0.4;

/// Confidence: total ROI samples regarded as fully adequate
pub const TARGET_TOTAL_SAMPLES: f64 = 200.0;

/// Confidence: global heuristic vs sample adequacy weights
pub const BASE_CONFIDENCE_WEIGHT: f64 = 0.6;
pub const SAMPLE_ADEQUACY_WEIGHT: f64 = 0.4;

/// Confidence: weight of the caller-supplied recent average
pub const RECENT_CONFIDENCE_WEIGHT: f64 = 0.2;

/// Aggregation weights per region (left cheek, right cheek, forehead)
pub const TEXTURE_REGION_WEIGHTS: [f64; 3] = [0.4, 0.4, 0.2];
pub const REDNESS_REGION_WEIGHTS: [f64; 3] = [0.5, 0.5, 0.0];
pub const SHINE_REGION_WEIGHTS: [f64; 3] = [0.3, 0.3, 0.4];

/// Overall wellness weights (texture, redness balance, shine balance)
pub const OVERALL_TEXTURE_WEIGHT: f64 = 0.45;
pub const OVERALL_REDNESS_WEIGHT: f64 = 0.35;
pub const OVERALL_SHINE_WEIGHT: f64 = 0.20;

/// Shine balance: modeled ideal shine and penalty per point of deviation
pub const IDEAL_SHINE: f64 = 55.0;
pub const SHINE_BALANCE_PENALTY: f64 = 1.6;

/// Fallback: center crop side as a fraction of the shorter frame edge
pub const FALLBACK_CROP_DIVISOR: u32 = 3;

/// Fallback: sampling stride
pub const FALLBACK_SAMPLE_STEP: usize = 3;

/// Fallback: sample brightness window (exclusive bounds)
pub const FALLBACK_MIN_BRIGHTNESS: f64 = 30.0;
pub const FALLBACK_MAX_BRIGHTNESS: f64 = 220.0;

/// Fallback: overall weights (texture, redness balance, shine)
pub const FALLBACK_TEXTURE_WEIGHT: f64 = 0.4;
pub const FALLBACK_REDNESS_WEIGHT: f64 = 0.35;
pub const FALLBACK_SHINE_WEIGHT: f64 = 0.25;

/// Fallback: confidence scale and floor
pub const FALLBACK_CONFIDENCE_SCALE: f64 = 0.6;
pub const FALLBACK_CONFIDENCE_FLOOR: f64 = 30.0;

/// Fallback: sinusoidal jitter amplitude and random jitter half-range
pub const FALLBACK_WAVE_AMPLITUDE: f64 = 2.0;
pub const FALLBACK_NOISE_AMPLITUDE: f64 = 1.5;

/// Fallback: angular frequency (rad/s) of the jitter wave per metric
pub const FALLBACK_WAVE_FREQUENCIES: [f64; 3] = [0.5, 0.3, 0.4];

/// Default exponential smoothing factor
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.25;

/// Exponential filter bounds
pub const EXPONENTIAL_ALPHA_MIN: f64 = 0.0;
pub const EXPONENTIAL_ALPHA_MAX: f64 = 1.0;

/// Default moving average window
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;

/// Default rolling confidence history length
pub const DEFAULT_CONFIDENCE_HISTORY: usize = 10;

/// Lighting normalisation: neighborhood side length
pub const DEFAULT_LIGHTING_WINDOW: usize = 15;

/// Lighting normalisation: target local mean brightness
pub const LIGHTING_TARGET_MEAN: f64 = 128.0;

/// Lighting normalisation: smallest usable neighborhood side
pub const LIGHTING_MIN_WINDOW: usize = 3;

/// Lighting normalisation: floor on the local mean before dividing
pub const LIGHTING_MIN_LOCAL_MEAN: f64 = 1.0;
