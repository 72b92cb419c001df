//! Integration tests for the skin metrics pipeline


use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skin_metrics::{
    aggregator::{analyze_rois, combine_regions, Aggregator, ComputeOptions, MetricSource},
    color::Rgb,
    confidence::{confidence_from_sample_count, estimate_confidence, global_confidence},
    constants::MIN_LANDMARK_COUNT,
    fallback::FallbackEstimator,
    frame::FrameBuffer,
    landmarks::{LandmarkSet, Point},
    metrics::{MetricScores, RegionScores},
    roi::{extract_rois, required_indices, Region, RoiSet},
    sampling::sample_region,
    utils::safe_cast::score_to_u8,
};
use test_helpers::{assert_in_range, frame_with_region, synthetic_landmarks, textured_frame, uniform_frame};

const NEUTRAL: MetricScores = MetricScores {
    texture: 50,
    redness: 50,
    shine: 50,
};

/// Test the complete landmark path on a textured frame
#[test]
fn test_full_pipeline() {
    let frame = textured_frame(320, 240);
    let landmarks = synthetic_landmarks();
    let rois = extract_rois(Some(&landmarks)).expect("synthetic landmarks should yield regions");

    let mut aggregator = Aggregator::new(FallbackEstimator::with_seed(1));
    let metrics = aggregator.compute(&frame, Some(&rois), &ComputeOptions::default());

    assert_eq!(metrics.source, MetricSource::Mediapipe);
    assert!(metrics.regions.is_some());
    assert_in_range(&metrics);
}

#[test]
fn test_landmark_path_is_deterministic() {
    let frame = textured_frame(320, 240);
    let rois = extract_rois(Some(&synthetic_landmarks())).unwrap();
    let options = ComputeOptions {
        recent_confidence: Some(70.0),
    };

    let first = analyze_rois(&frame, &rois, &options);
    for _ in 0..5 {
        assert_eq!(analyze_rois(&frame, &rois, &options), first);
    }
}

#[test]
fn test_fail_closed_extraction() {
    let full = synthetic_landmarks();
    assert!(extract_rois(Some(&full)).is_some());

    for index in required_indices() {
        let mut landmarks = full.clone();
        landmarks.invalidate(index);
        assert!(extract_rois(Some(&landmarks)).is_none(), "index {index} should be required");
    }

    let mut short = full.clone();
    short.truncate(MIN_LANDMARK_COUNT - 1);
    assert!(extract_rois(Some(&short)).is_none());
}

#[test]
fn test_missing_landmark_switches_to_fallback() {
    let frame = uniform_frame(160, 120, 128, 128, 128);
    let mut landmarks = synthetic_landmarks();
    landmarks.set(Region::Forehead.landmark_indices()[3], Point::new(f64::NAN, 0.2));

    let rois = extract_rois(Some(&landmarks));
    let mut aggregator = Aggregator::new(FallbackEstimator::with_seed(3));
    let metrics = aggregator.compute(&frame, rois.as_ref(), &ComputeOptions::default());
    assert_eq!(metrics.source, MetricSource::Fallback);
    assert!(metrics.regions.is_none());
}

#[test]
fn test_fallback_activation() {
    let frames = [
        uniform_frame(160, 120, 128, 128, 128),
        FrameBuffer::from_fn(160, 120, |_, y| {
            if y % 2 == 0 {
                Rgb::new(90, 80, 70)
            } else {
                Rgb::new(180, 150, 140)
            }
        }),
        textured_frame(160, 120),
    ];

    for frame in &frames {
        let mut aggregator = Aggregator::new(FallbackEstimator::with_seed(11));
        let metrics = aggregator.compute(frame, None, &ComputeOptions::default());
        assert_eq!(metrics.source, MetricSource::Fallback);
        assert!(metrics.regions.is_none());
        assert!(metrics.confidence <= score_to_u8(global_confidence(frame) * 0.6));

        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("regions").is_none());
    }
}

#[test]
fn test_all_black_region_is_neutral() {
    let width = 320;
    let height = 240;
    let frame = frame_with_region(width, height, Region::LeftCheek, Rgb::new(0, 0, 0), Rgb::new(128, 128, 128));
    let rois = extract_rois(Some(&synthetic_landmarks())).unwrap();

    let scaled = rois.scale(width, height);
    assert!(sample_region(&frame, scaled.get(Region::LeftCheek)).is_empty());

    let metrics = analyze_rois(&frame, &rois, &ComputeOptions::default());
    let regions = metrics.regions.unwrap();
    assert_eq!(regions.left_cheek, NEUTRAL);
    assert_ne!(regions.right_cheek, NEUTRAL);
}

#[test]
fn test_uniform_gray_frame() {
    let frame = uniform_frame(320, 240, 128, 128, 128);
    let rois = extract_rois(Some(&synthetic_landmarks())).unwrap();
    let metrics = analyze_rois(&frame, &rois, &ComputeOptions::default());

    assert!(metrics.texture >= 95, "texture {}", metrics.texture);
    assert!(metrics.redness <= 15, "redness {}", metrics.redness);
    assert!(metrics.shine <= 30, "shine {}", metrics.shine);
}

#[test]
fn test_synthetic_redness() {
    let rois = extract_rois(Some(&synthetic_landmarks())).unwrap();
    let gray = analyze_rois(&uniform_frame(320, 240, 128, 128, 128), &rois, &ComputeOptions::default());
    let red = analyze_rois(&uniform_frame(320, 240, 220, 120, 120), &rois, &ComputeOptions::default());

    assert!(red.redness >= gray.redness + 20, "red {} vs gray {}", red.redness, gray.redness);
    // more redness lowers the overall score
    assert!(red.overall < gray.overall);
}

#[test]
fn test_weighting_check() {
    let left = RegionScores::new(80.0, 50.0, 50.0);
    let right = RegionScores::new(60.0, 50.0, 50.0);
    let forehead = RegionScores::new(40.0, 50.0, 50.0);

    let face = combine_regions(&left, &right, &forehead);
    assert_eq!(score_to_u8(face.texture), 64);
}

#[test]
fn test_recent_confidence_damps() {
    let frame = uniform_frame(320, 240, 128, 128, 128);
    let rois = extract_rois(Some(&synthetic_landmarks())).unwrap();

    let plain = analyze_rois(&frame, &rois, &ComputeOptions::default());
    let damped = analyze_rois(
        &frame,
        &rois,
        &ComputeOptions {
            recent_confidence: Some(0.0),
        },
    );
    assert!(damped.confidence < plain.confidence);
    assert_eq!(damped.texture, plain.texture);
}

fn random_frame(seed: u64, width: u32, height: u32) -> FrameBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let base: [u8; 3] = rng.gen();
    let spread: u8 = rng.gen_range(0..=255);
    FrameBuffer::from_fn(width, height, |_, _| {
        let mut channel = |b: u8| b.saturating_add(rng.gen_range(0..=spread));
        Rgb::new(channel(base[0]), channel(base[1]), channel(base[2]))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_readings_stay_in_range(
        seed in any::<u64>(),
        width in 8u32..96,
        height in 8u32..96,
        points in prop::collection::vec((-0.3f64..1.3, -0.3f64..1.3), MIN_LANDMARK_COUNT),
    ) {
        let frame = random_frame(seed, width, height);
        let landmarks = LandmarkSet::new(points.into_iter().map(|(x, y)| Point::new(x, y)).collect());
        let rois = extract_rois(Some(&landmarks));
        prop_assert!(rois.is_some());

        let mut aggregator = Aggregator::new(FallbackEstimator::with_seed(seed));
        let landmark_reading = aggregator.compute(&frame, rois.as_ref(), &ComputeOptions::default());
        let fallback_reading = aggregator.compute(&frame, None, &ComputeOptions::default());

        assert_in_range(&landmark_reading);
        assert_in_range(&fallback_reading);
    }
}

/// The standalone confidence estimate matches the one embedded in a reading
#[test]
fn test_estimate_confidence_matches_analysis() {
    let frame = textured_frame(320, 240);
    let rois = extract_rois(Some(&synthetic_landmarks())).unwrap();
    let scaled = rois.scale(frame.width(), frame.height());

    for recent in [None, Some(35.0), Some(90.0)] {
        let options = ComputeOptions { recent_confidence: recent };
        let metrics = analyze_rois(&frame, &rois, &options);
        let confidence = estimate_confidence(&frame, &scaled, recent);

        assert!((0.0..=100.0).contains(&confidence));
        assert_eq!(score_to_u8(confidence), metrics.confidence, "recent {recent:?}");
    }
}

/// Regions that yield no samples leave only the global heuristic
#[test]
fn test_estimate_confidence_degenerate_regions() {
    let frame = uniform_frame(320, 240, 128, 128, 128);
    let line = vec![Point::new(10.0, 10.0), Point::new(200.0, 10.0)];
    let degenerate = RoiSet {
        left_cheek: line.clone(),
        right_cheek: line.clone(),
        forehead: line,
    };

    let confidence = estimate_confidence(&frame, &degenerate, None);
    assert_eq!(confidence, confidence_from_sample_count(&frame, 0, None));

    let rois = extract_rois(Some(&synthetic_landmarks())).unwrap();
    let scaled = rois.scale(frame.width(), frame.height());
    assert!(estimate_confidence(&frame, &scaled, None) > confidence);
}
