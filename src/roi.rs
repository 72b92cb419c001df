//! Region-of-interest extraction from face-mesh landmarks and scaling to
//! pixel space.
//!
//! Extraction is fail-closed: either all three regions are produced or
//! none is. A partial set would bias the area-proportional sampling done
//! downstream.

use crate::constants::{
    FOREHEAD_INDICES, LEFT_CHEEK_INDICES, MIN_LANDMARK_COUNT, MIN_POLYGON_VERTICES, RIGHT_CHEEK_INDICES,
};
use crate::landmarks::{LandmarkSet, Point};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anatomical zone sampled for skin metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    LeftCheek,
    RightCheek,
    Forehead,
}

impl Region {
    /// All regions in aggregation order
    pub const ALL: [Self; 3] = [Self::LeftCheek, Self::RightCheek, Self::Forehead];

    /// Face-mesh indices outlining this region, in polygon order
    #[must_use]
    pub fn landmark_indices(self) -> &'static [usize] {
        match self {
            Self::LeftCheek => &LEFT_CHEEK_INDICES,
            Self::RightCheek => &RIGHT_CHEEK_INDICES,
            Self::Forehead => &FOREHEAD_INDICES,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::LeftCheek => "leftCheek",
            Self::RightCheek => "rightCheek",
            Self::Forehead => "forehead",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every landmark index any region needs
pub fn required_indices() -> impl Iterator<Item = usize> {
    Region::ALL
        .into_iter()
        .flat_map(|region| region.landmark_indices().iter().copied())
}

/// The three region polygons of one face, in normalized or pixel
/// coordinates depending on how it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiSet {
    pub left_cheek: Vec<Point>,
    pub right_cheek: Vec<Point>,
    pub forehead: Vec<Point>,
}

impl RoiSet {
    /// Polygon for `region`
    #[must_use]
    pub fn get(&self, region: Region) -> &[Point] {
        match region {
            Region::LeftCheek => &self.left_cheek,
            Region::RightCheek => &self.right_cheek,
            Region::Forehead => &self.forehead,
        }
    }

    /// Scale every polygon from normalized to pixel coordinates
    #[must_use]
    pub fn scale(&self, width: u32, height: u32) -> Self {
        Self {
            left_cheek: scale_polygon(&self.left_cheek, width, height),
            right_cheek: scale_polygon(&self.right_cheek, width, height),
            forehead: scale_polygon(&self.forehead, width, height),
        }
    }

    /// Every polygon has at least three vertices
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        Region::ALL
            .iter()
            .all(|&region| self.get(region).len() >= MIN_POLYGON_VERTICES)
    }
}

fn clamp_unit(point: Point) -> Point {
    Point::new(point.x.clamp(0.0, 1.0), point.y.clamp(0.0, 1.0))
}

/// Build the three region polygons from a landmark set.
///
/// Returns `None` when no landmarks were supplied, when the set holds fewer
/// than 468 entries, or when any required index is absent or malformed.
#[must_use]
pub fn extract_rois(landmarks: Option<&LandmarkSet>) -> Option<RoiSet> {
    let landmarks = landmarks?;

    if landmarks.len() < MIN_LANDMARK_COUNT {
        debug!(
            "Landmark set has {} entries, need at least {MIN_LANDMARK_COUNT}",
            landmarks.len()
        );
        return None;
    }

    if let Some(missing) = required_indices().find(|&index| landmarks.get(index).is_none()) {
        debug!("Required landmark {missing} is missing or malformed");
        return None;
    }

    let polygon = |region: Region| -> Option<Vec<Point>> {
        region
            .landmark_indices()
            .iter()
            .map(|&index| landmarks.get(index).map(clamp_unit))
            .collect()
    };

    Some(RoiSet {
        left_cheek: polygon(Region::LeftCheek)?,
        right_cheek: polygon(Region::RightCheek)?,
        forehead: polygon(Region::Forehead)?,
    })
}

/// Convert a normalized polygon to pixel coordinates.
///
/// Coordinates are clamped to [0, 1] before scaling; non-finite values
/// collapse to 0.
#[must_use]
pub fn scale_polygon(polygon: &[Point], width: u32, height: u32) -> Vec<Point> {
    let w = f64::from(width);
    let h = f64::from(height);
    polygon
        .iter()
        .map(|p| {
            let x = if p.x.is_finite() { p.x.clamp(0.0, 1.0) } else { 0.0 };
            let y = if p.y.is_finite() { p.y.clamp(0.0, 1.0) } else { 0.0 };
            Point::new(x * w, y * h)
        })
        .collect()
}
