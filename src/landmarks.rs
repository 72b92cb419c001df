//! Face-mesh landmark sets as delivered by an external landmark detector.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A 2D point. Landmarks use normalized [0, 1] image coordinates,
/// scaled polygons use pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An ordered face-mesh landmark sequence, indexed positionally.
///
/// Entries may be malformed (fewer than two components in the source
/// data, or non-finite); such entries are kept in place so indices stay
/// aligned, and [`LandmarkSet::get`] reports them as absent.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Vec<Vec<f64>>")]
pub struct LandmarkSet {
    points: Vec<Option<Point>>,
}

impl LandmarkSet {
    /// Build from well-formed points
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points: points.into_iter().map(Some).collect(),
        }
    }

    /// Build from raw coordinate rows (`[x, y]` or `[x, y, z]`); rows with
    /// fewer than two components become malformed entries
    #[must_use]
    pub fn from_components(rows: Vec<Vec<f64>>) -> Self {
        let points = rows
            .into_iter()
            .map(|row| match row.as_slice() {
                [x, y, ..] => Some(Point::new(*x, *y)),
                _ => None,
            })
            .collect();
        Self { points }
    }

    /// Load a JSON or YAML list of coordinate rows
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        // YAML is a superset of JSON, so one parser covers both formats
        let rows: Vec<Vec<f64>> = serde_yaml::from_str(&content)
            .map_err(|e| Error::LandmarkError(format!("Failed to parse landmarks: {e}")))?;

        Ok(Self::from_components(rows))
    }

    /// Number of entries, malformed ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Landmark at `index` if present, well-formed and finite
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points
            .get(index)
            .copied()
            .flatten()
            .filter(Point::is_finite)
    }

    /// Replace the landmark at `index`, growing the set with malformed
    /// entries if needed
    pub fn set(&mut self, index: usize, point: Point) {
        if index >= self.points.len() {
            self.points.resize(index + 1, None);
        }
        self.points[index] = Some(point);
    }

    /// Mark the entry at `index` as malformed
    pub fn invalidate(&mut self, index: usize) {
        if let Some(entry) = self.points.get_mut(index) {
            *entry = None;
        }
    }

    /// Drop entries beyond `len`
    pub fn truncate(&mut self, len: usize) {
        self.points.truncate(len);
    }
}

impl From<Vec<Vec<f64>>> for LandmarkSet {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::from_components(rows)
    }
}

impl From<Vec<Point>> for LandmarkSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}
