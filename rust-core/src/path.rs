//! Distance-annotated polylines.
//!
//! A [`Path`] turns an ordered point list into segments carrying their
//! length and the cumulative distance at their far end, then resolves a
//! normalized progress value back into a position along the line.

use serde::{Deserialize, Serialize};

use crate::geo::{self, GeoPoint};
use crate::projector::PlanePoint;

/// A coordinate space a path can be built in.
pub trait Locate: Copy {
    /// Non-negative distance between two points.
    fn distance_to(&self, other: &Self) -> f64;

    /// Point at fraction `t` (in [0, 1]) from `self` towards `other`.
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Locate for PlanePoint {
    fn distance_to(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn lerp(&self, other: &Self, t: f64) -> Self {
        PlanePoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl Locate for GeoPoint {
    fn distance_to(&self, other: &Self) -> f64 {
        geo::haversine(self, other)
    }

    fn lerp(&self, other: &Self, t: f64) -> Self {
        geo::interpolate(self, other, t)
    }
}

/// A resolved marker position, tagged by coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Position {
    Plane { x: f64, y: f64 },
    Geo { lat: f64, lng: f64 },
}

impl From<PlanePoint> for Position {
    fn from(p: PlanePoint) -> Self {
        Position::Plane { x: p.x, y: p.y }
    }
}

impl From<GeoPoint> for Position {
    fn from(p: GeoPoint) -> Self {
        Position::Geo { lat: p.lat, lng: p.lng }
    }
}

/// One edge of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<P> {
    pub start: P,
    pub end: P,
    pub length: f64,
    /// Distance from the path start to `end`.
    pub cumulative: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path<P> {
    points: Vec<P>,
    segments: Vec<Segment<P>>,
    total: f64,
}

impl<P: Locate> Path<P> {
    /// Build a path using the point type's own metric.
    pub fn build(points: &[P]) -> Self {
        Self::build_with(points, |a, b| a.distance_to(b))
    }
}

impl<P: Copy> Path<P> {
    /// Build a path with a caller-supplied distance function.
    ///
    /// Negative or non-finite distances are treated as zero so the
    /// cumulative column never decreases.
    pub fn build_with<F>(points: &[P], distance: F) -> Self
    where
        F: Fn(&P, &P) -> f64,
    {
        let mut segments = Vec::with_capacity(points.len().saturating_sub(1));
        let mut cumulative = 0.0;

        for w in points.windows(2) {
            let d = distance(&w[0], &w[1]);
            let length = if d.is_finite() && d > 0.0 { d } else { 0.0 };
            cumulative += length;
            segments.push(Segment {
                start: w[0],
                end: w[1],
                length,
                cumulative,
            });
        }

        Path {
            points: points.to_vec(),
            segments,
            total: cumulative,
        }
    }

    pub fn points(&self) -> &[P] {
        &self.points
    }

    pub fn segments(&self) -> &[Segment<P>] {
        &self.segments
    }

    pub fn total_length(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&P> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&P> {
        self.points.last()
    }
}

impl<P: Locate> Path<P> {
    /// Position at `progress` (clamped to [0, 1]) of the total length.
    ///
    /// Returns None only for a path without points. A path of zero
    /// length holds the marker on its first point.
    pub fn resolve(&self, progress: f64) -> Option<P> {
        let first = *self.points.first()?;
        if self.segments.is_empty() || self.total <= 0.0 {
            return Some(first);
        }

        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        if progress >= 1.0 {
            return self.points.last().copied();
        }
        let target = progress * self.total;

        // First segment whose far end reaches the target.
        let idx = self
            .segments
            .partition_point(|s| s.cumulative < target)
            .min(self.segments.len() - 1);
        let seg = &self.segments[idx];
        let before = if idx == 0 { 0.0 } else { self.segments[idx - 1].cumulative };

        let t = if seg.length > 0.0 {
            ((target - before) / seg.length).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Some(seg.start.lerp(&seg.end, t))
    }
}
