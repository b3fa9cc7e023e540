//! Geographic to canvas projection.
//!
//! Used by the canvas fallback preview when no map library is available.
//! The projection is a plain equirectangular stretch of the route's
//! bounding box onto the canvas, with a fixed margin on every side.

use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::geo::{BoundingBox, GeoPoint};

/// A point in canvas space. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

impl PlanePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub padding: f64,
    pub min_range: f64,
}

impl Projector {
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            padding: config.padding,
            min_range: config.min_range,
        }
    }

    /// Map `point` into `canvas` given the bounding box of the whole set.
    pub fn project(&self, point: &GeoPoint, bounds: &BoundingBox, canvas: &CanvasSize) -> PlanePoint {
        // A zero range (all points share a coordinate) would divide by zero.
        let lat_range = bounds.lat_span().max(self.min_range);
        let lng_range = bounds.lng_span().max(self.min_range);

        let usable_w = canvas.width - self.padding * 2.0;
        let usable_h = canvas.height - self.padding * 2.0;

        let x = self.padding + (point.lng - bounds.min_lng) / lng_range * usable_w;
        // Latitude grows north, canvas y grows down.
        let y = self.padding + (1.0 - (point.lat - bounds.min_lat) / lat_range) * usable_h;

        PlanePoint { x, y }
    }

    /// Project every point against the bounding box of the full set.
    pub fn project_all(&self, points: &[GeoPoint], canvas: &CanvasSize) -> Vec<PlanePoint> {
        let Some(bounds) = BoundingBox::from_points(points) else {
            return Vec::new();
        };
        points
            .iter()
            .map(|p| self.project(p, &bounds, canvas))
            .collect()
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::from_config(&AnimationConfig::default())
    }
}

/// Project with the default margin and minimum range.
pub fn project(point: &GeoPoint, bounds: &BoundingBox, canvas: &CanvasSize) -> PlanePoint {
    Projector::default().project(point, bounds, canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    fn bounds() -> BoundingBox {
        BoundingBox { min_lat: 27.0, max_lat: 28.0, min_lng: 88.0, max_lng: 89.0 }
    }

    fn canvas() -> CanvasSize {
        CanvasSize::new(640.0, 360.0)
    }

    #[test]
    fn corners_land_inside_padding() {
        let b = bounds();
        // South-west corner: left edge, bottom edge
        let sw = project(&pt(27.0, 88.0), &b, &canvas());
        assert_eq!(sw, PlanePoint::new(20.0, 340.0));

        // North-east corner: right edge, top edge
        let ne = project(&pt(28.0, 89.0), &b, &canvas());
        assert_eq!(ne, PlanePoint::new(620.0, 20.0));
    }

    #[test]
    fn center_maps_to_canvas_center() {
        let c = project(&pt(27.5, 88.5), &bounds(), &canvas());
        assert!((c.x - 320.0).abs() < 1e-9);
        assert!((c.y - 180.0).abs() < 1e-9);
    }

    #[test]
    fn north_is_up() {
        let b = bounds();
        let south = project(&pt(27.2, 88.5), &b, &canvas());
        let north = project(&pt(27.8, 88.5), &b, &canvas());
        assert!(north.y < south.y);
    }

    #[test]
    fn degenerate_box_does_not_fault() {
        let p = pt(27.3, 88.6);
        let b = BoundingBox::from_points(&[p]).unwrap();
        let out = project(&p, &b, &canvas());
        assert!(out.x.is_finite() && out.y.is_finite());
        assert_eq!(out, PlanePoint::new(20.0, 340.0));
    }

    #[test]
    fn shared_longitude_stays_finite() {
        let pts = vec![pt(27.2, 88.6), pt(27.4, 88.6)];
        let out = Projector::default().project_all(&pts, &canvas());
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.x == 20.0));
        assert!(out[1].y < out[0].y);
    }

    #[test]
    fn project_all_empty() {
        assert!(Projector::default().project_all(&[], &canvas()).is_empty());
    }

    #[test]
    fn custom_padding() {
        let projector = Projector { padding: 0.0, min_range: 1e-5 };
        let out = projector.project(&pt(28.0, 88.0), &bounds(), &canvas());
        assert_eq!(out, PlanePoint::new(0.0, 0.0));
    }
}
