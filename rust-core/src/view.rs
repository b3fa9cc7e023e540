//! Camera framing for a route.
//!
//! Decides what a map or globe should show before the animation starts:
//! the whole route with some margin, a close-up of a lone stop, or the
//! default region when there is nothing to show.

use serde::Serialize;

use crate::geo::{haversine, BoundingBox, GeoPoint};

/// Center of the default region (Sikkim).
pub const DEFAULT_CENTER: GeoPoint = GeoPoint { lat: 27.3389, lng: 88.6065 };

/// Zoom level used when a single stop is shown.
pub const SINGLE_POINT_ZOOM: u8 = 15;

/// Fraction of the route extent added on each side when fitting bounds.
pub const FIT_PADDING: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "fit", rename_all = "snake_case")]
pub enum ViewFit {
    /// Nothing to show, fall back to the default region.
    Region { center: GeoPoint },
    /// One stop, centered at a fixed zoom.
    Center { center: GeoPoint, zoom: u8 },
    /// Fit the padded extent of the route.
    Bounds { bounds: BoundingBox },
}

pub fn fit_view(points: &[GeoPoint]) -> ViewFit {
    match points {
        [] => ViewFit::Region { center: DEFAULT_CENTER },
        [only] => ViewFit::Center { center: *only, zoom: SINGLE_POINT_ZOOM },
        _ => match BoundingBox::from_points(points) {
            Some(bounds) => ViewFit::Bounds { bounds: bounds.pad(FIT_PADDING) },
            None => ViewFit::Region { center: DEFAULT_CENTER },
        },
    }
}

/// Circle on the ground enclosing every point, for framing a globe camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingCircle {
    pub center: GeoPoint,
    pub radius_m: f64,
}

impl BoundingCircle {
    /// Centroid of the points and the largest distance from it.
    ///
    /// The centroid is averaged on the unit sphere so it stays correct
    /// for widely spread points.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
        for p in points {
            let (lat, lng) = (p.lat.to_radians(), p.lng.to_radians());
            x += lat.cos() * lng.cos();
            y += lat.cos() * lng.sin();
            z += lat.sin();
        }

        let center = if x.abs() < 1e-12 && y.abs() < 1e-12 && z.abs() < 1e-12 {
            // Antipodal inputs cancel out; any member is as good a center.
            points[0]
        } else {
            GeoPoint {
                lat: z.atan2((x * x + y * y).sqrt()).to_degrees(),
                lng: y.atan2(x).to_degrees(),
            }
        };

        let radius_m = points
            .iter()
            .map(|p| haversine(&center, p))
            .fold(0.0, f64::max);

        Some(BoundingCircle { center, radius_m })
    }
}

/// Everything a host needs to place its camera: the 2D map fit and, when
/// the route has any points, the circle a globe camera should enclose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteFraming {
    pub map: ViewFit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub globe: Option<BoundingCircle>,
}

pub fn frame_route(points: &[GeoPoint]) -> RouteFraming {
    RouteFraming {
        map: fit_view(points),
        globe: BoundingCircle::from_points(points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    #[test]
    fn empty_route_shows_default_region() {
        assert_eq!(fit_view(&[]), ViewFit::Region { center: DEFAULT_CENTER });
    }

    #[test]
    fn single_stop_is_centered() {
        let p = pt(27.3, 88.6);
        assert_eq!(fit_view(&[p]), ViewFit::Center { center: p, zoom: 15 });
    }

    #[test]
    fn route_bounds_are_padded() {
        let fit = fit_view(&[pt(27.0, 88.0), pt(28.0, 89.0)]);
        let ViewFit::Bounds { bounds } = fit else {
            panic!("expected bounds, got {fit:?}");
        };
        assert!((bounds.min_lat - 26.8).abs() < 1e-9);
        assert!((bounds.max_lat - 28.2).abs() < 1e-9);
        assert!((bounds.min_lng - 87.8).abs() < 1e-9);
        assert!((bounds.max_lng - 89.2).abs() < 1e-9);
    }

    #[test]
    fn view_fit_serializes_with_tag() {
        let json = serde_json::to_value(fit_view(&[pt(27.3, 88.6)])).unwrap();
        assert_eq!(json["fit"], "center");
        assert_eq!(json["zoom"], 15);
    }

    #[test]
    fn circle_of_nothing() {
        assert!(BoundingCircle::from_points(&[]).is_none());
    }

    #[test]
    fn circle_of_one_point() {
        let p = pt(27.3, 88.6);
        let c = BoundingCircle::from_points(&[p]).unwrap();
        assert!((c.center.lat - p.lat).abs() < 1e-9);
        assert!((c.center.lng - p.lng).abs() < 1e-9);
        assert!(c.radius_m < 0.01);
    }

    #[test]
    fn circle_encloses_points() {
        let pts = vec![pt(27.30, 88.60), pt(27.32, 88.62), pt(27.10, 88.40)];
        let c = BoundingCircle::from_points(&pts).unwrap();
        for p in &pts {
            assert!(haversine(&c.center, p) <= c.radius_m + 1e-6);
        }
        // Symmetric pair: center halfway, radius half the separation
        let pair = vec![pt(0.0, -1.0), pt(0.0, 1.0)];
        let c = BoundingCircle::from_points(&pair).unwrap();
        assert!(c.center.lng.abs() < 1e-9);
        let half = haversine(&pair[0], &pair[1]) / 2.0;
        assert!((c.radius_m - half).abs() < 1e-3);
    }

    #[test]
    fn framing_pairs_map_fit_with_globe_circle() {
        let pts = vec![pt(27.30, 88.60), pt(27.32, 88.62)];
        let framing = frame_route(&pts);
        assert_eq!(framing.map, fit_view(&pts));
        let globe = framing.globe.unwrap();
        assert!((globe.center.lat - 27.31).abs() < 1e-4);
        assert!((globe.center.lng - 88.61).abs() < 1e-4);
        assert!((globe.radius_m - haversine(&pts[0], &pts[1]) / 2.0).abs() < 1.0);

        let json = serde_json::to_value(framing).unwrap();
        assert_eq!(json["map"]["fit"], "bounds");
        assert!(json["globe"]["radius_m"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn empty_route_has_no_globe_circle() {
        let framing = frame_route(&[]);
        assert_eq!(framing.map, ViewFit::Region { center: DEFAULT_CENTER });
        assert!(framing.globe.is_none());
        let json = serde_json::to_value(framing).unwrap();
        assert!(json.get("globe").is_none());
    }
}
