//! Geographic primitives.
//!
//! Platform-agnostic distance, interpolation and bounding-box helpers.
//! All coordinates use WGS84 (lat/lng in degrees).

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True if both coordinates are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Earth radius in meters (WGS84 mean).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Central angle between two points in radians.
fn central_angle(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    2.0 * h.sqrt().min(1.0).asin()
}

/// Haversine distance between two points in meters.
pub fn haversine(a: &GeoPoint, b: &GeoPoint) -> f64 {
    EARTH_RADIUS_M * central_angle(a, b)
}

/// Point at fraction `t` along the great circle from `a` to `b`.
///
/// `t` is clamped to [0, 1]; the endpoints are returned exactly at the
/// bounds so a marker sits precisely on its waypoint.
pub fn interpolate(a: &GeoPoint, b: &GeoPoint, t: f64) -> GeoPoint {
    if t <= 0.0 {
        return *a;
    }
    if t >= 1.0 {
        return *b;
    }

    let delta = central_angle(a, b);
    if delta < 1e-12 {
        return *a;
    }

    let sin_delta = delta.sin();
    let wa = ((1.0 - t) * delta).sin() / sin_delta;
    let wb = (t * delta).sin() / sin_delta;

    let (lat1, lng1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lng2) = (b.lat.to_radians(), b.lng.to_radians());

    let x = wa * lat1.cos() * lng1.cos() + wb * lat2.cos() * lng2.cos();
    let y = wa * lat1.cos() * lng1.sin() + wb * lat2.cos() * lng2.sin();
    let z = wa * lat1.sin() + wb * lat2.sin();

    GeoPoint {
        lat: z.atan2((x * x + y * y).sqrt()).to_degrees(),
        lng: y.atan2(x).to_degrees(),
    }
}

/// Axis-aligned latitude/longitude extent of a point set.
///
/// Does not handle sets straddling the anti-meridian; simple min/max is
/// used, which is fine for a region the size of Sikkim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Smallest box containing every point, or None for an empty set.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let init = BoundingBox {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };

        Some(points.iter().skip(1).fold(init, |b, p| BoundingBox {
            min_lat: b.min_lat.min(p.lat),
            max_lat: b.max_lat.max(p.lat),
            min_lng: b.min_lng.min(p.lng),
            max_lng: b.max_lng.max(p.lng),
        }))
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lng: (self.min_lng + self.max_lng) / 2.0,
        }
    }

    /// Grow each side by `ratio` times the span on that axis.
    pub fn pad(&self, ratio: f64) -> Self {
        let dlat = self.lat_span() * ratio;
        let dlng = self.lng_span() * ratio;
        BoundingBox {
            min_lat: self.min_lat - dlat,
            max_lat: self.max_lat + dlat,
            min_lng: self.min_lng - dlng,
            max_lng: self.max_lng + dlng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    #[test]
    fn haversine_same_point() {
        let p = pt(27.3389, 88.6065);
        assert!(haversine(&p, &p).abs() < 0.01);
    }

    #[test]
    fn haversine_known_distance() {
        // Gangtok to Pelling ~36 km as the crow flies
        let gangtok = pt(27.3389, 88.6065);
        let pelling = pt(27.3000, 88.2400);
        let dist = haversine(&gangtok, &pelling);
        assert!(dist > 30_000.0 && dist < 45_000.0,
            "Expected ~36 km, got {:.0} m", dist);
    }

    #[test]
    fn haversine_one_degree_at_equator() {
        // Each degree of longitude at equator ~111 km
        let d = haversine(&pt(0.0, 0.0), &pt(0.0, 1.0));
        assert!(d > 110_000.0 && d < 112_500.0,
            "Expected ~111 km, got {:.0} m", d);
    }

    #[test]
    fn interpolate_endpoints_are_exact() {
        let a = pt(27.30, 88.60);
        let b = pt(27.32, 88.62);
        assert_eq!(interpolate(&a, &b, 0.0), a);
        assert_eq!(interpolate(&a, &b, 1.0), b);
        assert_eq!(interpolate(&a, &b, -0.5), a);
        assert_eq!(interpolate(&a, &b, 1.5), b);
    }

    #[test]
    fn interpolate_midpoint_short_distance() {
        let mid = interpolate(&pt(27.30, 88.60), &pt(27.32, 88.62), 0.5);
        assert!((mid.lat - 27.31).abs() < 1e-4, "lat {}", mid.lat);
        assert!((mid.lng - 88.61).abs() < 1e-4, "lng {}", mid.lng);
    }

    #[test]
    fn interpolate_along_equator() {
        let p = interpolate(&pt(0.0, 0.0), &pt(0.0, 10.0), 0.25);
        assert!(p.lat.abs() < 1e-9);
        assert!((p.lng - 2.5).abs() < 1e-9);
    }

    #[test]
    fn interpolate_splits_distance_proportionally() {
        let a = pt(27.0, 88.0);
        let b = pt(28.0, 89.0);
        let p = interpolate(&a, &b, 0.3);
        let total = haversine(&a, &b);
        assert!((haversine(&a, &p) - 0.3 * total).abs() < 1.0);
    }

    #[test]
    fn interpolate_coincident_points() {
        let a = pt(27.3, 88.6);
        assert_eq!(interpolate(&a, &a, 0.5), a);
    }

    #[test]
    fn bounding_box_empty() {
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn bounding_box_covers_points() {
        let pts = vec![pt(27.3, 88.6), pt(27.1, 88.9), pt(27.5, 88.2)];
        let b = BoundingBox::from_points(&pts).unwrap();
        assert_eq!(b.min_lat, 27.1);
        assert_eq!(b.max_lat, 27.5);
        assert_eq!(b.min_lng, 88.2);
        assert_eq!(b.max_lng, 88.9);
        let c = b.center();
        assert!((c.lat - 27.3).abs() < 1e-9);
        assert!((c.lng - 88.55).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_pad_grows_each_side() {
        let b = BoundingBox { min_lat: 0.0, max_lat: 10.0, min_lng: 0.0, max_lng: 20.0 };
        let p = b.pad(0.2);
        assert_eq!(p.min_lat, -2.0);
        assert_eq!(p.max_lat, 12.0);
        assert_eq!(p.min_lng, -4.0);
        assert_eq!(p.max_lng, 24.0);
        assert_eq!(p.center(), b.center());
    }

    #[test]
    fn validity_rejects_out_of_range() {
        assert!(pt(27.3, 88.6).is_valid());
        assert!(!pt(91.0, 0.0).is_valid());
        assert!(!pt(0.0, -181.0).is_valid());
        assert!(!pt(f64::NAN, 0.0).is_valid());
    }
}
