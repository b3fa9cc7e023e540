//! GPX 1.1 import.
//!
//! Wraps the `gpx` crate and turns a GPX file into a [`RoutePlan`], so a
//! route exported from a navigation app can be previewed exactly like
//! one returned by the route planner.

use std::io::Read;

use log::debug;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::route::{RoutePlan, RouteStep};

fn to_step(wp: &gpx::Waypoint) -> RouteStep {
    RouteStep {
        title: wp.name.clone().unwrap_or_default(),
        description: wp.description.clone().unwrap_or_default(),
        lat: Some(wp.point().y()),
        lng: Some(wp.point().x()),
        // GPX carries no visit estimate; the configured fallback applies.
        estimated_minutes: None,
    }
}

/// Parse a GPX file from any reader.
///
/// Route points (`rtept`) of the first route become the steps; without a
/// route, the standalone waypoints (`wpt`) are used. The first track,
/// flattened over its segments, becomes the dense path geometry.
pub fn parse<R: Read>(reader: R) -> Result<RoutePlan> {
    let gpx = gpx::read(reader)?;

    let steps: Vec<RouteStep> = match gpx.routes.first() {
        Some(route) if !route.points.is_empty() => route.points.iter().map(to_step).collect(),
        _ => gpx.waypoints.iter().map(to_step).collect(),
    };

    let path = gpx.tracks.first().map(|t| {
        t.segments
            .iter()
            .flat_map(|seg| seg.points.iter())
            .map(|wp| GeoPoint::new(wp.point().y(), wp.point().x()))
            .collect::<Vec<_>>()
    });

    debug!(
        "Imported GPX with {} steps and {} track points",
        steps.len(),
        path.as_ref().map_or(0, Vec::len)
    );

    Ok(RoutePlan { steps, path })
}

/// Parse GPX from a byte slice. Convenience wrapper for JNI.
pub fn parse_bytes(data: &[u8]) -> Result<RoutePlan> {
    parse(data)
}

/// Parse GPX and return the route plan as a JSON string.
pub fn parse_to_json(data: &[u8]) -> Result<String> {
    let plan = parse_bytes(data)?;
    serde_json::to_string(&plan).map_err(Error::Serialize)
}
