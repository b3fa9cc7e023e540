//! Route plans as delivered by the route-planning endpoint.
//!
//! A plan is a list of steps (some without coordinates) plus an optional
//! dense path geometry. This module filters the plan down to the points
//! the animation core can use and derives the playback duration.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// One step of a planned visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, alias = "estimatedMinutes", skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<i64>,
}

impl RouteStep {
    /// The step's coordinate, if it has a complete and valid one.
    pub fn point(&self) -> Option<GeoPoint> {
        let p = GeoPoint::new(self.lat?, self.lng?);
        p.is_valid().then_some(p)
    }
}

/// A stop the animation passes through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub title: String,
    pub point: GeoPoint,
    pub minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    #[serde(default)]
    pub steps: Vec<RouteStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<GeoPoint>>,
}

impl RoutePlan {
    pub fn from_json(json: &str) -> Result<Self> {
        let plan: RoutePlan = serde_json::from_str(json).map_err(Error::RoutePlan)?;
        debug!(
            "Loaded route plan with {} steps and {} path points",
            plan.steps.len(),
            plan.path.as_ref().map_or(0, Vec::len)
        );
        Ok(plan)
    }

    /// Steps that carry a usable coordinate, in order.
    pub fn waypoints(&self, config: &AnimationConfig) -> Vec<Waypoint> {
        self.steps
            .iter()
            .enumerate()
            .filter_map(|(i, step)| {
                let Some(point) = step.point() else {
                    warn!("Skipping route step {i} ({:?}) without usable coordinates", step.title);
                    return None;
                };
                Some(Waypoint {
                    title: step.title.clone(),
                    point,
                    minutes: config.minutes_or_default(step.estimated_minutes),
                })
            })
            .collect()
    }

    /// Points the marker travels along.
    ///
    /// The dense path geometry wins when it has at least two valid
    /// points; otherwise the step coordinates are used.
    pub fn animation_points(&self, config: &AnimationConfig) -> Vec<GeoPoint> {
        let dense: Vec<GeoPoint> = self
            .path
            .iter()
            .flatten()
            .copied()
            .filter(GeoPoint::is_valid)
            .collect();

        if dense.len() > 1 {
            return dense;
        }

        self.waypoints(config).into_iter().map(|w| w.point).collect()
    }

    /// Planned minutes over every step, coordinates or not.
    pub fn total_minutes(&self, config: &AnimationConfig) -> u64 {
        self.steps
            .iter()
            .map(|s| u64::from(config.minutes_or_default(s.estimated_minutes)))
            .sum()
    }

    /// Playback duration in milliseconds.
    pub fn duration_ms(&self, config: &AnimationConfig) -> f64 {
        config.duration_ms(self.total_minutes(config))
    }
}
