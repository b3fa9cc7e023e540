//! Animation tuning.
//!
//! The defaults match the route previews: 200 ms of playback per planned
//! minute, a 10 minute fallback for steps without an estimate, and a 2 s
//! (map) or 1.5 s (canvas) floor so short routes remain watchable.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Minimum total playback duration in milliseconds.
    pub floor_ms: f64,
    /// Playback milliseconds per estimated route minute.
    pub ms_per_minute: f64,
    /// Minutes assumed for a step with a missing or non-positive estimate.
    pub default_minutes: u32,
    /// Canvas margin reserved on every side, in canvas units.
    pub padding: f64,
    /// Substitute for a zero latitude or longitude range when projecting.
    pub min_range: f64,
}

impl AnimationConfig {
    /// Preset for the map-marker preview.
    pub fn map() -> Self {
        Self::default()
    }

    /// Preset for the canvas fallback preview.
    pub fn canvas() -> Self {
        Self {
            floor_ms: 1500.0,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON object; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Config)
    }

    /// Minutes for one step, applying the fallback to absent or
    /// non-positive estimates.
    pub fn minutes_or_default(&self, minutes: Option<i64>) -> u32 {
        match minutes {
            Some(m) if m > 0 => u32::try_from(m).unwrap_or(u32::MAX),
            _ => self.default_minutes,
        }
    }

    /// Total playback duration for a route of `total_minutes`.
    pub fn duration_ms(&self, total_minutes: u64) -> f64 {
        total_duration_ms(total_minutes, self.floor_ms, self.ms_per_minute)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            floor_ms: 2000.0,
            ms_per_minute: 200.0,
            default_minutes: 10,
            padding: 20.0,
            min_range: 1e-5,
        }
    }
}

/// `max(floor, minutes * scale)` in milliseconds.
pub fn total_duration_ms(total_minutes: u64, floor_ms: f64, ms_per_minute: f64) -> f64 {
    floor_ms.max(total_minutes as f64 * ms_per_minute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    #[test]
    fn presets_differ_only_in_floor() {
        let map = AnimationConfig::map();
        let canvas = AnimationConfig::canvas();
        assert_eq!(map.floor_ms, 2000.0);
        assert_eq!(canvas.floor_ms, 1500.0);
        assert_eq!(map.ms_per_minute, canvas.ms_per_minute);
        assert_eq!(map.default_minutes, 10);
    }

    #[test]
    fn duration_scales_with_minutes() {
        let cfg = AnimationConfig::map();
        assert_eq!(cfg.duration_ms(30), 6000.0);
        assert_eq!(cfg.duration_ms(5), 2000.0);
        assert_eq!(AnimationConfig::canvas().duration_ms(5), 1500.0);
        assert_eq!(AnimationConfig::canvas().duration_ms(0), 1500.0);
    }

    #[test]
    fn minutes_fallback() {
        let cfg = AnimationConfig::default();
        assert_eq!(cfg.minutes_or_default(Some(25)), 25);
        assert_eq!(cfg.minutes_or_default(Some(0)), 10);
        assert_eq!(cfg.minutes_or_default(Some(-3)), 10);
        assert_eq!(cfg.minutes_or_default(None), 10);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = assert_ok!(AnimationConfig::from_json(r#"{"floor_ms": 500}"#));
        assert_eq!(cfg.floor_ms, 500.0);
        assert_eq!(cfg.ms_per_minute, 200.0);
        assert_eq!(cfg.padding, 20.0);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert_err!(AnimationConfig::from_json("floor_ms = 1"));
    }
}
