// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::{haversine_km, BoundingBox, Coordinate};
use crate::RouteError;

pub const DEFAULT_WAYPOINT_OFFSET_DEG: f64 = 0.5;
pub const DEFAULT_CRUISE_SPEED_KMH: f64 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Challenging => "challenging",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Stormy,
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Stormy => "stormy",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// Interior points only; origin and destination are not repeated here.
    pub waypoints: Vec<Coordinate>,
    pub distance_km: f64,
    pub estimated_time: String,
    pub difficulty: Difficulty,
    pub weather: WeatherCondition,
}

impl Route {
    /// Full polyline: origin, waypoints, destination.
    pub fn path(&self) -> impl Iterator<Item = Coordinate> + '_ {
        std::iter::once(self.origin)
            .chain(self.waypoints.iter().copied())
            .chain(std::iter::once(self.destination))
    }

    /// Map extent covering the whole path, waypoints included.
    pub fn extent(&self) -> BoundingBox {
        let mut bb = BoundingBox::around(self.origin);
        for p in self.path().skip(1) {
            bb.extend(p);
        }
        bb
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Distance:   {:.0} km", self.distance_km)?;
        writeln!(f, "Est. Time:  {}", self.estimated_time)?;
        writeln!(f, "Difficulty: {}", self.difficulty)?;
        write!(f, "Weather:    {}", self.weather)
    }
}

/// Tunables for route synthesis. Validated on construction so that
/// [`RouteCalculator::compute`] only ever fails on bad coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteOptions {
    waypoint_offset_deg: f64,
    cruise_speed_kmh: f64,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            waypoint_offset_deg: DEFAULT_WAYPOINT_OFFSET_DEG,
            cruise_speed_kmh: DEFAULT_CRUISE_SPEED_KMH,
        }
    }
}

impl RouteOptions {
    pub fn new(waypoint_offset_deg: f64, cruise_speed_kmh: f64) -> Result<Self, RouteError> {
        if !waypoint_offset_deg.is_finite() {
            return Err(RouteError::InvalidOptions(format!(
                "waypoint offset must be finite, got {}",
                waypoint_offset_deg
            )));
        }
        if !cruise_speed_kmh.is_finite() || cruise_speed_kmh <= 0.0 {
            return Err(RouteError::InvalidOptions(format!(
                "cruise speed must be a positive number of km/h, got {}",
                cruise_speed_kmh
            )));
        }
        Ok(Self {
            waypoint_offset_deg,
            cruise_speed_kmh,
        })
    }

    pub fn waypoint_offset_deg(&self) -> f64 {
        self.waypoint_offset_deg
    }

    pub fn cruise_speed_kmh(&self) -> f64 {
        self.cruise_speed_kmh
    }
}

/// Stateless origin/destination to [`Route`] transformation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteCalculator {
    options: RouteOptions,
}

impl RouteCalculator {
    pub fn new(options: RouteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    pub fn compute(&self, origin: Coordinate, destination: Coordinate) -> Result<Route, RouteError> {
        origin.validate()?;
        destination.validate()?;

        let distance_km = haversine_km(origin, destination);
        let off = self.options.waypoint_offset_deg;

        Ok(Route {
            id: route_id(origin, destination),
            origin,
            destination,
            waypoints: vec![origin.offset(off, -off), destination.offset(-off, off)],
            distance_km,
            estimated_time: format_duration(distance_km / self.options.cruise_speed_kmh),
            difficulty: classify_difficulty(origin, destination),
            weather: classify_weather(origin, destination),
        })
    }

    /// Like [`compute`](Self::compute) but for endpoints that may not be known yet.
    pub fn compute_between(
        &self,
        origin: Option<Coordinate>,
        destination: Option<Coordinate>,
    ) -> Result<Route, RouteError> {
        match (origin, destination) {
            (Some(o), Some(d)) => self.compute(o, d),
            (None, _) => Err(RouteError::InvalidCoordinate("origin is not set".into())),
            (_, None) => Err(RouteError::InvalidCoordinate(
                "destination is not set".into(),
            )),
        }
    }
}

/// Computes a route with the default options.
pub fn compute_route(origin: Coordinate, destination: Coordinate) -> Result<Route, RouteError> {
    RouteCalculator::default().compute(origin, destination)
}

pub fn compute_route_between(
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
) -> Result<Route, RouteError> {
    RouteCalculator::default().compute_between(origin, destination)
}

fn route_id(origin: Coordinate, destination: Coordinate) -> String {
    format!(
        "route-{:.4},{:.4}-{:.4},{:.4}",
        origin.lat, origin.lon, destination.lat, destination.lon
    )
}

// No flight-planning data to go on yet, so every route is rated the same.
fn classify_difficulty(_origin: Coordinate, _destination: Coordinate) -> Difficulty {
    Difficulty::Moderate
}

fn classify_weather(_origin: Coordinate, _destination: Coordinate) -> WeatherCondition {
    WeatherCondition::Clear
}

/// Formats fractional hours as `"2h 45m"`, rounded to the nearest minute.
pub fn format_duration(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round().max(0.0) as u64;
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn test_waypoints_follow_offsets() {
        let route = compute_route(c(10.0, 20.0), c(-5.0, 30.0)).unwrap();
        assert_eq!(route.waypoints, vec![c(10.5, 19.5), c(-5.5, 30.5)]);
    }

    #[test]
    fn test_custom_offset() {
        let calc = RouteCalculator::new(RouteOptions::new(1.0, 400.0).unwrap());
        let route = calc.compute(c(0.0, 0.0), c(10.0, 10.0)).unwrap();
        assert_eq!(route.waypoints, vec![c(1.0, -1.0), c(9.0, 11.0)]);
    }

    #[test]
    fn test_path_wraps_waypoints() {
        let route = compute_route(c(1.0, 2.0), c(3.0, 4.0)).unwrap();
        let path: Vec<_> = route.path().collect();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], route.origin);
        assert_eq!(path[3], route.destination);
        assert_eq!(&path[1..3], route.waypoints.as_slice());
    }

    #[test]
    fn test_extent_covers_path() {
        let route = compute_route(c(1.0, 2.0), c(3.0, 4.0)).unwrap();
        let extent = route.extent();
        assert!(route.path().all(|p| extent.contains(p)));
        // Waypoints widen the longitude span past both endpoints
        assert_eq!(extent, BoundingBox::new(1.0, 3.0, 1.5, 4.5));
        assert_eq!(extent.center(), c(2.0, 3.0));

        let route = compute_route(c(3.0, 4.0), c(1.0, 2.0)).unwrap();
        let extent = route.extent();
        assert!(route.path().all(|p| extent.contains(p)));
        assert_eq!(extent, BoundingBox::new(0.5, 3.5, 2.0, 4.0));
    }

    #[test]
    fn test_classification_constants() {
        let route = compute_route(c(51.47, -0.4543), c(41.9742, -87.9073)).unwrap();
        assert_eq!(route.difficulty, Difficulty::Moderate);
        assert_eq!(route.weather, WeatherCondition::Clear);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(2.75), "2h 45m");
        assert_eq!(format_duration(0.0), "0h 0m");
        assert_eq!(format_duration(1.0 / 120.0), "0h 1m"); // 30s rounds up
        assert_eq!(format_duration(10.0), "10h 0m");
    }

    #[test]
    fn test_estimated_time_uses_cruise_speed() {
        // Quarter equator is ~10007.5 km; at 1000 km/h that is ~10h 0m
        let calc = RouteCalculator::new(RouteOptions::new(0.5, 1000.0).unwrap());
        let route = calc.compute(c(0.0, 0.0), c(0.0, 90.0)).unwrap();
        assert_eq!(route.estimated_time, "10h 0m");
    }

    #[test]
    fn test_invalid_options() {
        assert!(RouteOptions::new(0.5, 0.0).is_err());
        assert!(RouteOptions::new(0.5, -10.0).is_err());
        assert!(RouteOptions::new(0.5, f64::NAN).is_err());
        assert!(RouteOptions::new(f64::INFINITY, 800.0).is_err());
        assert!(matches!(
            RouteOptions::new(0.5, 0.0),
            Err(RouteError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_missing_endpoint() {
        assert!(matches!(
            compute_route_between(None, Some(c(0.0, 0.0))),
            Err(RouteError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            compute_route_between(Some(c(0.0, 0.0)), None),
            Err(RouteError::InvalidCoordinate(_))
        ));
        assert!(compute_route_between(Some(c(0.0, 0.0)), Some(c(1.0, 1.0))).is_ok());
    }

    #[test]
    fn test_serialized_shape() {
        let route = compute_route(c(40.7128, -74.006), c(34.0522, -118.2437)).unwrap();
        let v = serde_json::to_value(&route).unwrap();
        assert_eq!(v["difficulty"], "moderate");
        assert_eq!(v["weather"], "clear");
        assert_eq!(v["waypoints"].as_array().unwrap().len(), 2);
        assert_eq!(v["id"], "route-40.7128,-74.0060-34.0522,-118.2437");
    }

    #[test]
    fn test_summary_display() {
        let route = compute_route(c(40.7128, -74.006), c(34.0522, -118.2437)).unwrap();
        let text = route.to_string();
        assert!(text.starts_with("Distance:   3936 km"), "{}", text);
        assert!(text.contains("Est. Time:  4h 55m"));
        assert!(text.contains("Difficulty: moderate"));
        assert!(text.ends_with("Weather:    clear"));
    }
}
