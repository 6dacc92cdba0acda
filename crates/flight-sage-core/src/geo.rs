// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::RouteError;

/// Mean Earth radius used for every great-circle computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Construction through [`Coordinate::new`] validates the ranges. The fields are
/// public so that display points (route waypoints) may sit slightly outside them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, RouteError> {
        let c = Self { lat, lon };
        c.validate()?;
        Ok(c)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    pub fn validate(&self) -> Result<(), RouteError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(RouteError::InvalidCoordinate(format!(
                "lat={} lon={} (expected lat in [-90, 90], lon in [-180, 180])",
                self.lat, self.lon
            )))
        }
    }

    /// Returns the point shifted by the given number of degrees. No range check.
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lon: self.lon + d_lon,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Parses `"lat,lon"` (whitespace tolerated around either number).
impl FromStr for Coordinate {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| RouteError::InvalidCoordinate(format!("'{}' is not 'lat,lon'", s)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| RouteError::InvalidCoordinate(format!("'{}' is not a number", v.trim())))
        };
        Coordinate::new(parse(lat)?, parse(lon)?)
    }
}

/// Great-circle distance in kilometres (haversine).
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Zero-area box at a single point.
    pub fn around(c: Coordinate) -> Self {
        Self::new(c.lat, c.lat, c.lon, c.lon)
    }

    pub fn extend(&mut self, c: Coordinate) {
        self.min_lat = self.min_lat.min(c.lat);
        self.max_lat = self.max_lat.max(c.lat);
        self.min_lon = self.min_lon.min(c.lon);
        self.max_lon = self.max_lon.max(c.lon);
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn enclosing<I: IntoIterator<Item = Coordinate>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bb = Self::around(iter.next()?);
        for p in iter {
            bb.extend(p);
        }
        Some(bb)
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        c.lat >= self.min_lat && c.lat <= self.max_lat && c.lon >= self.min_lon && c.lon <= self.max_lon
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lon: (self.min_lon + self.max_lon) / 2.0,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat {:.4}..{:.4}, lon {:.4}..{:.4}",
            self.min_lat, self.max_lat, self.min_lon, self.max_lon
        )
    }
}
