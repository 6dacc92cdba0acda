// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Free-text destination lookup.
//!
//! Resolution order:
//! 1. a literal `"lat,lon"` pair
//! 2. a known place name contained in the query (first declared match wins)
//! 3. an exact airport code
//! 4. an airport whose name contains the query

use crate::airports::AirportCatalog;
use crate::geo::Coordinate;

const BUILTIN_PLACES: &[(&str, f64, f64)] = &[
    ("new york", 40.7128, -74.0060),
    ("los angeles", 34.0522, -118.2437),
];

/// Shortest query that may match inside an airport name.
const MIN_NAME_QUERY_LEN: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct DestinationTable {
    places: Vec<(String, Coordinate)>,
    airports: AirportCatalog,
}

impl DestinationTable {
    pub fn new(airports: AirportCatalog) -> Self {
        let places = BUILTIN_PLACES
            .iter()
            .map(|&(name, lat, lon)| (name.to_string(), Coordinate { lat, lon }))
            .collect();
        Self { places, airports }
    }

    /// Adds a place name. Later entries lose to earlier ones on overlapping queries.
    pub fn with_place(mut self, name: &str, location: Coordinate) -> Self {
        self.places.push((name.trim().to_lowercase(), location));
        self
    }

    pub fn airports(&self) -> &AirportCatalog {
        &self.airports
    }

    pub fn resolve(&self, query: &str) -> Option<Coordinate> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }

        if let Ok(c) = q.parse::<Coordinate>() {
            return Some(c);
        }

        if let Some((_, c)) = self.places.iter().find(|(name, _)| q.contains(name.as_str())) {
            return Some(*c);
        }

        if let Some(apt) = self.airports.by_code(&q) {
            return Some(apt.location);
        }

        if q.len() >= MIN_NAME_QUERY_LEN {
            if let Some(apt) = self
                .airports
                .all()
                .iter()
                .find(|a| a.name.to_lowercase().contains(&q))
            {
                return Some(apt.location);
            }
        }

        log::debug!("No destination match — query='{}'", query);
        None
    }
}
