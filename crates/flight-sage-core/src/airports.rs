// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::geo::{haversine_km, Coordinate};

const BUILTIN_AIRPORTS: &str = include_str!("../data/airports.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirportCategory {
    Major,
    Regional,
    Airstrip,
}

impl fmt::Display for AirportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AirportCategory::Major => "major",
            AirportCategory::Regional => "regional",
            AirportCategory::Airstrip => "airstrip",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub id: String,
    pub name: String,
    pub code: String,
    pub location: Coordinate,
    pub category: AirportCategory,
    pub facilities: Vec<String>,
}

impl Airport {
    pub fn has_facility(&self, facility: &str) -> bool {
        self.facilities
            .iter()
            .any(|f| f.eq_ignore_ascii_case(facility))
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse airport list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Airport {code} has an invalid location: lat={lat} lon={lon}")]
    InvalidLocation { code: String, lat: f64, lon: f64 },
    #[error("Duplicate airport code: {0}")]
    DuplicateCode(String),
}

/// Immutable list of known airports, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct AirportCatalog {
    airports: Vec<Airport>,
}

impl AirportCatalog {
    /// The airports shipped with the application.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_AIRPORTS)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let airports: Vec<Airport> = serde_json::from_str(json)?;
        Self::from_airports(airports)
    }

    pub fn from_airports(mut airports: Vec<Airport>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for apt in &mut airports {
            if !apt.location.is_valid() {
                return Err(CatalogError::InvalidLocation {
                    code: apt.code.clone(),
                    lat: apt.location.lat,
                    lon: apt.location.lon,
                });
            }
            if !seen.insert(apt.code.to_uppercase()) {
                return Err(CatalogError::DuplicateCode(apt.code.clone()));
            }
            // Facilities are a set; keep first occurrence order for display.
            let mut labels = HashSet::new();
            apt.facilities.retain(|f| labels.insert(f.to_lowercase()));
        }
        log::debug!("Loaded airport catalog — airport_count={}", airports.len());
        Ok(Self { airports })
    }

    pub fn all(&self) -> &[Airport] {
        &self.airports
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Case-insensitive exact code match.
    pub fn by_code(&self, code: &str) -> Option<&Airport> {
        let code = code.trim();
        self.airports
            .iter()
            .find(|a| a.code.eq_ignore_ascii_case(code))
    }

    pub fn of_category(&self, category: AirportCategory) -> impl Iterator<Item = &Airport> {
        self.airports.iter().filter(move |a| a.category == category)
    }

    pub fn nearest(&self, from: Coordinate) -> Option<(&Airport, f64)> {
        self.airports
            .iter()
            .map(|a| (a, haversine_km(from, a.location)))
            .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
    }

    /// Airports within `radius_km`, nearest first.
    pub fn nearby(&self, from: Coordinate, radius_km: f64) -> Vec<(&Airport, f64)> {
        let mut hits: Vec<(&Airport, f64)> = self
            .airports
            .iter()
            .map(|a| (a, haversine_km(from, a.location)))
            .filter(|(_, d)| *d <= radius_km)
            .collect();
        hits.sort_by(|(_, d1), (_, d2)| d1.total_cmp(d2));
        hits
    }
}
