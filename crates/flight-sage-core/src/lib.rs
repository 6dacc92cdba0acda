// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod airports;
pub mod destinations;
pub mod geo;
pub mod planner;
pub mod route;
pub mod settings;
pub mod weather;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

pub use geo::{haversine_km, Coordinate};
pub use route::{
    compute_route, compute_route_between, Difficulty, Route, RouteCalculator, RouteOptions,
    WeatherCondition,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Invalid route options: {0}")]
    InvalidOptions(String),
}

/// Directory holding `settings.json`. Falls back to the working directory when
/// the platform has no home/config location.
pub fn get_config_root() -> PathBuf {
    ProjectDirs::from("org", "flight-sage", "flight-sage")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
