// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::geo::Coordinate;
use crate::route::{RouteOptions, DEFAULT_CRUISE_SPEED_KMH, DEFAULT_WAYPOINT_OFFSET_DEG};
use crate::RouteError;

pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Degrees the synthesized waypoints are shifted from each endpoint.
    pub waypoint_offset_deg: f64,
    pub cruise_speed_kmh: f64,
    /// Used as the origin when no location fix is available.
    pub default_origin: Option<Coordinate>,
    pub nearby_radius_km: f64,
    pub show_weather: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            waypoint_offset_deg: DEFAULT_WAYPOINT_OFFSET_DEG,
            cruise_speed_kmh: DEFAULT_CRUISE_SPEED_KMH,
            default_origin: None,
            nearby_radius_km: DEFAULT_NEARBY_RADIUS_KM,
            show_weather: true,
        }
    }
}

impl Settings {
    pub fn route_options(&self) -> Result<RouteOptions, RouteError> {
        RouteOptions::new(self.waypoint_offset_deg, self.cruise_speed_kmh)
    }

    pub fn validate(&self) -> Result<()> {
        self.route_options().context("Invalid route options")?;
        if let Some(origin) = self.default_origin {
            origin.validate().context("Invalid default_origin")?;
        }
        if !self.nearby_radius_km.is_finite() || self.nearby_radius_km < 0.0 {
            bail!(
                "nearby_radius_km must be a non-negative number of km, got {}",
                self.nearby_radius_km
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SettingsManager {
    config_path: PathBuf,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    pub fn new() -> Self {
        Self {
            config_path: crate::get_config_root().join("settings.json"),
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Settings> {
        if !self.config_path.exists() {
            log::debug!(
                "No settings file; using defaults — path={}",
                self.config_path.display()
            );
            return Ok(Settings::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read settings.json")?;
        let settings: Settings =
            serde_json::from_str(&content).context("Failed to parse settings.json")?;

        settings
            .validate()
            .context("settings.json has invalid values")?;

        log::debug!("Loaded settings — path={}", self.config_path.display());
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&self.config_path, content).context("Failed to write settings.json")?;
        log::info!("Saved settings — path={}", self.config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"cruise_speed_kmh": 250.0}"#).unwrap();
        assert_eq!(settings.cruise_speed_kmh, 250.0);
        assert_eq!(settings.waypoint_offset_deg, DEFAULT_WAYPOINT_OFFSET_DEG);
        assert!(settings.show_weather);
        assert!(settings.default_origin.is_none());
    }

    #[test]
    fn test_route_options_validation() {
        let mut s = Settings::default();
        assert!(s.route_options().is_ok());
        s.cruise_speed_kmh = 0.0;
        assert!(s.route_options().is_err());
    }

    #[test]
    fn test_validate_radius() {
        let mut s = Settings::default();
        assert!(s.validate().is_ok());
        s.nearby_radius_km = 0.0;
        assert!(s.validate().is_ok());
        s.nearby_radius_km = -1.0;
        assert!(s.validate().is_err());
        s.nearby_radius_km = f64::NAN;
        assert!(s.validate().is_err());
    }
}
