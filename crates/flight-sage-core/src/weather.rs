// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::route::WeatherCondition;

/// Visibility at or above this is reported as "10+ km".
const VISIBILITY_UNLIMITED_KM: f32 = 10.0;
const STORM_WIND_KT: f32 = 30.0;
const STORM_GUST_KT: f32 = 35.0;
const LOW_VISIBILITY_KM: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature_c: f32,
    pub wind_speed_kt: f32,
    #[serde(default)]
    pub wind_gust_kt: Option<f32>,
    pub visibility_km: f32,
    /// Free-form conditions label, e.g. "Clear", "Overcast", "Thunderstorm".
    pub conditions: String,
}

impl WeatherReport {
    /// Placeholder report shown until a real weather source is wired in.
    pub fn mock() -> Self {
        Self {
            temperature_c: 22.0,
            wind_speed_kt: 15.0,
            wind_gust_kt: None,
            visibility_km: VISIBILITY_UNLIMITED_KM,
            conditions: "Clear".to_string(),
        }
    }

    pub fn condition(&self) -> WeatherCondition {
        classify(self)
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Temperature: {:.0}°C", self.temperature_c)?;
        match self.wind_gust_kt {
            Some(g) => writeln!(f, "Wind:        {:.0} kt G{:.0}", self.wind_speed_kt, g)?,
            None => writeln!(f, "Wind:        {:.0} kt", self.wind_speed_kt)?,
        }
        if self.visibility_km >= VISIBILITY_UNLIMITED_KM {
            writeln!(f, "Visibility:  10+ km")?;
        } else {
            writeln!(f, "Visibility:  {:.1} km", self.visibility_km)?;
        }
        write!(f, "Conditions:  {}", self.conditions)
    }
}

/// Maps a report onto the route weather classes.
pub fn classify(report: &WeatherReport) -> WeatherCondition {
    let cond = report.conditions.to_lowercase();

    // 1. Convective phenomena
    if cond.contains("thunder")
        || cond.contains("storm")
        || cond.contains("squall")
        || cond.contains("tornado")
        || cond.contains("hail")
    {
        return WeatherCondition::Stormy;
    }

    // 2. Wind
    let gust = report.wind_gust_kt.unwrap_or(0.0);
    if report.wind_speed_kt >= STORM_WIND_KT || gust >= STORM_GUST_KT {
        return WeatherCondition::Stormy;
    }

    // 3. Anything reducing the view
    if report.visibility_km < LOW_VISIBILITY_KM
        || [
            "overcast", "cloud", "broken", "rain", "drizzle", "fog", "mist", "haze", "snow",
        ]
        .iter()
        .any(|k| cond.contains(k))
    {
        return WeatherCondition::Cloudy;
    }

    WeatherCondition::Clear
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(conditions: &str, wind: f32, gust: Option<f32>, vis: f32) -> WeatherReport {
        WeatherReport {
            temperature_c: 15.0,
            wind_speed_kt: wind,
            wind_gust_kt: gust,
            visibility_km: vis,
            conditions: conditions.to_string(),
        }
    }

    #[test]
    fn test_mock_report() {
        let r = WeatherReport::mock();
        assert_eq!(r.condition(), WeatherCondition::Clear);
        let text = r.to_string();
        assert!(text.contains("22°C"));
        assert!(text.contains("15 kt"));
        assert!(text.contains("10+ km"));
        assert!(text.ends_with("Clear"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            classify(&report("Thunderstorm", 10.0, None, 8.0)),
            WeatherCondition::Stormy
        );
        assert_eq!(
            classify(&report("Clear", 32.0, None, 10.0)),
            WeatherCondition::Stormy
        );
        assert_eq!(
            classify(&report("Clear", 18.0, Some(40.0), 10.0)),
            WeatherCondition::Stormy
        );
        assert_eq!(
            classify(&report("Light Rain", 8.0, None, 10.0)),
            WeatherCondition::Cloudy
        );
        assert_eq!(
            classify(&report("Partly Cloudy", 8.0, None, 10.0)),
            WeatherCondition::Cloudy
        );
        assert_eq!(
            classify(&report("Clear", 5.0, None, 2.0)),
            WeatherCondition::Cloudy
        );
        assert_eq!(
            classify(&report("Sunny", 12.0, Some(20.0), 10.0)),
            WeatherCondition::Clear
        );
    }

    #[test]
    fn test_display_gusts_and_visibility() {
        let text = report("Mist", 12.0, Some(22.0), 3.5).to_string();
        assert!(text.contains("12 kt G22"));
        assert!(text.contains("3.5 km"));
    }
}
