use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ambient conditions at the spill site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentalConditions {
    pub wind_speed_kmh: f64,
    pub water_temp_c: f64,
    pub wave_height_m: f64,
}

impl Default for EnvironmentalConditions {
    fn default() -> Self {
        Self {
            wind_speed_kmh: 10.0,
            water_temp_c: 15.0,
            wave_height_m: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    #[default]
    OpenOcean,
    Coastal,
    Estuary,
    Reef,
    Wetland,
    River,
    Port,
}

impl LocationType {
    pub const ALL: [LocationType; 7] = [
        LocationType::OpenOcean,
        LocationType::Coastal,
        LocationType::Estuary,
        LocationType::Reef,
        LocationType::Wetland,
        LocationType::River,
        LocationType::Port,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LocationType::OpenOcean => "open_ocean",
            LocationType::Coastal => "coastal",
            LocationType::Estuary => "estuary",
            LocationType::Reef => "reef",
            LocationType::Wetland => "wetland",
            LocationType::River => "river",
            LocationType::Port => "port",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocationType::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown location type '{}'", s))
    }
}

/// Conditions plus the ecological context of a site, as produced by the
/// site lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub conditions: EnvironmentalConditions,
    pub environmental_sensitivity: f64,
    pub location_type: LocationType,
}
