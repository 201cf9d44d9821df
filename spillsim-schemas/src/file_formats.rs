use crate::{environment::LocationType, oil::OilProperties};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OilTypeEntry {
    pub oil_type_id: String,
    #[serde(flatten)]
    pub properties: OilProperties,
}

#[derive(Debug, Deserialize)]
pub struct OilCatalogFile {
    pub schema_version: String,
    pub oil_types: Vec<OilTypeEntry>,
}

/// One row of a sample-spill batch file. Empty optional columns fall back
/// to the run's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSpill {
    pub name: String,
    pub volume_barrels: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub oil_type: String,
    #[serde(default)]
    pub time_hours: Option<f64>,
    #[serde(default)]
    pub wind_speed_kmh: Option<f64>,
    #[serde(default)]
    pub water_temp_c: Option<f64>,
    #[serde(default)]
    pub wave_height_m: Option<f64>,
    #[serde(default)]
    pub location_type: Option<LocationType>,
    #[serde(default)]
    pub environmental_sensitivity: Option<f64>,
}
