use crate::spill::LatLon;
use serde::{Deserialize, Serialize};

/// Output of one dispersal evaluation.
///
/// Serialized field names follow the downstream contract (`thickness`,
/// `evaporated`, `dissolved`, `surface`). The polygon ring is implicitly
/// closed: the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersalResult {
    pub area_km2: f64,
    pub polygon: Vec<LatLon>,
    pub center: LatLon,
    #[serde(rename = "thickness")]
    pub thickness_mm: f64,
    #[serde(rename = "evaporated")]
    pub evaporated_fraction: f64,
    #[serde(rename = "dissolved")]
    pub dissolved_fraction: f64,
    #[serde(rename = "surface")]
    pub surface_fraction: f64,
}

impl DispersalResult {
    pub fn fractions(&self) -> VolumeFractions {
        VolumeFractions {
            evaporated: self.evaporated_fraction,
            dissolved: self.dissolved_fraction,
            surface: self.surface_fraction,
        }
    }
}

/// Share of the spilled volume in each weathering state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeFractions {
    pub evaporated: f64,
    pub dissolved: f64,
    pub surface: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_contract_keys() {
        let result = DispersalResult {
            area_km2: 1.5,
            polygon: vec![(45.0, -75.0), (45.1, -75.0), (45.0, -74.9)],
            center: (45.0, -75.0),
            thickness_mm: 0.2,
            evaporated_fraction: 0.6,
            dissolved_fraction: 0.01,
            surface_fraction: 0.39,
        };
        let value = serde_json::to_value(&result).unwrap();
        for key in ["area_km2", "polygon", "center", "thickness", "evaporated", "dissolved", "surface"] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["center"], serde_json::json!([45.0, -75.0]));
    }
}
