use crate::spreading::SpreadingConfig;
use spillsim_schemas::{
    dispersal::DispersalResult, environment::EnvironmentalConditions, oil::OilProperties,
    spill::SpillParameters,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Bit-exact snapshot of every input that affects a dispersal result.
///
/// Two keys compare equal only when every input is identical, so a cached
/// result can never be served for a different scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScenarioKey {
    bits: Vec<u64>,
}

impl ScenarioKey {
    pub fn new(
        spill: &SpillParameters,
        oil: &OilProperties,
        environment: &EnvironmentalConditions,
        spreading: &SpreadingConfig,
        lat: f64,
        lon: f64,
    ) -> Self {
        let values = [
            spill.volume_barrels,
            spill.time_hours,
            oil.density,
            oil.viscosity,
            oil.surface_tension,
            oil.evaporation_rate,
            oil.solubility,
            environment.wind_speed_kmh,
            environment.water_temp_c,
            environment.wave_height_m,
            spreading.wind_bearing_deg,
            spreading.jitter,
            lat,
            lon,
        ];
        let mut bits: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();
        bits.push(spreading.vertex_count as u64);
        Self { bits }
    }

    /// Compact hash of the key, for diagnostics.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Debug, Clone)]
pub struct CachedResult {
    pub key: ScenarioKey,
    pub result: DispersalResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_at(time_hours: f64, lat: f64) -> ScenarioKey {
        ScenarioKey::new(
            &SpillParameters::new(1000.0, time_hours),
            &OilProperties::default(),
            &EnvironmentalConditions::default(),
            &SpreadingConfig::default(),
            lat,
            -75.0,
        )
    }

    #[test]
    fn identical_inputs_give_identical_keys() {
        assert_eq!(key_at(24.0, 45.0), key_at(24.0, 45.0));
        assert_eq!(key_at(24.0, 45.0).fingerprint(), key_at(24.0, 45.0).fingerprint());
    }

    #[test]
    fn any_changed_input_changes_the_key() {
        assert_ne!(key_at(24.0, 45.0), key_at(48.0, 45.0));
        assert_ne!(key_at(24.0, 45.0), key_at(24.0, 45.5));
    }
}
