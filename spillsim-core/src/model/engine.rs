use super::state::{CachedResult, ScenarioKey};
use crate::{
    model::builder::DispersalModelBuilder,
    spreading::{self, SpreadingConfig},
    weathering,
};
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use spillsim_schemas::{
    dispersal::{DispersalResult, VolumeFractions},
    environment::EnvironmentalConditions,
    oil::OilProperties,
    spill::SpillParameters,
};

/// Stateful dispersal estimate for one spill scenario.
///
/// The model owns its inputs, the random source used to roughen the
/// footprint, and the last computed result. The cached result is reused
/// only while every input, including the requested location, is unchanged.
pub struct DispersalModel<R: Rng = ChaCha8Rng> {
    pub(super) spill: SpillParameters,
    pub(super) oil: OilProperties,
    pub(super) environment: EnvironmentalConditions,
    pub(super) spreading: SpreadingConfig,
    pub(super) rng: R,
    pub(super) cache: Option<CachedResult>,
}

impl DispersalModel<ChaCha8Rng> {
    pub fn builder() -> DispersalModelBuilder {
        DispersalModelBuilder::new()
    }
}

impl<R: Rng> DispersalModel<R> {
    /// Creates a model without validating anything. Implausible inputs
    /// produce arithmetically consistent but meaningless results.
    pub fn new(
        spill: SpillParameters,
        oil: OilProperties,
        environment: EnvironmentalConditions,
        rng: R,
    ) -> Self {
        Self {
            spill,
            oil,
            environment,
            spreading: SpreadingConfig::default(),
            rng,
            cache: None,
        }
    }

    /// Computes the affected area around `(lat, lon)`, or returns the cached
    /// result if nothing changed since the last call.
    pub fn calculate_affected_area(&mut self, lat: f64, lon: f64) -> &DispersalResult {
        let key = ScenarioKey::new(
            &self.spill,
            &self.oil,
            &self.environment,
            &self.spreading,
            lat,
            lon,
        );

        let cached = match self.cache.take() {
            Some(cached) if cached.key == key => {
                debug!("Reusing cached dispersal result {:016x}", key.fingerprint());
                cached
            }
            _ => {
                debug!("Computing dispersal result {:016x}", key.fingerprint());
                let result = self.evaluate(lat, lon);
                CachedResult { key, result }
            }
        };

        &self.cache.insert(cached).result
    }

    fn evaluate(&mut self, lat: f64, lon: f64) -> DispersalResult {
        let time_hours = self.spill.time_hours;
        let fractions = weathering::volume_fractions(&self.oil, &self.environment, time_hours);
        let remaining_volume_m3 = self.spill.volume_m3() * fractions.surface;

        let area_m2 =
            spreading::fay_area_m2(remaining_volume_m3, time_hours, &self.oil, &self.environment);
        let area_km2 = area_m2 / 1_000_000.0;

        let thickness_mm = if area_m2 > 0.0 {
            (remaining_volume_m3 / area_m2) * 1000.0
        } else {
            0.0
        };

        let polygon = spreading::spread_polygon(
            lat,
            lon,
            area_km2,
            self.environment.wind_speed_kmh,
            &self.spreading,
            &mut self.rng,
        );

        DispersalResult {
            area_km2,
            polygon,
            center: (lat, lon),
            thickness_mm,
            evaporated_fraction: fractions.evaporated,
            dissolved_fraction: fractions.dissolved,
            surface_fraction: fractions.surface,
        }
    }

    /// Weathering split at the current elapsed time. Independent of location
    /// and of the cache.
    pub fn volume_fractions(&self) -> VolumeFractions {
        weathering::volume_fractions(&self.oil, &self.environment, self.spill.time_hours)
    }

    pub fn slick_thickness_mm(&mut self, lat: f64, lon: f64) -> f64 {
        self.calculate_affected_area(lat, lon).thickness_mm
    }

    pub fn cached_result(&self) -> Option<&DispersalResult> {
        self.cache.as_ref().map(|c| &c.result)
    }

    pub fn set_time_hours(&mut self, time_hours: f64) {
        self.spill.time_hours = time_hours;
    }

    pub fn set_environment(&mut self, environment: EnvironmentalConditions) {
        self.environment = environment;
    }

    pub fn set_spreading_config(&mut self, spreading: SpreadingConfig) {
        self.spreading = spreading;
    }

    pub fn spill(&self) -> &SpillParameters {
        &self.spill
    }

    pub fn oil(&self) -> &OilProperties {
        &self.oil
    }

    pub fn environment(&self) -> &EnvironmentalConditions {
        &self.environment
    }

    pub fn spreading_config(&self) -> &SpreadingConfig {
        &self.spreading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;

    fn test_oil() -> OilProperties {
        OilProperties {
            name: "Test Oil".to_string(),
            density: 0.85,
            viscosity: 10.0,
            surface_tension: 25.0,
            evaporation_rate: 0.3,
            solubility: 0.02,
            persistence_factor: 0.7,
            ..OilProperties::default()
        }
    }

    fn model(time_hours: f64) -> DispersalModel {
        DispersalModel::new(
            SpillParameters::new(1000.0, time_hours),
            test_oil(),
            EnvironmentalConditions::default(),
            ChaCha8Rng::seed_from_u64(42),
        )
    }

    #[test]
    fn result_has_expected_shape() {
        let mut model = model(24.0);
        let result = model.calculate_affected_area(45.0, -75.0).clone();

        assert!(result.area_km2 > 0.0);
        assert_eq!(result.center, (45.0, -75.0));
        assert_eq!(result.polygon.len(), 36);
        assert!(geo::polygon_contains(&result.polygon, result.center));
        assert!(result.thickness_mm > 0.0);
        assert_abs_diff_eq!(
            result.evaporated_fraction + result.dissolved_fraction + result.surface_fraction,
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn thickness_is_surface_volume_over_area() {
        let mut model = model(24.0);
        let result = model.calculate_affected_area(45.0, -75.0).clone();
        let remaining_m3 = 1000.0 * 0.158987 * result.surface_fraction;
        let area_m2 = result.area_km2 * 1_000_000.0;
        assert_abs_diff_eq!(result.thickness_mm, remaining_m3 / area_m2 * 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn repeated_calls_are_served_from_cache() {
        let mut model = model(24.0);
        let first = model.calculate_affected_area(45.0, -75.0).clone();
        let second = model.calculate_affected_area(45.0, -75.0).clone();
        // a recomputation would draw fresh jitter and move the vertices
        assert_eq!(first, second);
    }

    #[test]
    fn changing_time_invalidates_cache() {
        let mut model = model(24.0);
        let day_one = model.calculate_affected_area(45.0, -75.0).clone();

        model.set_time_hours(48.0);
        let day_two = model.calculate_affected_area(45.0, -75.0).clone();

        assert_ne!(day_two.area_km2, day_one.area_km2);
        assert!(day_two.evaporated_fraction > day_one.evaporated_fraction);
        assert!(day_two.thickness_mm < day_one.thickness_mm);
    }

    #[test]
    fn changing_location_invalidates_cache() {
        let mut model = model(24.0);
        model.calculate_affected_area(45.0, -75.0);
        let moved = model.calculate_affected_area(10.0, 20.0).clone();
        assert_eq!(moved.center, (10.0, 20.0));
        assert!(geo::polygon_contains(&moved.polygon, (10.0, 20.0)));
    }

    #[test]
    fn changing_environment_invalidates_cache() {
        let mut model = model(24.0);
        let calm = model.calculate_affected_area(45.0, -75.0).area_km2;
        model.set_environment(EnvironmentalConditions {
            wind_speed_kmh: 40.0,
            ..EnvironmentalConditions::default()
        });
        assert!(model.calculate_affected_area(45.0, -75.0).area_km2 > calm);
    }

    #[test]
    fn time_zero_has_no_footprint() {
        let mut model = model(0.0);
        let result = model.calculate_affected_area(45.0, -75.0).clone();
        assert_eq!(result.evaporated_fraction, 0.0);
        assert_eq!(result.dissolved_fraction, 0.0);
        assert_eq!(result.surface_fraction, 1.0);
        assert_eq!(result.area_km2, 0.0);
        assert_eq!(result.thickness_mm, 0.0);
    }

    #[test]
    fn zero_volume_degenerates_gracefully() {
        let mut model = DispersalModel::new(
            SpillParameters::new(0.0, 24.0),
            test_oil(),
            EnvironmentalConditions::default(),
            ChaCha8Rng::seed_from_u64(1),
        );
        let result = model.calculate_affected_area(0.0, 0.0);
        assert_eq!(result.area_km2, 0.0);
        assert_eq!(result.thickness_mm, 0.0);
        assert!(result.polygon.iter().all(|&p| p == (0.0, 0.0)));
    }

    #[test]
    fn heavy_oil_spreads_less_and_stays_thicker() {
        let heavy = OilProperties {
            name: "Heavy Oil".to_string(),
            density: 0.95,
            viscosity: 500.0,
            surface_tension: 30.0,
            evaporation_rate: 0.1,
            solubility: 0.01,
            persistence_factor: 0.9,
            ..OilProperties::default()
        };
        let mut heavy_model = DispersalModel::new(
            SpillParameters::new(1000.0, 24.0),
            heavy,
            EnvironmentalConditions::default(),
            ChaCha8Rng::seed_from_u64(42),
        );
        let mut light_model = model(24.0);

        let light = light_model.calculate_affected_area(45.0, -75.0).clone();
        let heavy = heavy_model.calculate_affected_area(45.0, -75.0).clone();

        assert!(light.area_km2 > heavy.area_km2);
        assert!(light.evaporated_fraction > heavy.evaporated_fraction);
        assert!(heavy.thickness_mm > light.thickness_mm);
    }

    #[test]
    fn volume_fractions_match_result() {
        let mut model = model(24.0);
        let fractions = model.volume_fractions();
        let result = model.calculate_affected_area(45.0, -75.0);
        assert_eq!(result.fractions(), fractions);
    }

    #[test]
    fn cached_result_is_empty_until_first_call() {
        let mut model = model(24.0);
        assert!(model.cached_result().is_none());
        let thickness = model.slick_thickness_mm(45.0, -75.0);
        assert_eq!(model.cached_result().map(|r| r.thickness_mm), Some(thickness));
    }
}
