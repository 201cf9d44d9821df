use crate::{
    error::SpillSimError,
    model::engine::DispersalModel,
    spreading::SpreadingConfig,
};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use spillsim_schemas::{
    environment::EnvironmentalConditions, oil::OilProperties, spill::SpillParameters,
};

/// A fluent builder for constructing a `DispersalModel`.
///
/// This is the validation boundary of the engine: the model itself accepts
/// any input, while `build` rejects scenarios that cannot describe a real
/// spill.
#[derive(Default)]
pub struct DispersalModelBuilder {
    spill: Option<SpillParameters>,
    oil: Option<OilProperties>,
    environment: EnvironmentalConditions,
    spreading: SpreadingConfig,
    seed: Option<u64>,
}

impl DispersalModelBuilder {
    /// Creates a new builder with default environmental conditions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spilled volume and the hours elapsed since the release.
    pub fn with_spill(mut self, spill: SpillParameters) -> Self {
        self.spill = Some(spill);
        self
    }

    /// Sets the properties of the spilled oil.
    pub fn with_oil(mut self, oil: OilProperties) -> Self {
        self.oil = Some(oil);
        self
    }

    /// Sets the ambient conditions at the spill site.
    pub fn with_environment(mut self, environment: EnvironmentalConditions) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the footprint polygon shape parameters.
    pub fn with_spreading_config(mut self, spreading: SpreadingConfig) -> Self {
        self.spreading = spreading;
        self
    }

    /// Seeds the footprint roughness so that runs are reproducible. Without a
    /// seed the generator is seeded from system entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Consumes the builder and returns a validated `DispersalModel`.
    ///
    /// # Errors
    ///
    /// Returns a `SpillSimError` if the spill or oil is missing, the volume is
    /// not positive, the elapsed time is negative, or an environmental value is
    /// not finite and non-negative where required.
    pub fn build(self) -> Result<DispersalModel<ChaCha8Rng>, SpillSimError> {
        let spill = self.spill.ok_or(SpillSimError::SpillNotDefined)?;
        let oil = self.oil.ok_or(SpillSimError::OilNotDefined)?;

        if !spill.volume_barrels.is_finite() || spill.volume_barrels <= 0.0 {
            return Err(SpillSimError::InvalidVolume(spill.volume_barrels));
        }
        if !spill.time_hours.is_finite() || spill.time_hours < 0.0 {
            return Err(SpillSimError::InvalidElapsedTime(spill.time_hours));
        }
        validate_environment(&self.environment)?;
        if self.spreading.vertex_count < 3 {
            return Err(SpillSimError::ConfigError(format!(
                "A footprint needs at least 3 vertices, got {}",
                self.spreading.vertex_count
            )));
        }

        let rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        info!(
            "Built dispersal model: {} bbl of '{}' after {} h",
            spill.volume_barrels, oil.name, spill.time_hours
        );

        let mut model = DispersalModel::new(spill, oil, self.environment, rng);
        model.set_spreading_config(self.spreading);
        Ok(model)
    }
}

fn validate_environment(env: &EnvironmentalConditions) -> Result<(), SpillSimError> {
    if !env.wind_speed_kmh.is_finite() || env.wind_speed_kmh < 0.0 {
        return Err(SpillSimError::InvalidEnvironment("wind_speed_kmh"));
    }
    if !env.water_temp_c.is_finite() {
        return Err(SpillSimError::InvalidEnvironment("water_temp_c"));
    }
    if !env.wave_height_m.is_finite() || env.wave_height_m < 0.0 {
        return Err(SpillSimError::InvalidEnvironment("wave_height_m"));
    }
    Ok(())
}
