//! Evaluations of one scenario at several elapsed times.
//!
//! Each hour gets its own freshly built model; nothing is carried from one
//! hour to the next.

use crate::{
    error::SpillSimError, logger::TimeSeriesLogger, model::builder::DispersalModelBuilder,
    spreading::SpreadingConfig,
};
use log::debug;
use spillsim_schemas::{
    dispersal::DispersalResult, environment::EnvironmentalConditions, oil::OilProperties,
    spill::{LatLon, SpillParameters},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub time_hours: f64,
    pub result: DispersalResult,
}

/// Scenario shared by every hour of a sweep.
#[derive(Debug, Clone)]
pub struct TimeSweep {
    pub volume_barrels: f64,
    pub oil: OilProperties,
    pub environment: EnvironmentalConditions,
    pub spreading: SpreadingConfig,
    pub origin: LatLon,
    /// Footprint seed, reused for every hour so the outline stays coherent.
    pub seed: Option<u64>,
}

impl TimeSweep {
    pub fn run(
        &self,
        hours: &[f64],
        mut logger: Option<&mut TimeSeriesLogger>,
    ) -> Result<Vec<SweepPoint>, SpillSimError> {
        let mut points = Vec::with_capacity(hours.len());

        for &time_hours in hours {
            let mut builder = DispersalModelBuilder::new()
                .with_spill(SpillParameters::new(self.volume_barrels, time_hours))
                .with_oil(self.oil.clone())
                .with_environment(self.environment)
                .with_spreading_config(self.spreading);
            if let Some(seed) = self.seed {
                builder = builder.with_seed(seed);
            }
            let mut model = builder.build()?;

            let (lat, lon) = self.origin;
            let result = model.calculate_affected_area(lat, lon).clone();
            debug!("Sweep hour {}: {:.4} km²", time_hours, result.area_km2);

            if let Some(logger) = logger.as_deref_mut() {
                logger.log_result(time_hours, &result)?;
            }
            points.push(SweepPoint { time_hours, result });
        }

        Ok(points)
    }
}

/// Parses a comma-separated list of hours such as `"0,6,12,24"`.
pub fn parse_hours(list: &str) -> Result<Vec<f64>, SpillSimError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| SpillSimError::ConfigError(format!("'{}' is not a number of hours", s)))
        })
        .collect()
}
