//! Time-dependent evaporation and dissolution of a surface slick.

use spillsim_schemas::{
    dispersal::VolumeFractions, environment::EnvironmentalConditions, oil::OilProperties,
};

/// Upper bound on the evaporated share, whatever the oil.
pub const MAX_EVAPORATION_FRACTION: f64 = 0.9;
/// Upper bound on the dissolved share.
pub const MAX_DISSOLUTION_FRACTION: f64 = 0.1;
/// Time constant of the evaporation curve, per hour.
pub const EVAPORATION_CONSTANT_PER_HR: f64 = 0.1;
/// Elapsed hours after which dissolution stops progressing.
pub const DISSOLUTION_SATURATION_HOURS: f64 = 48.0;

const REFERENCE_TEMP_C: f64 = 15.0;
const REFERENCE_WIND_KMH: f64 = 10.0;

/// Asymptote of the evaporation curve. Depends on the oil only.
pub fn max_evaporation(oil: &OilProperties) -> f64 {
    MAX_EVAPORATION_FRACTION.min(oil.evaporation_rate * 2.5)
}

/// Base evaporation rate scaled for water temperature and wind.
///
/// This does not feed [`evaporated_fraction`]: the curve runs on the fixed
/// time constant and its asymptote is set by the oil alone.
pub fn effective_evaporation_rate(oil: &OilProperties, env: &EnvironmentalConditions) -> f64 {
    let temp_factor = 1.0 + (env.water_temp_c - REFERENCE_TEMP_C) * 0.03;
    let wind_factor = 1.0 + (env.wind_speed_kmh - REFERENCE_WIND_KMH) * 0.02;
    oil.evaporation_rate * temp_factor * wind_factor
}

/// Fraction of the spill evaporated after `time_hours`.
///
/// Saturating exponential `E_max * (1 - exp(-0.1 t))`, clamped to
/// `[0, E_max]`.
pub fn evaporated_fraction(
    oil: &OilProperties,
    _env: &EnvironmentalConditions,
    time_hours: f64,
) -> f64 {
    let max_evap = max_evaporation(oil);
    let fraction = max_evap * (1.0 - (-EVAPORATION_CONSTANT_PER_HR * time_hours).exp());
    fraction.max(0.0).min(max_evap.max(0.0))
}

/// Fraction of the spill dissolved into the water column after `time_hours`.
pub fn dissolved_fraction(
    oil: &OilProperties,
    env: &EnvironmentalConditions,
    time_hours: f64,
) -> f64 {
    let temp_factor = 1.0 + (env.water_temp_c - REFERENCE_TEMP_C) * 0.02;
    let wave_factor = 1.0 + env.wave_height_m * 0.3;
    let time_factor = (time_hours / DISSOLUTION_SATURATION_HOURS).min(1.0);

    let fraction = oil.solubility * temp_factor * wave_factor * time_factor;
    fraction.clamp(0.0, MAX_DISSOLUTION_FRACTION)
}

/// Evaporated, dissolved and remaining surface shares. The three always sum
/// to one; the surface share is floored at zero when both caps are reached.
pub fn volume_fractions(
    oil: &OilProperties,
    env: &EnvironmentalConditions,
    time_hours: f64,
) -> VolumeFractions {
    let evaporated = evaporated_fraction(oil, env, time_hours);
    let dissolved = dissolved_fraction(oil, env, time_hours);
    VolumeFractions {
        evaporated,
        dissolved,
        surface: (1.0 - evaporated - dissolved).max(0.0),
    }
}
