//! Site-condition lookup used by `--site-conditions`.
//!
//! There is no live data source behind this: temperatures follow latitude
//! and season, wind and waves grow towards the poles, and a handful of
//! reference meridians stand in for a coastline database.

use rand::Rng;
use spillsim_schemas::environment::{EnvironmentalConditions, LocationType, SiteProfile};

const COASTAL_MERIDIANS: [f64; 4] = [-120.0, -80.0, 0.0, 100.0];
const COASTAL_DISTANCE_DEG: f64 = 5.0;

/// Seasonal factor in `[-1, 1]`, peaking in local mid-summer (July in the
/// northern hemisphere, January in the southern).
fn seasonal_factor(lat: f64, month: u32) -> f64 {
    let month = month as f64;
    if lat > 0.0 {
        1.0 - (month - 7.0).abs() / 6.0
    } else {
        1.0 - (((month + 6.0) % 12.0) - 7.0).abs() / 6.0
    }
}

fn is_coastal(lon: f64) -> bool {
    COASTAL_MERIDIANS
        .iter()
        .map(|meridian| (lon - meridian).abs())
        .fold(f64::INFINITY, f64::min)
        < COASTAL_DISTANCE_DEG
}

/// Builds a plausible site profile for `(lat, lon)` in the given month (1-12).
pub fn lookup_site_conditions<R: Rng>(lat: f64, lon: f64, month: u32, rng: &mut R) -> SiteProfile {
    let base_temp = 30.0 - lat.abs() * 0.5;
    let water_temp_c = base_temp + seasonal_factor(lat, month) * 10.0;

    let wind_factor = 0.5 + lat.abs() / 90.0;
    let wind_speed_kmh = 10.0 + 20.0 * wind_factor * rng.gen::<f64>();
    let wave_height_m = 0.5 + 2.0 * wind_factor * rng.gen::<f64>();

    let (environmental_sensitivity, location_type) = if is_coastal(lon) {
        (2.0, LocationType::Coastal)
    } else {
        (1.0, LocationType::OpenOcean)
    };

    log::debug!(
        "Site ({:.3}, {:.3}) month {}: {:.1}°C, wind {:.1} km/h, waves {:.2} m, {}",
        lat,
        lon,
        month,
        water_temp_c,
        wind_speed_kmh,
        wave_height_m,
        location_type
    );

    SiteProfile {
        conditions: EnvironmentalConditions {
            wind_speed_kmh,
            water_temp_c,
            wave_height_m,
        },
        environmental_sensitivity,
        location_type,
    }
}

/// Values given explicitly by the user. Each one wins over both the defaults
/// and the site lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConditionOverrides {
    pub wind_speed_kmh: Option<f64>,
    pub water_temp_c: Option<f64>,
    pub wave_height_m: Option<f64>,
    pub location_type: Option<LocationType>,
    pub environmental_sensitivity: Option<f64>,
}

impl ConditionOverrides {
    /// Fills gaps in `self` from `fallback`.
    pub fn or(self, fallback: ConditionOverrides) -> Self {
        Self {
            wind_speed_kmh: self.wind_speed_kmh.or(fallback.wind_speed_kmh),
            water_temp_c: self.water_temp_c.or(fallback.water_temp_c),
            wave_height_m: self.wave_height_m.or(fallback.wave_height_m),
            location_type: self.location_type.or(fallback.location_type),
            environmental_sensitivity: self
                .environmental_sensitivity
                .or(fallback.environmental_sensitivity),
        }
    }
}

/// Site profile for a run: defaults, replaced by the site lookup when
/// `use_lookup` is set, then by any explicit override.
pub fn resolve_site_profile<R: Rng>(
    lat: f64,
    lon: f64,
    month: u32,
    use_lookup: bool,
    overrides: &ConditionOverrides,
    rng: &mut R,
) -> SiteProfile {
    let mut site = if use_lookup {
        lookup_site_conditions(lat, lon, month, rng)
    } else {
        SiteProfile {
            conditions: EnvironmentalConditions::default(),
            environmental_sensitivity: 1.0,
            location_type: LocationType::default(),
        }
    };

    if let Some(wind) = overrides.wind_speed_kmh {
        site.conditions.wind_speed_kmh = wind;
    }
    if let Some(temp) = overrides.water_temp_c {
        site.conditions.water_temp_c = temp;
    }
    if let Some(waves) = overrides.wave_height_m {
        site.conditions.wave_height_m = waves;
    }
    if let Some(location) = overrides.location_type {
        site.location_type = location;
    }
    if let Some(sensitivity) = overrides.environmental_sensitivity {
        site.environmental_sensitivity = sensitivity;
    }
    site
}
