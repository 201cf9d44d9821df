//! Surface spreading: the area covered by the remaining oil and the polygon
//! approximating its footprint.
//!
//! The footprint uses a flat-earth local projection (111 km per degree of
//! latitude, scaled by `cos(lat)` for longitude). It is only meaningful for
//! slicks that are small compared to the Earth and away from the poles.

use rand::Rng;
use spillsim_schemas::{
    environment::EnvironmentalConditions, oil::OilProperties, spill::LatLon,
};
use std::f64::consts::PI;

/// Empirical constant of the simplified Fay spreading law.
pub const FAY_CONSTANT: f64 = 1.45;
pub const GRAVITY_M_S2: f64 = 9.81;
/// Relative density of seawater.
pub const SEAWATER_DENSITY: f64 = 1.03;
pub const KM_PER_DEGREE: f64 = 111.0;

/// Shape parameters of the footprint polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadingConfig {
    /// Number of vertices sampled around the full circle.
    pub vertex_count: usize,
    /// Direction the slick elongates towards, in degrees, measured
    /// counter-clockwise from east.
    pub wind_bearing_deg: f64,
    /// Upper bound of the per-vertex radius perturbation; each radius is
    /// multiplied by a draw from `[1, 1 + jitter)`.
    pub jitter: f64,
}

impl Default for SpreadingConfig {
    fn default() -> Self {
        Self {
            vertex_count: 36,
            wind_bearing_deg: 45.0,
            jitter: 0.1,
        }
    }
}

/// Area in m² covered by `remaining_volume_m3` of oil after `time_hours`.
///
/// Gravity-viscous spreading in the form
/// `k V^3/4 t^1/4 (g Δρ/ρ)^1/8 / (ν^1/4 σ^1/2)`, scaled up by wind and wave
/// action. Zero volume or zero elapsed time gives zero area.
pub fn fay_area_m2(
    remaining_volume_m3: f64,
    time_hours: f64,
    oil: &OilProperties,
    env: &EnvironmentalConditions,
) -> f64 {
    let time_seconds = time_hours * 3600.0;
    if remaining_volume_m3 <= 0.0 || time_seconds <= 0.0 {
        return 0.0;
    }

    let relative_density_diff = (SEAWATER_DENSITY - oil.density) / SEAWATER_DENSITY;
    let wind_factor = 1.0 + (env.wind_speed_kmh / 20.0) * 0.5;
    let wave_factor = 1.0 + env.wave_height_m * 0.3;

    let viscosity_pa_s = oil.viscosity * 0.001;
    let surface_tension_n_m = oil.surface_tension * 0.001;

    FAY_CONSTANT
        * remaining_volume_m3.powf(0.75)
        * time_seconds.powf(0.25)
        * (GRAVITY_M_S2 * relative_density_diff.abs()).powf(0.125)
        / (viscosity_pa_s.powf(0.25) * surface_tension_n_m.powf(0.5))
        * wind_factor
        * wave_factor
}

/// Radius of the circle with the given area.
pub fn equivalent_radius_km(area_km2: f64) -> f64 {
    (area_km2.max(0.0) / PI).sqrt()
}

/// How strongly the footprint elongates downwind, in `[0, 1]`.
pub fn wind_deformation(wind_speed_kmh: f64) -> f64 {
    (wind_speed_kmh / 60.0).clamp(0.0, 1.0)
}

/// Wraps an angle in radians into `(-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Builds the footprint ring around `(center_lat, center_lon)`.
///
/// The ring has `config.vertex_count` vertices in counter-clockwise order and
/// is implicitly closed. Self-intersection is not checked; at wind speeds of
/// 60 km/h and above the upwind vertex collapses onto the centre.
pub fn spread_polygon<R: Rng>(
    center_lat: f64,
    center_lon: f64,
    area_km2: f64,
    wind_speed_kmh: f64,
    config: &SpreadingConfig,
    rng: &mut R,
) -> Vec<LatLon> {
    let radius_km = equivalent_radius_km(area_km2);
    let wind_direction = config.wind_bearing_deg.to_radians();
    let wind_deform = wind_deformation(wind_speed_kmh);
    let km_per_degree_lon = KM_PER_DEGREE * center_lat.to_radians().cos();

    (0..config.vertex_count)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / config.vertex_count as f64;
            let offset = normalize_angle(angle - wind_direction);
            let stretch_factor = 1.0 + wind_deform * offset.cos();

            let roughness = if config.jitter > 0.0 {
                1.0 + config.jitter * rng.gen::<f64>()
            } else {
                1.0
            };
            let r = radius_km * stretch_factor * roughness;

            let delta_lat = r * angle.sin() / KM_PER_DEGREE;
            let delta_lon = r * angle.cos() / km_per_degree_lon;
            (center_lat + delta_lat, center_lon + delta_lon)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn smooth() -> SpreadingConfig {
        SpreadingConfig {
            jitter: 0.0,
            ..SpreadingConfig::default()
        }
    }

    #[test]
    fn zero_volume_or_time_covers_nothing() {
        let oil = OilProperties::default();
        let env = EnvironmentalConditions::default();
        assert_eq!(fay_area_m2(0.0, 24.0, &oil, &env), 0.0);
        assert_eq!(fay_area_m2(50.0, 0.0, &oil, &env), 0.0);
        assert!(fay_area_m2(50.0, 24.0, &oil, &env) > 0.0);
    }

    #[test]
    fn area_grows_with_time_and_wind() {
        let oil = OilProperties::default();
        let calm = EnvironmentalConditions::default();
        let windy = EnvironmentalConditions {
            wind_speed_kmh: 40.0,
            ..calm
        };
        assert!(fay_area_m2(50.0, 48.0, &oil, &calm) > fay_area_m2(50.0, 24.0, &oil, &calm));
        assert!(fay_area_m2(50.0, 24.0, &oil, &windy) > fay_area_m2(50.0, 24.0, &oil, &calm));
    }

    #[test]
    fn viscous_oil_spreads_less() {
        let env = EnvironmentalConditions::default();
        let light = OilProperties {
            viscosity: 10.0,
            ..OilProperties::default()
        };
        let heavy = OilProperties {
            viscosity: 500.0,
            ..OilProperties::default()
        };
        assert!(fay_area_m2(50.0, 24.0, &light, &env) > fay_area_m2(50.0, 24.0, &heavy, &env));
    }

    #[test]
    fn normalizes_into_half_open_range() {
        assert_abs_diff_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(0.5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-2.0 * PI - 0.25), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn wind_deformation_is_bounded() {
        assert_eq!(wind_deformation(0.0), 0.0);
        assert_eq!(wind_deformation(30.0), 0.5);
        assert_eq!(wind_deformation(120.0), 1.0);
        assert_eq!(wind_deformation(-5.0), 0.0);
    }

    #[test]
    fn calm_footprint_is_a_circle_of_the_given_area() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let polygon = spread_polygon(10.0, 20.0, 25.0, 0.0, &smooth(), &mut rng);
        assert_eq!(polygon.len(), 36);

        let radius = equivalent_radius_km(25.0);
        for &(lat, lon) in &polygon {
            let distance = geo::haversine_distance_km(10.0, 20.0, lat, lon);
            assert_relative_eq!(distance, radius, max_relative = 0.01);
        }

        let area = geo::polygon_area_km2(&polygon);
        assert_relative_eq!(area, 25.0, max_relative = 0.01);
    }

    #[test]
    fn wind_elongates_footprint_downwind() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let polygon = spread_polygon(0.0, 0.0, 10.0, 30.0, &smooth(), &mut rng);
        let radius = equivalent_radius_km(10.0);

        // vertex 4 sits at 40°, vertex 22 at 220°: nearest the wind bearing and its opposite
        let downwind = geo::haversine_distance_km(0.0, 0.0, polygon[4].0, polygon[4].1);
        let upwind = geo::haversine_distance_km(0.0, 0.0, polygon[22].0, polygon[22].1);
        assert!(downwind > radius);
        assert!(upwind < radius);
    }

    #[test]
    fn jitter_stays_within_ten_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let polygon = spread_polygon(45.0, -75.0, 4.0, 0.0, &SpreadingConfig::default(), &mut rng);
        let radius = equivalent_radius_km(4.0);
        for &(lat, lon) in &polygon {
            let distance = geo::haversine_distance_km(45.0, -75.0, lat, lon);
            assert!(distance >= radius * 0.99);
            assert!(distance < radius * 1.11);
        }
    }

    #[test]
    fn same_seed_gives_same_footprint() {
        let config = SpreadingConfig::default();
        let a = spread_polygon(45.0, -75.0, 4.0, 15.0, &config, &mut ChaCha8Rng::seed_from_u64(3));
        let b = spread_polygon(45.0, -75.0, 4.0, 15.0, &config, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn footprint_encloses_its_centre() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for wind in [0.0, 10.0, 35.0, 59.0] {
            let polygon = spread_polygon(45.0, -75.0, 3.0, wind, &SpreadingConfig::default(), &mut rng);
            assert!(geo::polygon_contains(&polygon, (45.0, -75.0)));
        }
    }

    #[test]
    fn respects_configured_vertex_count() {
        let config = SpreadingConfig {
            vertex_count: 72,
            ..SpreadingConfig::default()
        };
        let polygon = spread_polygon(0.0, 0.0, 1.0, 10.0, &config, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(polygon.len(), 72);
    }
}
