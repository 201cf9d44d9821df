//! Coordinate validation and small-extent geographic helpers.

use crate::{error::SpillSimError, spreading::KM_PER_DEGREE};
use spillsim_schemas::spill::LatLon;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn coordinates_in_range(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), SpillSimError> {
    if coordinates_in_range(lat, lon) {
        Ok(())
    } else {
        Err(SpillSimError::InvalidCoordinates { lat, lon })
    }
}

/// Great-circle distance between two points (haversine).
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial bearing from point 1 to point 2 in degrees, 0 = north, clockwise,
/// in `[0, 360)`.
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let dlon = (lon2 - lon1).to_radians();

    let x = dlon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    x.atan2(y).to_degrees().rem_euclid(360.0)
}

/// Point reached travelling `distance_km` from `(lat, lon)` on `bearing_deg`.
pub fn destination_point(lat: f64, lon: f64, bearing_deg: f64, distance_km: f64) -> LatLon {
    let lat1 = lat.to_radians();
    let lon1 = lon.to_radians();
    let bearing = bearing_deg.to_radians();
    let angular = distance_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    let lon2 = (lon2.to_degrees() + 180.0).rem_euclid(360.0) - 180.0;
    (lat2.to_degrees(), lon2)
}

/// Bounding box `(min_lon, min_lat, max_lon, max_lat)` of a circle, clamped
/// to valid coordinate ranges.
pub fn lat_lon_bounds(center_lat: f64, center_lon: f64, radius_km: f64) -> (f64, f64, f64, f64) {
    let radius_lat = radius_km / KM_PER_DEGREE;
    let radius_lon = radius_km / (KM_PER_DEGREE * center_lat.to_radians().cos());

    (
        (center_lon - radius_lon).max(-180.0),
        (center_lat - radius_lat).max(-90.0),
        (center_lon + radius_lon).min(180.0),
        (center_lat + radius_lat).min(90.0),
    )
}

/// Regular grid of roughly `num_points` samples over the circle's bounding
/// square, keeping only those within `radius_km` (great-circle distance).
/// Fewer than four requested points yields just the centre.
pub fn create_grid_points(center_lat: f64, center_lon: f64, radius_km: f64, num_points: usize) -> Vec<LatLon> {
    let n = (num_points as f64).sqrt() as usize;
    if n < 2 {
        return vec![(center_lat, center_lon)];
    }

    let radius_lat = radius_km / KM_PER_DEGREE;
    let radius_lon = radius_km / (KM_PER_DEGREE * center_lat.to_radians().cos());
    let step = |i: usize| -1.0 + 2.0 * i as f64 / (n - 1) as f64;

    (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .map(|(i, j)| (center_lat + radius_lat * step(i), center_lon + radius_lon * step(j)))
        .filter(|&(lat, lon)| haversine_distance_km(center_lat, center_lon, lat, lon) <= radius_km)
        .collect()
}

/// Vertex average of a ring.
pub fn polygon_centroid(polygon: &[LatLon]) -> Option<LatLon> {
    if polygon.is_empty() {
        return None;
    }
    let n = polygon.len() as f64;
    let (lat_sum, lon_sum) = polygon
        .iter()
        .fold((0.0, 0.0), |(a, b), &(lat, lon)| (a + lat, b + lon));
    Some((lat_sum / n, lon_sum / n))
}

/// Area of an implicitly closed ring in km², using the same local
/// flat-earth projection as the spreading simulator.
pub fn polygon_area_km2(polygon: &[LatLon]) -> f64 {
    let Some((lat0, lon0)) = polygon_centroid(polygon) else {
        return 0.0;
    };
    if polygon.len() < 3 {
        return 0.0;
    }
    let km_per_degree_lon = KM_PER_DEGREE * lat0.to_radians().cos();
    let project = |&(lat, lon): &LatLon| ((lon - lon0) * km_per_degree_lon, (lat - lat0) * KM_PER_DEGREE);

    let twice_area: f64 = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| {
            let (x1, y1) = project(a);
            let (x2, y2) = project(b);
            x1 * y2 - x2 * y1
        })
        .sum();
    twice_area.abs() / 2.0
}

/// Even-odd point-in-polygon test on an implicitly closed ring.
pub fn polygon_contains(polygon: &[LatLon], point: LatLon) -> bool {
    let (py, px) = point;
    let mut inside = false;
    let mut j = match polygon.len() {
        0 => return false,
        n => n - 1,
    };
    for i in 0..polygon.len() {
        let (yi, xi) = polygon[i];
        let (yj, xj) = polygon[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
