use serde::{Deserialize, Serialize};

/// Cubic metres in one oil barrel.
pub const BARREL_TO_CUBIC_METRES: f64 = 0.158987;

/// A `(latitude, longitude)` pair in decimal degrees.
pub type LatLon = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpillParameters {
    pub volume_barrels: f64,
    /// Hours elapsed since the release.
    pub time_hours: f64,
}

impl SpillParameters {
    pub fn new(volume_barrels: f64, time_hours: f64) -> Self {
        Self {
            volume_barrels,
            time_hours,
        }
    }

    pub fn volume_m3(&self) -> f64 {
        self.volume_barrels * BARREL_TO_CUBIC_METRES
    }
}

impl Default for SpillParameters {
    fn default() -> Self {
        Self {
            volume_barrels: 1000.0,
            time_hours: 24.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_barrels_to_cubic_metres() {
        let spill = SpillParameters::new(1000.0, 24.0);
        assert!((spill.volume_m3() - 158.987).abs() < 1e-9);
    }
}
