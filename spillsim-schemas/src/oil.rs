use serde::{Deserialize, Serialize};

/// Qualitative toxicity rating carried by some catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToxicityRating {
    Low,
    Moderate,
    High,
    #[serde(rename = "very high", alias = "very_high")]
    VeryHigh,
}

impl ToxicityRating {
    /// Numeric weight used by the wildlife impact estimate.
    pub fn weight(self) -> f64 {
        match self {
            ToxicityRating::Low => 0.3,
            ToxicityRating::Moderate => 0.6,
            ToxicityRating::High => 0.8,
            ToxicityRating::VeryHigh => 1.0,
        }
    }
}

/// Physical and chemical properties of a spilled oil.
///
/// `density` is a relative density (g/cm³), so the default `0.9`
/// corresponds to roughly 900 kg/m³. Fields missing from a catalog entry
/// fall back to the values in `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OilProperties {
    pub name: String,
    pub density: f64,
    pub viscosity: f64,
    pub surface_tension: f64,
    pub evaporation_rate: f64,
    pub solubility: f64,

    // Impact estimation attributes, unused by the dispersal engine.
    pub co2_emission_factor: f64,
    pub cleanup_difficulty: f64,
    pub persistence_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environmental_toxicity: Option<ToxicityRating>,
    pub toxicity: f64,
}

impl Default for OilProperties {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            density: 0.9,
            viscosity: 50.0,
            surface_tension: 25.0,
            evaporation_rate: 0.3,
            solubility: 0.02,
            co2_emission_factor: 3.0,
            cleanup_difficulty: 3.0,
            persistence_factor: 0.8,
            environmental_toxicity: None,
            toxicity: 0.6,
        }
    }
}
