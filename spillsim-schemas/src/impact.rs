use crate::{dispersal::VolumeFractions, environment::LocationType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub volume_barrels: f64,
    pub volume_m3: f64,
    pub surface_area_km2: f64,
    pub co2_emissions_tons: f64,
    pub cleanup_time_days: f64,
    pub oil_fractions: VolumeFractions,
    pub slick_thickness_mm: f64,
    pub oil_type: String,
    pub environmental_sensitivity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildlifeImpact {
    pub location_type: LocationType,
    pub wildlife_density: f64,
    pub wildlife_vulnerability: f64,
    pub oil_toxicity: f64,
    pub mortality_rate: f64,
    pub birds_affected: u64,
    pub marine_mammals_affected: u64,
    pub fish_affected: u64,
    pub long_term_ecosystem_impact: f64,
}

/// Monetary estimates, whole US dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicImpact {
    pub cleanup_cost_usd: i64,
    pub environmental_damage_usd: i64,
    pub tourism_impact_usd: i64,
    pub fishery_impact_usd: i64,
    pub shipping_impact_usd: i64,
    pub total_economic_impact_usd: i64,
    pub cost_per_barrel_usd: i64,
}
