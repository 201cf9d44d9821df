//! Environmental, wildlife and economic impact estimates derived from a
//! computed dispersal result.

use crate::model::engine::DispersalModel;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use spillsim_schemas::{
    dispersal::DispersalResult,
    environment::{EnvironmentalConditions, LocationType},
    impact::{EconomicImpact, ImpactSummary, WildlifeImpact},
    oil::OilProperties,
    spill::SpillParameters,
};

/// Tonnes of CO₂ per barrel emitted by cleanup operations.
const CLEANUP_EMISSIONS_FACTOR: f64 = 0.1;
/// Days of cleanup per 1000 barrels before adjustments.
const BASE_TIME_PER_VOLUME: f64 = 1.5;
const CLEANUP_VARIATION_SD: f64 = 0.05;
const BASE_CLEANUP_COST_PER_BARREL: f64 = 10_000.0;

/// Wildlife density and vulnerability of a location. Ports have no wildlife
/// profile of their own and use the open-ocean one.
fn wildlife_profile(location: LocationType) -> (LocationType, f64, f64) {
    match location {
        LocationType::OpenOcean | LocationType::Port => (LocationType::OpenOcean, 0.2, 0.6),
        LocationType::Coastal => (LocationType::Coastal, 0.8, 0.8),
        LocationType::Estuary => (LocationType::Estuary, 1.0, 1.0),
        LocationType::Reef => (LocationType::Reef, 1.2, 0.9),
        LocationType::Wetland => (LocationType::Wetland, 1.0, 1.0),
        LocationType::River => (LocationType::River, 0.7, 0.8),
    }
}

/// Cleanup cost multiplier of a location.
pub fn location_multiplier(location: LocationType) -> f64 {
    match location {
        LocationType::OpenOcean => 1.0,
        LocationType::Coastal => 2.0,
        LocationType::Estuary => 2.5,
        LocationType::Reef => 3.0,
        LocationType::Wetland => 2.5,
        LocationType::River => 2.0,
        LocationType::Port => 1.8,
    }
}

pub struct ImpactEstimator {
    result: DispersalResult,
    spill: SpillParameters,
    oil: OilProperties,
    environment: EnvironmentalConditions,
    environmental_sensitivity: f64,
}

impl ImpactEstimator {
    pub fn new(
        result: DispersalResult,
        spill: SpillParameters,
        oil: OilProperties,
        environment: EnvironmentalConditions,
        environmental_sensitivity: f64,
    ) -> Self {
        Self {
            result,
            spill,
            oil,
            environment,
            environmental_sensitivity,
        }
    }

    /// Runs (or reuses) the model's dispersal at `(lat, lon)` and wraps the
    /// result.
    pub fn for_model<R: Rng>(
        model: &mut DispersalModel<R>,
        lat: f64,
        lon: f64,
        environmental_sensitivity: f64,
    ) -> Self {
        let result = model.calculate_affected_area(lat, lon).clone();
        Self::new(
            result,
            *model.spill(),
            model.oil().clone(),
            *model.environment(),
            environmental_sensitivity,
        )
    }

    pub fn surface_area_km2(&self) -> f64 {
        self.result.area_km2
    }

    pub fn volume_barrels(&self) -> f64 {
        self.spill.volume_barrels
    }

    /// CO₂-equivalent emissions in tonnes: direct emissions of each weathering
    /// share plus the cost of cleaning up the surface oil.
    pub fn co2_emissions_tonnes(&self) -> f64 {
        let barrels = self.spill.volume_barrels;
        let factor = self.oil.co2_emission_factor;
        let f = self.result.fractions();

        let evaporated = barrels * f.evaporated * factor;
        let dissolved = barrels * f.dissolved * factor * 0.5;
        let surface = barrels * f.surface * factor * 0.8;
        let cleanup = barrels * f.surface * CLEANUP_EMISSIONS_FACTOR;

        evaporated + dissolved + surface + cleanup
    }

    /// Cleanup duration in days before random variation.
    pub fn nominal_cleanup_time_days(&self) -> f64 {
        let basic_time = BASE_TIME_PER_VOLUME * self.spill.volume_barrels / 1000.0;

        let viscosity_factor = (self.oil.viscosity / 100.0 * 1.5).clamp(0.5, 3.0);
        let persistence_factor = (self.oil.persistence_factor * 2.0).clamp(1.0, 2.0);
        let difficulty_factor = self.oil.cleanup_difficulty / 3.0;

        let env = &self.environment;
        let wave_factor = (0.8 + env.wave_height_m * 0.4).clamp(0.8, 2.0);
        let wind_factor = (0.8 + env.wind_speed_kmh / 20.0 * 0.5).clamp(0.8, 1.5);
        let temp_factor = (1.5 - env.water_temp_c / 30.0 * 0.5).clamp(0.8, 1.5);

        let area_factor = (0.5 + self.result.area_km2 / 100.0 * 0.5).clamp(1.0, 3.0);
        let sensitivity_factor = self.environmental_sensitivity.clamp(0.8, 2.0);

        basic_time
            * viscosity_factor
            * persistence_factor
            * difficulty_factor
            * wave_factor
            * wind_factor
            * temp_factor
            * area_factor
            * sensitivity_factor
    }

    /// Cleanup duration in days with ±5 % (one standard deviation) natural
    /// variation, never less than a day.
    pub fn cleanup_time_days<R: Rng>(&self, rng: &mut R) -> f64 {
        let variation = Normal::new(1.0, CLEANUP_VARIATION_SD)
            .map(|normal| normal.sample(rng))
            .unwrap_or(1.0);
        (self.nominal_cleanup_time_days() * variation).max(1.0)
    }

    fn oil_toxicity(&self) -> f64 {
        match self.oil.environmental_toxicity {
            Some(rating) => rating.weight(),
            None => ((self.oil.density - 0.8) * 2.0 + self.oil.viscosity / 1000.0 * 0.5)
                .clamp(0.3, 1.0),
        }
    }

    pub fn wildlife_impact(&self, location: LocationType) -> WildlifeImpact {
        let (location_type, density, vulnerability) = wildlife_profile(location);
        let area = self.result.area_km2;
        let toxicity = self.oil_toxicity();
        let persistence = self.oil.persistence_factor;

        let volume_factor =
            (0.1 + (self.spill.volume_barrels / 100.0).log10() * 0.3).clamp(0.1, 1.0);
        let mortality_rate = vulnerability * toxicity * volume_factor * persistence * 0.8;

        WildlifeImpact {
            location_type,
            wildlife_density: density,
            wildlife_vulnerability: vulnerability,
            oil_toxicity: toxicity,
            mortality_rate,
            birds_affected: (area * density * 100.0 * vulnerability) as u64,
            marine_mammals_affected: (area * density * 5.0 * vulnerability) as u64,
            // fish can partly avoid the slick
            fish_affected: (area * density * 1000.0 * vulnerability * 0.5) as u64,
            long_term_ecosystem_impact: persistence * toxicity * self.environmental_sensitivity,
        }
    }

    pub fn economic_impact(&self, location: LocationType) -> EconomicImpact {
        let barrels = self.spill.volume_barrels;
        let area = self.result.area_km2;
        let multiplier = location_multiplier(location);
        let difficulty = self.oil.cleanup_difficulty / 3.0;

        let cleanup_cost = barrels * BASE_CLEANUP_COST_PER_BARREL * multiplier * difficulty;
        let environmental_damage = area * 500_000.0 * self.environmental_sensitivity;

        let tourism = match location {
            LocationType::Coastal | LocationType::Reef | LocationType::Estuary => {
                area * 100_000.0 * multiplier
            }
            _ => 0.0,
        };
        let fishery = match location {
            LocationType::Coastal
            | LocationType::Estuary
            | LocationType::River
            | LocationType::Reef => area * 50_000.0 * self.oil.toxicity,
            _ => 0.0,
        };
        let shipping = match location {
            LocationType::Port | LocationType::River => 500_000.0 * difficulty * multiplier,
            _ => 0.0,
        };

        let total = cleanup_cost + environmental_damage + tourism + fishery + shipping;

        EconomicImpact {
            cleanup_cost_usd: cleanup_cost as i64,
            environmental_damage_usd: environmental_damage as i64,
            tourism_impact_usd: tourism as i64,
            fishery_impact_usd: fishery as i64,
            shipping_impact_usd: shipping as i64,
            total_economic_impact_usd: total as i64,
            cost_per_barrel_usd: if barrels > 0.0 { (total / barrels) as i64 } else { 0 },
        }
    }

    pub fn summary<R: Rng>(&self, rng: &mut R) -> ImpactSummary {
        ImpactSummary {
            volume_barrels: self.spill.volume_barrels,
            volume_m3: self.spill.volume_m3(),
            surface_area_km2: self.surface_area_km2(),
            co2_emissions_tons: self.co2_emissions_tonnes(),
            cleanup_time_days: self.cleanup_time_days(rng),
            oil_fractions: self.result.fractions(),
            slick_thickness_mm: self.result.thickness_mm,
            oil_type: self.oil.name.clone(),
            environmental_sensitivity: self.environmental_sensitivity,
        }
    }
}
