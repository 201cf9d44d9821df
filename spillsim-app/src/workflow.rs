use crate::config::OilCatalog;
use crate::environment::{self, ConditionOverrides};
use crate::plotting;
use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use serde_json::{json, Map};
use spillsim_core::{
    export,
    geo,
    impact::ImpactEstimator,
    logger::TimeSeriesLogger,
    spreading::SpreadingConfig,
    sweep::{SweepPoint, TimeSweep},
    DispersalModelBuilder,
};
use spillsim_schemas::{
    dispersal::DispersalResult,
    file_formats::SampleSpill,
    environment::{EnvironmentalConditions, LocationType},
    impact::{EconomicImpact, ImpactSummary, WildlifeImpact},
    oil::OilProperties,
    spill::SpillParameters,
};
use std::path::{Path, PathBuf};

/// Everything needed to estimate one spill.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub volume_barrels: f64,
    pub time_hours: f64,
    pub lat: f64,
    pub lon: f64,
    pub oil_type_id: String,
    pub oil: OilProperties,
    pub environment: EnvironmentalConditions,
    pub location_type: LocationType,
    pub environmental_sensitivity: f64,
    pub seed: Option<u64>,
    pub sweep_hours: Vec<f64>,
    pub plots: bool,
}

/// Contents of `impact_summary.json` and `summary.csv`.
#[derive(Debug, Clone, Serialize)]
pub struct ImpactReport {
    pub oil_type_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_hours: f64,
    pub environment: EnvironmentalConditions,
    #[serde(flatten)]
    pub summary: ImpactSummary,
    pub wildlife_impact: WildlifeImpact,
    pub economic_impact: EconomicImpact,
}

/// Run-wide settings shared by every scenario of an invocation.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub time_hours: f64,
    pub use_site_lookup: bool,
    /// Month (1-12) used by the site lookup.
    pub month: u32,
    pub overrides: ConditionOverrides,
    pub seed: Option<u64>,
    pub sweep_hours: Vec<f64>,
    pub plots: bool,
}

/// One line of `batch_summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub name: String,
    pub oil_type_id: String,
    pub output_dir: PathBuf,
    #[serde(flatten)]
    pub summary: ImpactSummary,
}

#[derive(Debug)]
pub struct RunOutput {
    pub result: DispersalResult,
    pub report: ImpactReport,
    pub sweep: Vec<SweepPoint>,
}

/// Checks CLI-level inputs and returns every problem found, not just the
/// first.
pub fn validate_inputs(
    volume_barrels: f64,
    lat: f64,
    lon: f64,
    time_hours: f64,
    environment: &EnvironmentalConditions,
    environmental_sensitivity: f64,
    sweep_hours: &[f64],
) -> Vec<String> {
    let mut errors = Vec::new();

    if !(volume_barrels.is_finite() && volume_barrels > 0.0) {
        errors.push("Volume must be a positive number".to_string());
    }
    if geo::validate_coordinates(lat, lon).is_err() {
        errors.push(format!("Invalid coordinates: {}, {}", lat, lon));
    }
    if !(time_hours.is_finite() && time_hours >= 0.0) {
        errors.push(format!("Elapsed time must be zero or more hours, got {}", time_hours));
    }
    if !(environment.wind_speed_kmh.is_finite() && environment.wind_speed_kmh >= 0.0) {
        errors.push(format!("Wind speed must be zero or more, got {}", environment.wind_speed_kmh));
    }
    if !(environment.wave_height_m.is_finite() && environment.wave_height_m >= 0.0) {
        errors.push(format!("Wave height must be zero or more, got {}", environment.wave_height_m));
    }
    if !environment.water_temp_c.is_finite() {
        errors.push("Water temperature must be a finite number".to_string());
    }
    if !(environmental_sensitivity.is_finite() && environmental_sensitivity > 0.0) {
        errors.push(format!(
            "Environmental sensitivity must be positive, got {}",
            environmental_sensitivity
        ));
    }
    if let Some(bad) = sweep_hours.iter().find(|h| !(h.is_finite() && **h >= 0.0)) {
        errors.push(format!("Sweep hours must be zero or more, got {}", bad));
    }

    errors
}

/// Resolves site conditions and the oil for one spill and validates the
/// result. Every problem is reported, not just the first.
#[allow(clippy::too_many_arguments)]
pub fn build_scenario<R: Rng>(
    volume_barrels: f64,
    lat: f64,
    lon: f64,
    time_hours: f64,
    oil_type_id: &str,
    overrides: &ConditionOverrides,
    settings: &RunSettings,
    catalog: &OilCatalog,
    rng: &mut R,
) -> Result<Scenario, Vec<String>> {
    let site = environment::resolve_site_profile(
        lat,
        lon,
        settings.month,
        settings.use_site_lookup,
        overrides,
        rng,
    );

    let mut errors = validate_inputs(
        volume_barrels,
        lat,
        lon,
        time_hours,
        &site.conditions,
        site.environmental_sensitivity,
        &settings.sweep_hours,
    );
    let oil = match catalog.get(oil_type_id) {
        Ok(oil) => Some(oil.clone()),
        Err(e) => {
            errors.push(e.to_string());
            None
        }
    };

    match oil {
        Some(oil) if errors.is_empty() => Ok(Scenario {
            volume_barrels,
            time_hours,
            lat,
            lon,
            oil_type_id: oil_type_id.to_string(),
            oil,
            environment: site.conditions,
            location_type: site.location_type,
            environmental_sensitivity: site.environmental_sensitivity,
            seed: settings.seed,
            sweep_hours: settings.sweep_hours.clone(),
            plots: settings.plots,
        }),
        _ => Err(errors),
    }
}

/// Turns sample-spill rows into scenarios. Values missing from a row come
/// from `settings`. Rows that fail validation are returned as messages.
pub fn scenarios_from_samples<R: Rng>(
    samples: &[SampleSpill],
    settings: &RunSettings,
    catalog: &OilCatalog,
    rng: &mut R,
) -> (Vec<(String, Scenario)>, Vec<String>) {
    let mut scenarios = Vec::new();
    let mut errors = Vec::new();

    for (index, sample) in samples.iter().enumerate() {
        let row = ConditionOverrides {
            wind_speed_kmh: sample.wind_speed_kmh,
            water_temp_c: sample.water_temp_c,
            wave_height_m: sample.wave_height_m,
            location_type: sample.location_type,
            environmental_sensitivity: sample.environmental_sensitivity,
        };
        let overrides = row.or(settings.overrides);

        match build_scenario(
            sample.volume_barrels,
            sample.latitude,
            sample.longitude,
            sample.time_hours.unwrap_or(settings.time_hours),
            &sample.oil_type,
            &overrides,
            settings,
            catalog,
            rng,
        ) {
            Ok(scenario) => scenarios.push((sample.name.clone(), scenario)),
            Err(row_errors) => {
                for error in row_errors {
                    errors.push(format!("Row {} ({}): {}", index + 1, sample.name, error));
                }
            }
        }
    }

    (scenarios, errors)
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// Runs every scenario into its own sub-directory of `run_dir`, then writes
/// `batch_summary.json` and, when plotting, the comparison chart. The first
/// scenario is the baseline.
pub fn run_batch(scenarios: &[(String, Scenario)], run_dir: &Path, plots: bool) -> Result<Vec<BatchEntry>> {
    println!("\n--- [Workflow] Running Batch of {} Scenarios ---", scenarios.len());

    let mut entries = Vec::with_capacity(scenarios.len());
    for (index, (name, scenario)) in scenarios.iter().enumerate() {
        let output_dir = run_dir.join(format!("{:02}_{}", index + 1, slug(name)));
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

        println!("\nScenario: {}", name);
        let output = run_scenario(scenario, &output_dir)?;
        entries.push(BatchEntry {
            name: name.clone(),
            oil_type_id: scenario.oil_type_id.clone(),
            output_dir,
            summary: output.report.summary,
        });
    }

    export::write_json(run_dir.join("batch_summary.json"), &entries)?;

    if plots {
        let summaries: Vec<(String, ImpactSummary)> = entries
            .iter()
            .map(|e| (e.name.clone(), e.summary.clone()))
            .collect();
        plotting::plot_scenario_comparison(run_dir, &summaries)?;
    }

    print_batch_report(&entries);
    Ok(entries)
}

fn print_batch_report(entries: &[BatchEntry]) {
    println!("\n\n--- [Batch Comparison] ---");
    println!("========================================");
    println!(
        "  {:<24} | {:>12} | {:>12} | {:>10}",
        "Scenario", "Area (km²)", "CO₂ (t)", "Cleanup (d)"
    );
    for entry in entries {
        println!(
            "  {:<24} | {:>12.2} | {:>12.2} | {:>10.1}",
            entry.name,
            entry.summary.surface_area_km2,
            entry.summary.co2_emissions_tons,
            entry.summary.cleanup_time_days
        );
    }
    println!("========================================");
}

/// `<output_root>/<oil>_<UTC timestamp>`
pub fn run_directory(output_root: &Path, oil_type_id: &str) -> PathBuf {
    output_root.join(format!(
        "{}_{}",
        oil_type_id,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ))
}

fn rng_for(seed: Option<u64>, stream: u64) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(stream)),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Runs the dispersal model, the impact estimate and the optional time sweep
/// for `scenario`, writing every artefact into `output_dir`.
pub fn run_scenario(scenario: &Scenario, output_dir: &Path) -> Result<RunOutput> {
    println!("\n--- [Workflow] Estimating Dispersal ---");
    println!(
        "Simulating oil spill of {} barrels of {} oil at ({}, {}) after {} hours...",
        scenario.volume_barrels, scenario.oil_type_id, scenario.lat, scenario.lon, scenario.time_hours
    );

    let mut builder = DispersalModelBuilder::new()
        .with_spill(SpillParameters::new(scenario.volume_barrels, scenario.time_hours))
        .with_oil(scenario.oil.clone())
        .with_environment(scenario.environment);
    if let Some(seed) = scenario.seed {
        builder = builder.with_seed(seed);
    }
    let mut model = builder.build()?;
    let result = model.calculate_affected_area(scenario.lat, scenario.lon).clone();

    println!("\n--- [Workflow] Estimating Impacts ---");
    let estimator = ImpactEstimator::for_model(
        &mut model,
        scenario.lat,
        scenario.lon,
        scenario.environmental_sensitivity,
    );
    let mut impact_rng = rng_for(scenario.seed, 1);
    let report = ImpactReport {
        oil_type_id: scenario.oil_type_id.clone(),
        latitude: scenario.lat,
        longitude: scenario.lon,
        time_hours: scenario.time_hours,
        environment: scenario.environment,
        summary: estimator.summary(&mut impact_rng),
        wildlife_impact: estimator.wildlife_impact(scenario.location_type),
        economic_impact: estimator.economic_impact(scenario.location_type),
    };

    let sweep_log = output_dir.join("time_sweep.csv");
    let sweep = if scenario.sweep_hours.is_empty() {
        Vec::new()
    } else {
        println!("\n--- [Workflow] Running Time Sweep ---");
        let mut logger = TimeSeriesLogger::new(&sweep_log)
            .with_context(|| format!("Failed to create time sweep log: {:?}", sweep_log))?;
        let time_sweep = TimeSweep {
            volume_barrels: scenario.volume_barrels,
            oil: scenario.oil.clone(),
            environment: scenario.environment,
            spreading: SpreadingConfig::default(),
            origin: (scenario.lat, scenario.lon),
            seed: scenario.seed,
        };
        time_sweep.run(&scenario.sweep_hours, Some(&mut logger))?
    };

    println!("\n--- [Workflow] Writing Results ---");
    write_outputs(output_dir, &result, &report)?;

    if scenario.plots {
        let log = (!sweep.is_empty()).then_some(sweep_log.as_path());
        plotting::generate_all_plots(output_dir, &result, log, report.summary.cleanup_time_days)?;
    }

    print_summary_report(&report, &result, &sweep);

    Ok(RunOutput {
        result,
        report,
        sweep,
    })
}

fn write_outputs(output_dir: &Path, result: &DispersalResult, report: &ImpactReport) -> Result<()> {
    export::write_json(output_dir.join("dispersal.json"), result)?;
    export::write_json(output_dir.join("impact_summary.json"), report)?;
    export::write_parameter_csv(output_dir.join("summary.csv"), report)?;

    let mut properties = Map::new();
    properties.insert("oil_type".to_string(), json!(report.oil_type_id));
    properties.insert("volume_barrels".to_string(), json!(report.summary.volume_barrels));
    properties.insert("time_hours".to_string(), json!(report.time_hours));
    let feature = export::footprint_geojson(result, properties);
    export::write_json(output_dir.join("footprint.geojson"), &feature)?;

    println!("Results written to '{}'.", output_dir.display());
    Ok(())
}

fn print_summary_report(report: &ImpactReport, result: &DispersalResult, sweep: &[SweepPoint]) {
    let summary = &report.summary;
    let wildlife = &report.wildlife_impact;
    let economic = &report.economic_impact;

    println!("\n\n--- [Impact Estimation Results] ---");
    println!("========================================");
    println!("Spill: {} ({})", summary.oil_type, report.oil_type_id);
    println!(
        "  - Volume:                   {:.1} bbl ({:.1} m³)",
        summary.volume_barrels, summary.volume_m3
    );
    println!("  - Location:                 ({:.4}, {:.4})", report.latitude, report.longitude);
    println!(
        "  - Conditions:               wind {:.1} km/h, water {:.1} °C, waves {:.2} m",
        report.environment.wind_speed_kmh, report.environment.water_temp_c, report.environment.wave_height_m
    );
    println!("----------------------------------------");

    println!("\nDispersal after {} hours:", report.time_hours);
    println!("  - Affected surface area:    {:.2} km²", result.area_km2);
    println!("  - Slick thickness:          {:.4} mm", result.thickness_mm);
    println!("  - Evaporated:               {:.1}%", result.evaporated_fraction * 100.0);
    println!("  - Dissolved:                {:.1}%", result.dissolved_fraction * 100.0);
    println!("  - On the surface:           {:.1}%", result.surface_fraction * 100.0);

    println!("\nImpact ({}):", wildlife.location_type);
    println!("  - CO₂ equivalent emissions: {:.2} t", summary.co2_emissions_tons);
    println!("  - Estimated cleanup time:   {:.1} days", summary.cleanup_time_days);
    println!("  - Birds affected:           {}", wildlife.birds_affected);
    println!("  - Marine mammals affected:  {}", wildlife.marine_mammals_affected);
    println!("  - Fish affected:            {}", wildlife.fish_affected);
    println!("  - Cleanup cost:             ${} USD", economic.cleanup_cost_usd);
    println!("  --------------------------------------");
    println!("  - Total economic impact:    ${} USD", economic.total_economic_impact_usd);

    if !sweep.is_empty() {
        println!("\nTime sweep:");
        for point in sweep {
            println!(
                "  - {:>6.1} h | area {:>10.3} km² | evaporated {:>5.1}% | thickness {:.4} mm",
                point.time_hours,
                point.result.area_km2,
                point.result.evaporated_fraction * 100.0,
                point.result.thickness_mm
            );
        }
    }

    println!("========================================");
}
