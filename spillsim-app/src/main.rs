use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use environment::ConditionOverrides;
use spillsim_core::{samples::read_sample_spills, sweep::parse_hours};
use spillsim_schemas::environment::LocationType;
use std::fs;
use std::path::PathBuf;

mod config;
mod environment;
mod plotting;
mod workflow;

/// Estimate the weathering, spreading and impact of an oil spill.
#[derive(Debug, Parser)]
#[command(name = "spillsim", version, about)]
struct Cli {
    /// Volume of the spill in barrels
    #[arg(long, required_unless_present_any = ["list_oil_types", "batch"])]
    volume: Option<f64>,

    /// Latitude of the spill location
    #[arg(long, allow_hyphen_values = true, required_unless_present_any = ["list_oil_types", "batch"])]
    lat: Option<f64>,

    /// Longitude of the spill location
    #[arg(long, allow_hyphen_values = true, required_unless_present_any = ["list_oil_types", "batch"])]
    lon: Option<f64>,

    /// Oil type id from the catalog (e.g. crude, diesel, heavy_fuel)
    #[arg(long, required_unless_present_any = ["list_oil_types", "batch"])]
    oil_type: Option<String>,

    /// Hours elapsed since the spill
    #[arg(long, default_value_t = 24.0)]
    hours: f64,

    /// Wind speed in km/h [default: 10]
    #[arg(long)]
    wind_speed: Option<f64>,

    /// Water temperature in °C [default: 15]
    #[arg(long, allow_hyphen_values = true)]
    water_temp: Option<f64>,

    /// Significant wave height in metres [default: 0.5]
    #[arg(long)]
    wave_height: Option<f64>,

    /// Derive wind, waves, water temperature and site type from the location
    /// and the current month. Any condition flag given explicitly still wins.
    #[arg(long)]
    site_conditions: bool,

    /// open_ocean, coastal, estuary, reef, wetland, river or port
    #[arg(long)]
    location_type: Option<LocationType>,

    /// Environmental sensitivity multiplier
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Oil catalog file or directory of catalog files
    #[arg(long, default_value = "data/oil_types.yaml")]
    catalog: PathBuf,

    #[arg(long, default_value = "results")]
    output_dir: PathBuf,

    /// CSV of sample spills to run and compare; the first row is the baseline
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Seed for the footprint outline and cleanup variation
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated hours for the time sweep; empty to skip it
    #[arg(long, default_value = "0,6,12,24,48,72")]
    sweep_hours: String,

    #[arg(long)]
    no_plots: bool,

    /// Print the oil types in the catalog and exit
    #[arg(long)]
    list_oil_types: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConditionOverrides {
        ConditionOverrides {
            wind_speed_kmh: self.wind_speed,
            water_temp_c: self.water_temp,
            wave_height_m: self.wave_height,
            location_type: self.location_type,
            environmental_sensitivity: self.sensitivity,
        }
    }
}

fn print_validation_errors(errors: &[String]) -> anyhow::Error {
    println!("Input validation errors:");
    for error in errors {
        println!("- {}", error);
    }
    anyhow::anyhow!("{} input validation error(s)", errors.len())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    println!("--- Spill Impact Estimator ---");

    let catalog = config::OilCatalog::load(&cli.catalog)
        .with_context(|| format!("Failed to load oil catalog {:?}", cli.catalog))?;

    if cli.list_oil_types {
        println!("\nAvailable oil types:");
        for (id, oil) in &catalog.oil_types {
            println!(
                "  - {:<14} {:<24} density {:.3}, evaporation rate {:.2}",
                id, oil.name, oil.density, oil.evaporation_rate
            );
        }
        return Ok(());
    }

    let settings = workflow::RunSettings {
        time_hours: cli.hours,
        use_site_lookup: cli.site_conditions,
        month: chrono::Utc::now().month(),
        overrides: cli.overrides(),
        seed: cli.seed,
        sweep_hours: parse_hours(&cli.sweep_hours)?,
        plots: !cli.no_plots,
    };
    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    if let Some(batch) = &cli.batch {
        let samples = read_sample_spills(batch)
            .with_context(|| format!("Failed to read sample spills {:?}", batch))?;
        let (scenarios, errors) =
            workflow::scenarios_from_samples(&samples, &settings, &catalog, &mut rng);
        if !errors.is_empty() {
            let error = print_validation_errors(&errors);
            if scenarios.is_empty() {
                return Err(error);
            }
            println!("Skipping {} invalid row(s).", samples.len() - scenarios.len());
        }

        let run_dir = workflow::run_directory(&cli.output_dir, "batch");
        fs::create_dir_all(&run_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", run_dir))?;
        workflow::run_batch(&scenarios, &run_dir, settings.plots)?;

        println!("\nBatch complete. Results are in '{}'", run_dir.display());
        return Ok(());
    }

    // clap enforces these unless --list-oil-types or --batch was given
    let (Some(volume), Some(lat), Some(lon), Some(oil_type)) =
        (cli.volume, cli.lat, cli.lon, cli.oil_type.as_deref())
    else {
        anyhow::bail!("--volume, --lat, --lon and --oil-type are required");
    };

    let scenario = workflow::build_scenario(
        volume,
        lat,
        lon,
        cli.hours,
        oil_type,
        &settings.overrides,
        &settings,
        &catalog,
        &mut rng,
    )
    .map_err(|errors| print_validation_errors(&errors))?;

    if cli.site_conditions {
        println!(
            "Site conditions for ({}, {}): wind {:.1} km/h, water {:.1} °C, waves {:.2} m, {}",
            lat,
            lon,
            scenario.environment.wind_speed_kmh,
            scenario.environment.water_temp_c,
            scenario.environment.wave_height_m,
            scenario.location_type
        );
    }

    let output_dir = workflow::run_directory(&cli.output_dir, oil_type);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    workflow::run_scenario(&scenario, &output_dir)?;

    println!("\nEstimation complete. Results are in '{}'", output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_coordinates_and_defaults() {
        let cli = Cli::try_parse_from([
            "spillsim", "--volume", "500", "--lat", "-33.9", "--lon", "-118.4", "--oil-type", "diesel",
        ])
        .unwrap();
        assert_eq!(cli.lat, Some(-33.9));
        assert_eq!(cli.lon, Some(-118.4));
        assert_eq!(cli.hours, 24.0);
        assert_eq!(cli.wind_speed, None);
        assert_eq!(cli.sweep_hours, "0,6,12,24,48,72");
        assert!(!cli.site_conditions);
    }

    #[test]
    fn list_mode_needs_no_scenario() {
        let cli = Cli::try_parse_from(["spillsim", "--list-oil-types"]).unwrap();
        assert!(cli.list_oil_types);
        assert!(Cli::try_parse_from(["spillsim", "--volume", "10"]).is_err());
    }

    #[test]
    fn location_type_flag_parses() {
        let cli = Cli::try_parse_from([
            "spillsim", "--volume", "1", "--lat", "0", "--lon", "0", "--oil-type", "crude",
            "--location-type", "reef",
        ])
        .unwrap();
        assert_eq!(cli.location_type, Some(LocationType::Reef));
    }

    #[test]
    fn explicit_conditions_survive_site_lookup() {
        let cli = Cli::try_parse_from([
            "spillsim", "--volume", "1", "--lat", "10", "--lon", "-40", "--oil-type", "crude",
            "--site-conditions", "--wind-speed", "3", "--water-temp", "-1.5",
        ])
        .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let site = environment::resolve_site_profile(10.0, -40.0, 7, cli.site_conditions, &cli.overrides(), &mut rng);
        assert_eq!(site.conditions.wind_speed_kmh, 3.0);
        assert_eq!(site.conditions.water_temp_c, -1.5);
        assert!(site.conditions.wave_height_m >= 0.5);
    }

    #[test]
    fn batch_mode_needs_no_single_scenario() {
        let cli = Cli::try_parse_from(["spillsim", "--batch", "data/sample_spills.csv"]).unwrap();
        assert_eq!(cli.batch, Some(PathBuf::from("data/sample_spills.csv")));
        assert_eq!(cli.volume, None);
    }
}
