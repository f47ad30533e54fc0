//! # Takeoff CLI
//!
//! Command-line front end for the material takeoff engine. Collects and
//! range-checks the building inputs, runs the engine and prints the
//! totals and breakdown, or exports them as CSV/JSON.
//!
//! ```text
//! takeoff estimate --area 120 --levels 2 --region Quetzaltenango --openings --csv
//! takeoff compare --area 120 --levels 2 --region Guatemala --region Petén
//! takeoff regions
//! ```

mod output;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use takeoff_core::bounds::InputBounds;
use takeoff_core::comparison::{compare, ScenarioInput};
use takeoff_core::config::{BuildingConfig, WindowMethod, DEFAULT_REGION};
use takeoff_core::export::{self, TakeoffReport, DEFAULT_CSV_FILE_NAME};
use takeoff_core::{compute, CoefficientRegistry};

/// Default inputs of the estimate form
const DEFAULT_AREA_M2: f64 = 120.0;
const DEFAULT_LEVELS: u32 = 2;
const DEFAULT_ROOMS: u32 = 3;
const DEFAULT_BATHROOMS: u32 = 2;

#[derive(Parser, Debug)]
#[command(name = "takeoff")]
#[command(about = "Material quantity takeoff for residential buildings", long_about = None)]
struct Cli {
    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Coefficient file (TOML, or JSON by extension) replacing built-in tables
    #[arg(long, global = true, value_name = "FILE")]
    coefficients: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate materials for one building
    Estimate {
        #[command(flatten)]
        building: BuildingArgs,

        /// JSON config file; flags override its values
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the full report as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Write the breakdown as CSV
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_CSV_FILE_NAME)]
        csv: Option<PathBuf>,

        /// Write the JSON report to a file
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Skip the front-end range checks (area 20-1000 m², 1-5 levels, ...)
        #[arg(long)]
        no_bounds: bool,
    },
    /// Compare several configurations side by side
    Compare {
        /// JSON config files, one per scenario (labelled by file name)
        #[arg(long = "config", value_name = "FILE")]
        configs: Vec<PathBuf>,

        /// Regions to compare using the shared building flags
        #[arg(long = "region", value_name = "NAME")]
        regions: Vec<String>,

        #[command(flatten)]
        building: SharedBuildingArgs,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,

        /// Write the comparison as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Skip the front-end range checks
        #[arg(long)]
        no_bounds: bool,
    },
    /// List known regions, their factors and the waste table
    Regions,
    /// Print the coefficient tables as TOML (a starting point for --coefficients)
    Coefficients,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum WindowMethodArg {
    /// round(area × window factor)
    AreaFactor,
    /// One window per room and bathroom
    RoomBased,
}

impl From<WindowMethodArg> for WindowMethod {
    fn from(arg: WindowMethodArg) -> Self {
        match arg {
            WindowMethodArg::AreaFactor => WindowMethod::AreaFactor,
            WindowMethodArg::RoomBased => WindowMethod::RoomBased,
        }
    }
}

/// Building inputs shared by `estimate` and `compare`
#[derive(Args, Debug, Default)]
struct SharedBuildingArgs {
    /// Total floor area in m²
    #[arg(long)]
    area: Option<f64>,

    /// Number of levels
    #[arg(long)]
    levels: Option<u32>,

    /// Number of rooms
    #[arg(long)]
    rooms: Option<u32>,

    /// Number of bathrooms
    #[arg(long)]
    bathrooms: Option<u32>,

    /// Include door and window counts
    #[arg(long)]
    openings: bool,

    /// How windows are counted
    #[arg(long, value_enum)]
    window_method: Option<WindowMethodArg>,

    /// Windows per m² for the area-factor method
    #[arg(long)]
    window_factor: Option<f64>,

    /// Wall height per level (m)
    #[arg(long)]
    wall_height: Option<f64>,

    /// Slab thickness (m)
    #[arg(long)]
    slab_thickness: Option<f64>,

    /// Subfloor thickness (m)
    #[arg(long)]
    subfloor_thickness: Option<f64>,

    /// Footing width (m)
    #[arg(long)]
    footing_width: Option<f64>,

    /// Footing height (m)
    #[arg(long)]
    footing_height: Option<f64>,

    /// Column concrete per m² per level (m³/m²)
    #[arg(long)]
    column_factor: Option<f64>,

    /// Beam concrete per m² per level (m³/m²)
    #[arg(long)]
    beam_factor: Option<f64>,
}

/// `estimate` inputs: the shared ones plus a single region
#[derive(Args, Debug, Default)]
struct BuildingArgs {
    /// Region (department); unknown names use neutral factors
    #[arg(long)]
    region: Option<String>,

    #[command(flatten)]
    shared: SharedBuildingArgs,
}

impl SharedBuildingArgs {
    /// Apply the flags that were given on top of `base`.
    fn apply(&self, mut config: BuildingConfig) -> BuildingConfig {
        if let Some(area) = self.area {
            config.area_m2 = area;
        }
        if let Some(levels) = self.levels {
            config.levels = levels;
        }
        if let Some(rooms) = self.rooms {
            config.room_count = rooms;
        }
        if let Some(bathrooms) = self.bathrooms {
            config.bathroom_count = bathrooms;
        }
        if self.openings {
            config.include_openings = true;
        }
        if let Some(method) = self.window_method {
            config.window_method = method.into();
        }
        if let Some(factor) = self.window_factor {
            config.window_factor_per_m2 = factor;
        }

        let geometry = &mut config.geometry;
        let overrides = [
            (self.wall_height, &mut geometry.wall_height_m),
            (self.slab_thickness, &mut geometry.slab_thickness_m),
            (self.subfloor_thickness, &mut geometry.subfloor_thickness_m),
            (self.footing_width, &mut geometry.footing_width_m),
            (self.footing_height, &mut geometry.footing_height_m),
            (self.column_factor, &mut geometry.column_factor_m3_per_m2),
            (self.beam_factor, &mut geometry.beam_factor_m3_per_m2),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        config
    }

    /// Config built from flags alone, starting from the form defaults.
    fn to_config(&self, region: &str) -> BuildingConfig {
        let mut base = BuildingConfig::new(DEFAULT_AREA_M2, DEFAULT_LEVELS, region);
        if self.openings {
            base = base.with_rooms(DEFAULT_ROOMS, DEFAULT_BATHROOMS);
        }
        self.apply(base)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(path: Option<&Path>) -> Result<CoefficientRegistry> {
    match path {
        Some(path) => CoefficientRegistry::load(path)
            .with_context(|| format!("loading coefficients from {}", path.display())),
        None => Ok(CoefficientRegistry::builtin().clone()),
    }
}

fn read_config(path: &Path) -> Result<BuildingConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    BuildingConfig::from_json_str(&contents).with_context(|| format!("parsing config {}", path.display()))
}

fn check_bounds(config: &BuildingConfig, skip: bool) -> Result<()> {
    if !skip {
        InputBounds::default().check(config)?;
    }
    Ok(())
}

fn build_estimate_config(building: &BuildingArgs, config_path: Option<&Path>) -> Result<BuildingConfig> {
    let config = match config_path {
        Some(path) => building.shared.apply(read_config(path)?),
        None => building.shared.to_config(DEFAULT_REGION),
    };
    Ok(match &building.region {
        Some(region) => BuildingConfig {
            region: region.clone(),
            ..config
        },
        None => config,
    })
}

fn build_scenarios(
    configs: &[PathBuf],
    regions: &[String],
    building: &SharedBuildingArgs,
) -> Result<Vec<ScenarioInput>> {
    let mut scenarios = Vec::new();

    for path in configs {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        scenarios.push(ScenarioInput::new(label, building.apply(read_config(path)?)));
    }
    for region in regions {
        scenarios.push(ScenarioInput::new(region.clone(), building.to_config(region)));
    }

    if scenarios.len() < 2 {
        bail!("compare needs at least two scenarios (--config FILE or --region NAME)");
    }
    Ok(scenarios)
}

fn run(cli: Cli) -> Result<()> {
    let registry = load_registry(cli.coefficients.as_deref())?;

    match cli.command {
        Commands::Estimate {
            building,
            config,
            json,
            csv,
            report,
            no_bounds,
        } => {
            let config = build_estimate_config(&building, config.as_deref())?;
            tracing::debug!(area_m2 = config.area_m2, levels = config.levels, region = %config.region, "estimate requested");
            check_bounds(&config, no_bounds)?;

            let estimate = compute(&config, &registry)?;

            if let Some(path) = &csv {
                export::write_breakdown_csv(&estimate.breakdown, path)
                    .with_context(|| format!("writing {}", path.display()))?;
                eprintln!("Breakdown written to {}", path.display());
            }

            let takeoff_report = TakeoffReport::new(config, estimate);
            if let Some(path) = &report {
                export::write_report_json(&takeoff_report, path)
                    .with_context(|| format!("writing {}", path.display()))?;
                eprintln!("Report written to {}", path.display());
            }

            if json {
                println!("{}", takeoff_report.to_json()?);
            } else {
                output::print_estimate(&takeoff_report.config, &takeoff_report.estimate, &registry);
            }
        }
        Commands::Compare {
            configs,
            regions,
            building,
            json,
            csv,
            no_bounds,
        } => {
            let scenarios = build_scenarios(&configs, &regions, &building)?;
            for scenario in &scenarios {
                check_bounds(&scenario.config, no_bounds)
                    .with_context(|| format!("scenario '{}'", scenario.label))?;
            }

            let table = compare(&scenarios, &registry)?;

            if let Some(path) = &csv {
                export::write_comparison_csv(&table, path)
                    .with_context(|| format!("writing {}", path.display()))?;
                eprintln!("Comparison written to {}", path.display());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                output::print_comparison(&table);
            }
        }
        Commands::Regions => output::print_regions(&registry),
        Commands::Coefficients => print!("{}", registry.to_toml_string()?),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        if let Some(takeoff_error) = e.downcast_ref::<takeoff_core::TakeoffError>() {
            if let Ok(json) = serde_json::to_string_pretty(takeoff_error) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("takeoff").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_estimate_defaults() {
        let cli = parse(&["estimate"]);
        let Commands::Estimate { building, config, .. } = cli.command else {
            panic!("expected estimate");
        };
        let config = build_estimate_config(&building, config.as_deref()).unwrap();
        assert_eq!(config, BuildingConfig::new(120.0, 2, "Guatemala"));
    }

    #[test]
    fn test_estimate_flags() {
        let cli = parse(&[
            "estimate",
            "--area",
            "200",
            "--levels",
            "3",
            "--region",
            "Petén",
            "--openings",
            "--window-method",
            "room-based",
            "--wall-height",
            "2.7",
        ]);
        let Commands::Estimate { building, config, .. } = cli.command else {
            panic!("expected estimate");
        };
        let config = build_estimate_config(&building, config.as_deref()).unwrap();

        assert_eq!(config.area_m2, 200.0);
        assert_eq!(config.levels, 3);
        assert_eq!(config.region, "Petén");
        assert!(config.include_openings);
        assert_eq!(config.room_count, DEFAULT_ROOMS);
        assert_eq!(config.bathroom_count, DEFAULT_BATHROOMS);
        assert_eq!(config.window_method, WindowMethod::RoomBased);
        assert_eq!(config.geometry.wall_height_m, 2.7);
        assert_eq!(config.geometry.slab_thickness_m, 0.12);
    }

    #[test]
    fn test_csv_flag_default_name() {
        let cli = parse(&["estimate", "--csv"]);
        let Commands::Estimate { csv, .. } = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(csv, Some(PathBuf::from(DEFAULT_CSV_FILE_NAME)));
    }

    #[test]
    fn test_compare_regions() {
        let cli = parse(&["compare", "--region", "Guatemala", "--region", "Quetzaltenango", "--area", "150"]);
        let Commands::Compare { configs, regions, building, .. } = cli.command else {
            panic!("expected compare");
        };
        let scenarios = build_scenarios(&configs, &regions, &building).unwrap();

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[1].label, "Quetzaltenango");
        assert_eq!(scenarios[1].config.region, "Quetzaltenango");
        assert_eq!(scenarios[1].config.area_m2, 150.0);
    }

    #[test]
    fn test_compare_needs_two_scenarios() {
        let cli = parse(&["compare", "--region", "Guatemala"]);
        let Commands::Compare { configs, regions, building, .. } = cli.command else {
            panic!("expected compare");
        };
        assert!(build_scenarios(&configs, &regions, &building).is_err());
    }

    #[test]
    fn test_bounds_enforced_unless_skipped() {
        let config = BuildingConfig::new(5000.0, 2, "Guatemala");
        assert!(check_bounds(&config, false).is_err());
        assert!(check_bounds(&config, true).is_ok());
    }

    #[test]
    fn test_global_coefficients_flag() {
        let cli = parse(&["regions", "--coefficients", "custom.toml"]);
        assert_eq!(cli.coefficients, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Regions));
    }
}
