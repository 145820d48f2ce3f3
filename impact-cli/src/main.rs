use clap::Parser;
use impact_effects_core::core_types::DEFAULT_WATER_DEPTH_M;
use impact_effects_core::{
    DateWindow, ImpactEffectsPipeline, ImpactError, ImpactorParameters, NeoCatalog, NeoFeed,
    PipelineConfig, ReportView, SoilType, TargetType, CUSTOM_INPUT_NAME,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

/// Asteroid impact effects calculator
#[derive(Parser, Debug)]
#[command(name = "impact-cli")]
#[command(about = "Estimate the effects of an asteroid impact", long_about = None)]
struct Args {
    /// Projectile diameter in meters
    #[arg(short, long, default_value_t = 100.0)]
    diameter: f64,

    /// Impact velocity in km/s
    #[arg(short, long, default_value_t = 17.0)]
    velocity: f64,

    /// Impact angle from horizontal in degrees (90 = vertical)
    #[arg(short, long, default_value_t = 45.0)]
    angle: f64,

    /// Projectile density in kg/m³
    #[arg(long, default_value_t = 3000.0)]
    density: f64,

    /// Target surface (land, water)
    #[arg(short, long, default_value = "land")]
    target: TargetType,

    /// Burst altitude in km (0 = surface impact)
    #[arg(long, default_value_t = 0.0)]
    altitude: f64,

    /// Ocean depth in meters (water targets only, default 1000)
    #[arg(long)]
    water_depth: Option<f64>,

    /// Site geology (rock, hard_soil, soft_soil, sediment)
    #[arg(long, default_value = "rock")]
    soil: String,

    /// Impact latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Impact longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// JSON file overriding model constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Saved `NeoWs` feed document to take the impactor from
    #[arg(short, long)]
    feed: Option<PathBuf>,

    /// Name of the catalog object to evaluate (requires --feed)
    #[arg(long, requires = "feed")]
    asteroid: Option<String>,

    /// First close-approach date (YYYY-MM-DD, defaults to the feed's first day)
    #[arg(long, requires = "feed")]
    start_date: Option<String>,

    /// Last close-approach date (YYYY-MM-DD, defaults to the feed's last day)
    #[arg(long, requires = "feed")]
    end_date: Option<String>,

    /// List the objects in the feed instead of evaluating one
    #[arg(short, long, requires = "feed")]
    list: bool,
}

/// Failures outside the core library
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("feed has no dates and no --start-date/--end-date were given")]
    EmptyFeed,
    #[error(transparent)]
    Impact(#[from] ImpactError),
    #[error("cannot render report: {0}")]
    Render(#[from] serde_json::Error),
}

impl CliError {
    /// HTTP-style status for the failure
    fn status(&self) -> u16 {
        match self {
            CliError::Impact(err) => err.code().status(),
            CliError::Io { .. } | CliError::EmptyFeed => 400,
            CliError::Render(_) => 500,
        }
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Args {
    /// Parameters from the raw numeric flags
    fn parameters(&self) -> ImpactorParameters {
        let params = ImpactorParameters::new(self.diameter, self.density, self.velocity * 1000.0)
            .with_angle(self.angle)
            .with_burst_altitude(self.altitude)
            .with_soil(SoilType::from_label(&self.soil))
            .with_site(self.lat, self.lon);

        match self.target {
            TargetType::Land => params.on_land(),
            TargetType::Water => {
                params.on_water(self.water_depth.unwrap_or(DEFAULT_WATER_DEPTH_M))
            }
        }
    }

    fn window(&self, feed: &NeoFeed) -> Result<DateWindow, CliError> {
        let span = feed.span();
        let start = self
            .start_date
            .clone()
            .or_else(|| span.as_ref().map(|w| w.start_date.clone()))
            .ok_or(CliError::EmptyFeed)?;
        let end = self
            .end_date
            .clone()
            .or_else(|| span.as_ref().map(|w| w.end_date.clone()))
            .ok_or(CliError::EmptyFeed)?;
        Ok(DateWindow::new(&start, &end)?)
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading model constants from {}", path.display());
            PipelineConfig::from_json_str(&read_file(path)?)?
        }
        None => PipelineConfig::default(),
    };
    let pipeline = ImpactEffectsPipeline::new(config);

    let report = match &args.feed {
        Some(path) => {
            let feed = NeoFeed::from_json_str(&read_file(path)?)?;
            let window = args.window(&feed)?;

            if args.list || args.asteroid.is_none() {
                let records = feed.records(&window)?;
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }

            let name = args.asteroid.as_deref().unwrap_or_default();
            pipeline.run_from_catalog(&feed, name, &window, args.parameters())?
        }
        None => pipeline.run(CUSTOM_INPUT_NAME, &args.parameters())?,
    };

    println!("{}", ReportView::from(&report).to_json_pretty()?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error ({}): {}", err.status(), err);
            ExitCode::FAILURE
        }
    }
}
