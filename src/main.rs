//! wardrobe - outfit recommendation and wardrobe analytics CLI
//!
//! # Usage
//!
//! ```bash
//! # Suggest an outfit for a rainy 12 °C office day
//! wardrobe --data wardrobe.json recommend --temp 12 --condition rain --situation business
//!
//! # Saved outfits that suit today's weather
//! wardrobe today --temp 24 --condition clear
//!
//! # Usage analytics and a reproducible weekly plan
//! wardrobe insights
//! wardrobe --seed 7 plan --start 2024-09-02
//!
//! # Inspect configuration
//! wardrobe config show
//! wardrobe config check ./wardrobe_config.toml
//! ```
//!
//! # Environment Variables
//!
//! - `WARDROBE_CONFIG`: Path to the engine config TOML
//! - `WARDROBE_DATA`: Path to the wardrobe snapshot (same as `--data`)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use wardrobe_engine::config::{self, validation, EngineConfig};
use wardrobe_engine::storage::{JsonFileStore, StaticWeather, WardrobeStore};
use wardrobe_engine::types::WeatherInfo;
use wardrobe_engine::WardrobeEngine;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wardrobe")]
#[command(about = "Outfit recommendation and wardrobe analytics")]
#[command(version)]
struct CliArgs {
    /// Wardrobe snapshot (JSON with items, outfits and logs).
    /// Defaults to `store.snapshot_path` from the config.
    #[arg(long, global = true, env = "WARDROBE_DATA", value_name = "FILE")]
    data: Option<PathBuf>,

    /// Seed for reproducible recommendations and plans
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

/// Weather given on the command line. No temperature means unknown weather.
#[derive(clap::Args, Debug)]
struct WeatherArgs {
    /// Current temperature in degrees Celsius
    #[arg(long, allow_hyphen_values = true)]
    temp: Option<f64>,

    /// Current condition (clear, cloudy, rain, snow, windy, ...)
    #[arg(long, default_value = "clear")]
    condition: String,
}

impl WeatherArgs {
    fn to_weather(&self) -> Option<WeatherInfo> {
        self.temp.map(|t| WeatherInfo::new(t, self.condition.clone()))
    }
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Compose a new outfit from the wardrobe
    Recommend {
        #[command(flatten)]
        weather: WeatherArgs,

        /// Situation or occasion (casual, business, party, ...)
        #[arg(long)]
        situation: Option<String>,
    },

    /// Rank saved outfits for today's weather
    Today {
        #[command(flatten)]
        weather: WeatherArgs,
    },

    /// Wear-history analytics
    Insights {
        /// Reference day for the rarely-worn window (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Plan the coming week and record the planned wears
    Plan {
        /// First planned day (default: today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Print the plan without writing wear logs
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect engine configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Validate a config file and report typos and suspicious values
    Check {
        path: PathBuf,
    },
}

// ============================================================================
// Output
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!(seed, "Using seeded RNG");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", config::get().to_toml()?);
        }
        ConfigAction::Check { path } => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mut warnings = validation::unknown_keys(&contents);
            let cfg = EngineConfig::from_toml(&contents, path)?;
            warnings.extend(validation::check_ranges(&cfg).1);
            for w in &warnings {
                println!("warning: {w}");
            }
            println!("{} OK ({} warnings)", path.display(), warnings.len());
        }
    }
    Ok(())
}

fn open_engine(data: Option<&Path>) -> Result<WardrobeEngine<JsonFileStore>> {
    let cfg = config::get();
    let path = data.map_or_else(|| PathBuf::from(&cfg.store.snapshot_path), Path::to_path_buf);
    let store = JsonFileStore::open(&path)
        .with_context(|| format!("Failed to open wardrobe snapshot {}", path.display()))?;
    Ok(WardrobeEngine::new(cfg.clone(), store))
}

fn init_logging(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    // `config check` inspects a file on its own terms, without the global config
    if let SubCommand::Config { action } = &args.command {
        if matches!(action, ConfigAction::Check { .. }) {
            return run_config(action);
        }
    }

    let engine_config = config::init(EngineConfig::load());
    info!(
        "Profile: {} | Location: {}",
        engine_config.profile.name,
        if engine_config.profile.city.is_empty() {
            "unset"
        } else {
            &engine_config.profile.city
        }
    );

    let mut rng = make_rng(args.seed);

    match &args.command {
        SubCommand::Config { action } => run_config(action)?,

        SubCommand::Recommend { weather, situation } => {
            let engine = open_engine(args.data.as_deref())?;
            let source = StaticWeather::new(weather.to_weather());
            let current = engine.current_weather(&source);
            match engine.recommend(current.as_ref(), situation.as_deref(), &mut rng)? {
                Some(rec) => print_json(&rec)?,
                None => warn!("Wardrobe is empty, add some items first"),
            }
        }

        SubCommand::Today { weather } => {
            let engine = open_engine(args.data.as_deref())?;
            let source = StaticWeather::new(weather.to_weather());
            let current = engine.current_weather(&source);
            let snapshot = engine.snapshot()?;
            print_json(&engine.todays_picks(&snapshot, current.as_ref()))?;
        }

        SubCommand::Insights { today: day } => {
            let engine = open_engine(args.data.as_deref())?;
            let snapshot = engine.snapshot()?;
            print_json(&engine.insights(&snapshot, day.unwrap_or_else(today)))?;
        }

        SubCommand::Plan { start, dry_run } => {
            let engine = open_engine(args.data.as_deref())?;
            let start = start.unwrap_or_else(today);
            let plan = if *dry_run {
                let outfits = engine.store().outfits()?;
                wardrobe_engine::plan_week(&outfits, start, &engine.config().planner, &mut rng)?
            } else {
                engine.plan_week(start, &mut rng)?
            };
            if plan.filled_days() < plan.days.len() {
                warn!(
                    filled = plan.filled_days(),
                    horizon = plan.days.len(),
                    "Not every day could be planned without repeating an item"
                );
            }
            print_json(&plan)?;
        }
    }

    Ok(())
}
