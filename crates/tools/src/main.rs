use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::math::{GeoCoordinate, Vec3};
use globe::picking::Ray;
use globe::{GlobeResolver, RotationState, compensate};
use territory::{Completion, TerritoryStore};
use tokio::task::JoinHandle;
use tools::config::AppConfig;
use tools::dataset::{DatasetSource, spawn_load};
use tools::report::{
    ClickReport, LocateReport, OutputFormat, SpinReport, TerritoryReport, checked_coordinate,
    render,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve clicks on the DeepWave globe to geography")]
struct Args {
    /// JSON config file (default: $DEEPWAVE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Territory dataset: GeoJSON file path or http(s) URL
    #[arg(long, global = true)]
    territories: Option<String>,

    /// Globe radius in scene units
    #[arg(long, global = true)]
    radius: Option<f64>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a world-space intersection point
    Resolve {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, allow_hyphen_values = true)]
        z: f64,
        /// Globe rotation about +y at click time (radians)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotation: f64,
    },

    /// Cast a pointer ray at the globe and resolve the hit
    Pick {
        /// Ray origin: x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: Vec3,
        /// Ray direction: x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        dir: Vec3,
        /// Globe rotation about +y at click time (radians)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotation: f64,
    },

    /// Classify a latitude/longitude against the territory dataset
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// Run the auto-rotation for a while and print the resulting snapshot
    Spin {
        #[arg(long)]
        seconds: f64,
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Rotation rate (radians per second); default from config
        #[arg(long, allow_hyphen_values = true)]
        rate: Option<f64>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Args::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn real_main(args: Args) -> Result<(), String> {
    let mut config = AppConfig::resolve(args.config.as_deref(), |k| std::env::var(k).ok())
        .map_err(|e| e.to_string())?;
    if let Some(t) = args.territories {
        config.territories = Some(t);
    }
    if let Some(r) = args.radius {
        config.radius = r;
    }
    debug!(?config, "resolved configuration");

    let resolver = GlobeResolver::new(config.radius).map_err(|e| e.to_string())?;

    let output = match args.command {
        Command::Resolve { x, y, z, rotation } => {
            let (store, pending) = start_territories(&config);
            let world = Vec3::new(x, y, z);
            let rotation = RotationState::new(rotation);
            let coord = resolver
                .resolve_click(world, rotation)
                .ok_or_else(|| format!("cannot resolve degenerate point ({x}, {y}, {z})"))?;
            let territory = finish_territories(&store, pending, coord).await;
            let report = ClickReport::from_point(
                world,
                compensate(world, rotation),
                rotation,
                coord,
                territory,
            );
            render(&report, args.format)?
        }
        Command::Pick {
            origin,
            dir,
            rotation,
        } => {
            let (store, pending) = start_territories(&config);
            let rotation = RotationState::new(rotation);
            let click = resolver
                .resolve_ray(Ray::new(origin, dir), rotation)
                .ok_or_else(|| "ray does not hit the globe".to_string())?;
            let territory = finish_territories(&store, pending, click.coord).await;
            render(&ClickReport::from_ray(&click, rotation, territory), args.format)?
        }
        Command::Locate { lat, lng } => {
            let coord = checked_coordinate(lat, lng)?;
            let (store, pending) = start_territories(&config);
            let territory = finish_territories(&store, pending, coord).await;
            let report = LocateReport {
                coord: coord.into(),
                territory,
            };
            render(&report, args.format)?
        }
        Command::Spin { seconds, fps, rate } => {
            let rate = rate.unwrap_or(config.spin_rate_rad_per_s);
            render(&SpinReport::simulate(seconds, fps, rate)?, args.format)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Kick off the dataset load, if one is configured, without waiting for it.
fn start_territories(config: &AppConfig) -> (TerritoryStore, Option<JoinHandle<Completion>>) {
    let store = TerritoryStore::new();
    let pending = match &config.territories {
        Some(source) => spawn_load(
            &store,
            reqwest::Client::new(),
            DatasetSource::parse(source),
        ),
        None => {
            info!("no territory dataset configured; classification unavailable");
            None
        }
    };
    (store, pending)
}

/// Wait for an in-flight load, then classify against whatever the store holds.
async fn finish_territories(
    store: &TerritoryStore,
    pending: Option<JoinHandle<Completion>>,
    coord: GeoCoordinate,
) -> TerritoryReport {
    if let Some(handle) = pending
        && let Err(e) = handle.await
    {
        warn!(error = %e, "territory load task failed");
    }
    TerritoryReport::classify(store, coord)
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got {s:?}"));
    }
    let mut v = [0.0f64; 3];
    for (slot, part) in v.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("invalid component {part:?}: {e}"))?;
    }
    Ok(Vec3::new(v[0], v[1], v[2]))
}
