use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flock_core::{
    BruteForceQuery, FlockingEngine, GridQuery, NeighborQuery, SimulationParams,
    DEFAULT_CELL_SIZE,
};
use flock_shared::{BoidSnapshot, FlockSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Headless boid flocking simulation", long_about = None)]
pub struct Args {
    /// Number of boids
    #[arg(short = 'n', long, default_value_t = 500)]
    pub count: usize,

    /// Domain width
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Domain height
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    pub ticks: u64,

    /// Seed for the initial flock; a fresh random flock when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Neighbor lookup strategy
    #[arg(long, value_enum, default_value_t = Strategy::Grid)]
    pub strategy: Strategy,

    /// Pointer position boids steer away from, as X,Y
    #[arg(short, long, value_parser = parse_point)]
    pub pointer: Option<(f32, f32)>,

    /// JSON file with flocking settings (missing fields keep their defaults)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Write the final report, including every boid, to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Uniform spatial grid
    Grid,
    /// All-pairs scan
    BruteForce,
}

/// Outcome of a headless run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub strategy: Strategy,
    pub boid_count: usize,
    pub ticks: u64,
    pub width: f32,
    pub height: f32,
    pub settings: FlockSettings,
    pub mean_speed: f32,
    #[serde(skip)]
    pub elapsed: Duration,
    pub snapshots: Vec<BoidSnapshot>,
}

impl RunReport {
    pub fn ticks_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        } else {
            0.0
        }
    }
}

/// Runs the simulation described by `args` and writes the report if asked to.
pub fn run(args: &Args) -> Result<RunReport> {
    if !(args.width > 0.0 && args.height > 0.0) {
        anyhow::bail!(
            "Domain must have a positive width and height, got {}x{}",
            args.width,
            args.height
        );
    }

    let settings = load_settings(args.settings.as_deref())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = match args.strategy {
        Strategy::Grid => simulate(
            FlockingEngine::with_query(GridQuery::new(args.width, args.height, DEFAULT_CELL_SIZE)),
            args,
            settings,
            &mut rng,
        ),
        Strategy::BruteForce => simulate(
            FlockingEngine::with_query(BruteForceQuery::new()),
            args,
            settings,
            &mut rng,
        ),
    };

    log::info!(
        "Simulated {} ticks of {} boids in {:.2?} ({:.1} ticks/s)",
        report.ticks,
        report.boid_count,
        report.elapsed,
        report.ticks_per_second()
    );

    if let Some(path) = &args.output {
        write_report(path, &report)?;
        log::info!("Report written to {}", path.display());
    }

    Ok(report)
}

fn simulate<Q: NeighborQuery>(
    mut engine: FlockingEngine<Q>,
    args: &Args,
    settings: FlockSettings,
    rng: &mut StdRng,
) -> RunReport {
    engine.set_params(SimulationParams::from(settings));
    engine.initialize(args.count, args.width, args.height, rng);
    if let Some((x, y)) = args.pointer {
        engine.set_pointer_position(x, y);
    }

    let started = Instant::now();
    let mut last_progress = started;

    for frame in 1..=args.ticks {
        engine.tick();

        if last_progress.elapsed() >= PROGRESS_INTERVAL {
            log::info!("Frame {}/{}", frame, args.ticks);
            last_progress = Instant::now();
        }
    }

    let elapsed = started.elapsed();
    let snapshots = engine.snapshots();

    RunReport {
        strategy: args.strategy,
        boid_count: engine.boid_count(),
        ticks: args.ticks,
        width: engine.width(),
        height: engine.height(),
        settings,
        mean_speed: mean_speed(&snapshots),
        elapsed,
        snapshots,
    }
}

pub fn load_settings(path: Option<&Path>) -> Result<FlockSettings> {
    let Some(path) = path else {
        return Ok(FlockSettings::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = FlockSettings::from_json(&json)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

    log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush report to {}", path.display()))
}

fn mean_speed(snapshots: &[BoidSnapshot]) -> f32 {
    if snapshots.is_empty() {
        return 0.0;
    }
    let total: f32 = snapshots
        .iter()
        .map(|s| (s.vx * s.vx + s.vy * s.vy).sqrt())
        .sum();
    total / snapshots.len() as f32
}

fn parse_point(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", value))?;
    let x = x
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("invalid X '{}': {}", x, e))?;
    let y = y
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("invalid Y '{}': {}", y, e))?;
    Ok((x, y))
}
