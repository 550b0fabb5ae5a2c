use anyhow::{Context, Result};
use clap::Parser;
use flock_runner::{run, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Flock runner starting...");
    log::info!("Boids: {}", args.count);
    log::info!("Domain: {}x{}", args.width, args.height);
    log::info!("Strategy: {:?}", args.strategy);

    let report = run(&args).context("Simulation failed")?;

    log::info!(
        "Mean speed after {} ticks: {:.3}",
        report.ticks,
        report.mean_speed
    );

    Ok(())
}
