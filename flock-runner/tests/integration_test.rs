use anyhow::Result;
use clap::Parser;
use flock_runner::{load_settings, run, Args, Strategy};
use serde_json::Value;
use std::path::PathBuf;

/// Unique scratch path under the system temp directory
fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("flock-runner-{}-{}", std::process::id(), name))
}

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["flock-runner", "--count", "60", "--ticks", "20", "--seed", "17"];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

fn args_with(count: &str, ticks: &str, extra: &[&str]) -> Args {
    let mut argv = vec!["flock-runner", "--count", count, "--ticks", ticks, "--seed", "17"];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

#[test]
fn test_seeded_runs_are_reproducible() -> Result<()> {
    let first = run(&args(&[]))?;
    let second = run(&args(&[]))?;

    assert_eq!(first.boid_count, 60);
    assert_eq!(first.ticks, 20);
    assert_eq!(first.snapshots, second.snapshots);
    Ok(())
}

#[test]
fn test_strategies_agree_on_trajectories() -> Result<()> {
    let domain = ["--width", "200", "--height", "150"];
    let grid = run(&args_with(
        "80",
        "3",
        &[&domain[..], &["--strategy", "grid"][..]].concat(),
    ))?;
    let brute = run(&args_with(
        "80",
        "3",
        &[&domain[..], &["--strategy", "brute-force"][..]].concat(),
    ))?;

    assert_eq!(grid.strategy, Strategy::Grid);
    assert_eq!(brute.strategy, Strategy::BruteForce);
    assert_eq!(grid.snapshots.len(), brute.snapshots.len());

    // Neighbor sums differ only in summation order; a boid crossing an edge
    // in one run and not the other lands on the opposite side
    let wrapped = |d: f32, extent: f32| d.abs().min(extent - d.abs());
    for (a, b) in grid.snapshots.iter().zip(&brute.snapshots) {
        assert!(wrapped(a.x - b.x, 200.0) < 1e-3, "{:?} vs {:?}", a, b);
        assert!(wrapped(a.y - b.y, 150.0) < 1e-3, "{:?} vs {:?}", a, b);
        assert!((a.vx - b.vx).abs() < 1e-3);
        assert!((a.vy - b.vy).abs() < 1e-3);
    }
    Ok(())
}

#[test]
fn test_speeds_respect_default_cap() -> Result<()> {
    let report = run(&args(&["--pointer", "400,300"]))?;

    assert!(report.mean_speed <= 2.0 + 1e-4);
    for snapshot in &report.snapshots {
        let speed = (snapshot.vx * snapshot.vx + snapshot.vy * snapshot.vy).sqrt();
        assert!(speed <= 2.0 + 1e-4);
        assert!((0.0..=800.0).contains(&snapshot.x));
        assert!((0.0..=600.0).contains(&snapshot.y));
    }
    Ok(())
}

#[test]
fn test_settings_file_is_applied() -> Result<()> {
    let path = scratch_path("settings.json");
    std::fs::write(&path, r#"{"separation_radius": 12.0, "avoidance_distance": 40.0}"#)?;

    let report = run(&args(&["--settings", path.to_str().unwrap()]))?;
    std::fs::remove_file(&path)?;

    assert_eq!(report.settings.separation_radius, 12.0);
    assert_eq!(report.settings.avoidance_distance, 40.0);
    assert_eq!(report.settings.alignment_radius, 50.0);
    Ok(())
}

#[test]
fn test_missing_settings_file_reports_path() {
    let path = scratch_path("does-not-exist.json");

    let err = load_settings(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("Failed to read settings file"));
    assert!(err.to_string().contains("does-not-exist.json"));
}

#[test]
fn test_malformed_settings_file_is_rejected() -> Result<()> {
    let path = scratch_path("malformed.json");
    std::fs::write(&path, "{ separation_radius: }")?;

    let err = load_settings(Some(&path)).unwrap_err();
    std::fs::remove_file(&path)?;

    assert!(err.to_string().contains("Failed to parse settings file"));
    Ok(())
}

#[test]
fn test_report_written_as_json() -> Result<()> {
    let path = scratch_path("report.json");

    let report = run(&args(&["--output", path.to_str().unwrap()]))?;
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    std::fs::remove_file(&path)?;

    assert_eq!(written["strategy"], "grid");
    assert_eq!(written["boid_count"], 60);
    assert_eq!(written["ticks"], 20);
    assert_eq!(written["snapshots"].as_array().map(Vec::len), Some(60));
    assert_eq!(
        written["snapshots"][0]["x"].as_f64().map(|x| x as f32),
        Some(report.snapshots[0].x)
    );
    assert!(written.get("elapsed").is_none());
    Ok(())
}

#[test]
fn test_invalid_domain_is_rejected() {
    let err = run(&args(&["--width", "0"])).unwrap_err();
    assert!(err.to_string().contains("positive width and height"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_failed_report_write_is_an_error() {
    let err = run(&args_with("0", "1", &["--output", "/dev/full"])).unwrap_err();
    assert!(err.to_string().contains("/dev/full"));
}
