use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use boid_client::{apply_overrides, execute, load_settings, Args};
use boid_shared::{AgentKind, FrameSnapshot, SimulationSettings, StepMode};
use clap::Parser;

/// A scratch path unique to this test process.
fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("boid-client-{}-{}", std::process::id(), name))
}

#[test]
fn test_missing_config_uses_defaults() {
    let settings = load_settings(None).unwrap();
    assert_eq!(settings, SimulationSettings::default());
}

#[test]
fn test_loads_partial_config_file() {
    let path = scratch("partial.json");
    fs::write(&path, r#"{ "width": 320.0, "boid": { "separation_radius": 12.0 } }"#).unwrap();

    let settings = load_settings(Some(&path)).unwrap();
    assert_eq!(settings.width, 320.0);
    assert_eq!(settings.boid.separation_radius, 12.0);
    assert_eq!(settings.height, 600.0);

    fs::remove_file(&path).ok();
}

#[test]
fn test_unreadable_config_reports_path() {
    let path = scratch("does-not-exist.json");
    let err = load_settings(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("does-not-exist.json"));
}

#[test]
fn test_malformed_config_is_rejected() {
    let path = scratch("malformed.json");
    fs::write(&path, "{ width: ").unwrap();
    assert!(load_settings(Some(&path)).is_err());
    fs::remove_file(&path).ok();
}

#[test]
fn test_cli_overrides_file_settings() {
    let args = Args::parse_from([
        "boid-client",
        "--boids",
        "7",
        "--predators",
        "1",
        "--width",
        "640",
        "--sequential",
    ]);
    let mut settings = SimulationSettings::default();
    apply_overrides(&mut settings, &args);

    assert_eq!(settings.boid_count, 7);
    assert_eq!(settings.predator_count, 1);
    assert_eq!(settings.width, 640.0);
    assert_eq!(settings.height, 600.0);
    assert_eq!(settings.step_mode, StepMode::Sequential);
}

#[test]
fn test_invalid_settings_fail_before_running() {
    let args = Args::parse_from(["boid-client", "--width", "0", "--unpaced", "--ticks", "1"]);
    let err = execute(&args, Arc::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid simulation settings"));
}

#[test]
fn test_snapshot_every_without_output_is_rejected() {
    let args = Args::parse_from(["boid-client", "--ticks", "1", "--snapshot-every", "5"]);
    let err = execute(&args, Arc::default()).unwrap_err();
    assert!(err.to_string().contains("--snapshot-every requires --output"));
}

#[test]
fn test_headless_run_writes_snapshots() {
    let output = scratch("frames.jsonl");
    let output_arg = output.to_string_lossy().into_owned();
    let args = Args::parse_from([
        "boid-client",
        "--ticks",
        "20",
        "--boids",
        "40",
        "--predators",
        "2",
        "--width",
        "200",
        "--height",
        "150",
        "--seed",
        "11",
        "--pointer",
        "100,75",
        "--unpaced",
        "--snapshot-every",
        "5",
        "--output",
        &output_arg,
    ]);

    let summary = execute(&args, Arc::default()).unwrap();
    assert_eq!(summary.ticks, 20);
    assert_eq!(summary.boid_count, 40);
    assert_eq!(summary.predator_count, 2);
    assert!(summary.mean_boid_speed <= 4.0 + 1e-4);

    let text = fs::read_to_string(&output).unwrap();
    let frames: Vec<FrameSnapshot> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        frames.iter().map(|f| f.tick).collect::<Vec<_>>(),
        vec![5, 10, 15, 20]
    );
    for frame in &frames {
        assert_eq!(frame.count(AgentKind::Boid), 40);
        assert_eq!(frame.count(AgentKind::Predator), 2);
        for agent in &frame.agents {
            assert!(agent.position.x >= 0.0 && agent.position.x < 200.0);
            assert!(agent.position.y >= 0.0 && agent.position.y < 150.0);
        }
    }

    fs::remove_file(&output).ok();
}

#[test]
fn test_seeded_runs_are_repeatable() {
    let run = |name: &str| {
        let output = scratch(name);
        let output_arg = output.to_string_lossy().into_owned();
        let args = Args::parse_from([
            "boid-client",
            "--ticks",
            "10",
            "--boids",
            "25",
            "--seed",
            "99",
            "--unpaced",
            "--snapshot-every",
            "10",
            "--output",
            &output_arg,
        ]);
        execute(&args, Arc::default()).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        fs::remove_file(&output).ok();
        text
    };

    assert_eq!(run("seeded-a.jsonl"), run("seeded-b.jsonl"));
}
