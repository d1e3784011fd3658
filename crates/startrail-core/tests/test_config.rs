use std::path::PathBuf;

use startrail_core::composite::{AccumulatorMode, InsertPosition};
use startrail_core::error::StartrailError;
use startrail_core::filters::skyglow::SkyglowStrength;
use startrail_core::pipeline::config::RunConfig;
use startrail_core::pipeline::FadeMode;

#[test]
fn test_defaults() {
    let config = RunConfig::new("lights");
    assert_eq!(config.output, PathBuf::from("startrail.tiff"));
    assert!(config.merge_layers);
    assert!(!config.dark_frames.enabled);
    assert!(!config.intermediate.enabled);
    assert!(!config.live_display);
    assert_eq!(config.skyglow.strength, SkyglowStrength::None);
    assert_eq!(config.skyglow.radius, 500.0);
    assert_eq!(config.fade, FadeMode::None);
    assert_eq!(config.trail_limit, 0);
}

#[test]
fn test_minimal_json_fills_defaults() {
    let config: RunConfig = serde_json::from_str(r#"{ "light_frames": "/data/night1" }"#).unwrap();
    assert_eq!(config.light_frames, PathBuf::from("/data/night1"));
    assert!(config.merge_layers);
    assert_eq!(config.skyglow.radius, 500.0);
}

#[test]
fn test_json_roundtrip() {
    let mut config = RunConfig::new("/data/night1");
    config.merge_layers = false;
    config.fade = FadeMode::Out;
    config.trail_limit = 40;
    config.skyglow.strength = SkyglowStrength::Heavy;

    let json = serde_json::to_string(&config).unwrap();
    let back: RunConfig = serde_json::from_str(&json).unwrap();
    assert!(!back.merge_layers);
    assert_eq!(back.fade, FadeMode::Out);
    assert_eq!(back.trail_limit, 40);
    assert_eq!(back.skyglow.strength, SkyglowStrength::Heavy);
}

#[test]
fn test_validate_accepts_existing_dirs() {
    let lights = tempfile::tempdir().unwrap();
    let darks = tempfile::tempdir().unwrap();
    let mut config = RunConfig::new(lights.path());
    config.dark_frames.enabled = true;
    config.dark_frames.dir = Some(darks.path().to_path_buf());
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_empty_light_path() {
    let config = RunConfig::new("");
    assert!(matches!(config.validate(), Err(StartrailError::Config(_))));
}

#[test]
fn test_validate_rejects_missing_light_dir() {
    let root = tempfile::tempdir().unwrap();
    let config = RunConfig::new(root.path().join("nope"));
    let err = config.validate().unwrap_err();
    assert!(matches!(err, StartrailError::Config(ref msg) if msg.contains("doesn't exist")));
}

#[test]
fn test_validate_rejects_enabled_darks_without_dir() {
    let lights = tempfile::tempdir().unwrap();
    let mut config = RunConfig::new(lights.path());
    config.dark_frames.enabled = true;
    let err = config.validate().unwrap_err();
    assert!(matches!(err, StartrailError::Config(ref msg) if msg.contains("dark frame")));
}

#[test]
fn test_validate_ignores_disabled_darks() {
    let lights = tempfile::tempdir().unwrap();
    let mut config = RunConfig::new(lights.path());
    config.dark_frames.dir = Some(lights.path().join("missing"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_missing_intermediate_dir() {
    let lights = tempfile::tempdir().unwrap();
    let mut config = RunConfig::new(lights.path());
    config.intermediate.enabled = true;
    config.intermediate.dir = Some(lights.path().join("snapshots"));
    assert!(matches!(config.validate(), Err(StartrailError::Config(_))));
}

#[test]
fn test_validate_rejects_zero_radius_when_suppressing() {
    let lights = tempfile::tempdir().unwrap();
    let mut config = RunConfig::new(lights.path());
    config.skyglow.radius = 0.0;
    assert!(config.validate().is_ok());
    config.skyglow.strength = SkyglowStrength::Light;
    assert!(matches!(config.validate(), Err(StartrailError::Config(_))));
}

#[test]
fn test_validate_rejects_non_finite_radius() {
    let lights = tempfile::tempdir().unwrap();
    let mut config = RunConfig::new(lights.path());
    config.skyglow.strength = SkyglowStrength::Full;
    for radius in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        config.skyglow.radius = radius;
        assert!(
            matches!(config.validate(), Err(StartrailError::Config(_))),
            "radius {radius} passed validation"
        );
    }
}

#[test]
fn test_validate_rejects_oversized_radius() {
    let lights = tempfile::tempdir().unwrap();
    let mut config = RunConfig::new(lights.path());
    config.skyglow.strength = SkyglowStrength::Moderate;
    config.skyglow.radius = 100_000.0;
    assert!(config.validate().is_ok());
    config.skyglow.radius = 100_001.0;
    assert!(matches!(config.validate(), Err(StartrailError::Config(_))));
}

#[test]
fn test_validate_rejects_light_path_that_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("frame.png");
    std::fs::write(&file, b"not a directory").unwrap();
    let config = RunConfig::new(&file);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, StartrailError::Config(ref msg) if msg.contains("not a directory")));
}

#[test]
fn test_validate_rejects_dark_path_that_is_a_file() {
    let lights = tempfile::tempdir().unwrap();
    let file = lights.path().join("master_dark.tiff");
    std::fs::write(&file, b"not a directory").unwrap();
    let mut config = RunConfig::new(lights.path());
    config.dark_frames.enabled = true;
    config.dark_frames.dir = Some(file);
    assert!(matches!(config.validate(), Err(StartrailError::Config(_))));
}

#[test]
fn test_accumulator_mode() {
    let mut config = RunConfig::new("lights");
    assert_eq!(config.accumulator_mode(), AccumulatorMode::Flattened);

    config.merge_layers = false;
    config.trail_limit = 10;
    assert_eq!(
        config.accumulator_mode(),
        AccumulatorMode::Layered {
            position: InsertPosition::Front,
            limit: 10
        }
    );

    config.fade = FadeMode::In;
    assert_eq!(
        config.accumulator_mode(),
        AccumulatorMode::Layered {
            position: InsertPosition::End,
            limit: 10
        }
    );
}
