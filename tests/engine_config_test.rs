// ABOUTME: Unit tests for engine configuration defaults, validation, and env overrides
// ABOUTME: Validates config behavior, edge cases, and error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_terrain::config::{EngineConfig, TerrainConfig};
use pierre_terrain::models::GradeBucket;
use serial_test::serial;

#[test]
fn test_default_config_validates() {
    let config = EngineConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_effort_multiplier_table_shape() {
    let config = TerrainConfig::default();

    // Flat is the 1.0 baseline; uphill effort grows with grade up to 2.5.
    assert!((config.effort.for_bucket(GradeBucket::Flat) - 1.0).abs() < 1e-9);
    assert!((config.effort.for_bucket(GradeBucket::Up20Plus) - 2.5).abs() < 1e-9);

    let uphill = [
        GradeBucket::Up2To4,
        GradeBucket::Up4To6,
        GradeBucket::Up6To8,
        GradeBucket::Up8To10,
        GradeBucket::Up10To12,
        GradeBucket::Up12To15,
        GradeBucket::Up15To20,
        GradeBucket::Up20Plus,
    ];
    for pair in uphill.windows(2) {
        assert!(
            config.effort.for_bucket(pair[0]) < config.effort.for_bucket(pair[1]),
            "uphill effort must increase with grade"
        );
    }

    // Gentle descents are cheaper than flat; very steep ones are not free.
    assert!(config.effort.for_bucket(GradeBucket::Down2To4) < 1.0);
    assert!(config.effort.for_bucket(GradeBucket::Down20Plus) > 1.0);
}

#[test]
fn test_elevation_range_gate_scales_with_distance() {
    let config = TerrainConfig::default();
    assert!((config.min_elevation_range_m(10.0) - 100.0).abs() < 1e-9);
    assert!((config.min_elevation_range_m(0.5) - 10.0).abs() < 1e-9);
}

#[test]
fn test_invalid_fatigue_weights_fail_validation() {
    let mut config = EngineConfig::default();
    config.ultra_fatigue.distance_weight = 0.8;
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_percentile_fails_validation() {
    let mut config = EngineConfig::default();
    config.pace_profile.flat_pace_percentile = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_window_fails_validation() {
    let mut config = EngineConfig::default();
    config.terrain.window_target_distance_m = 0.0;
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn test_environment_variable_override() {
    std::env::set_var("TERRAIN_WINDOW_DISTANCE_M", "200.0");
    std::env::set_var("PROFILE_FLAT_PERCENTILE", "0.3");

    let config = EngineConfig::from_environment().unwrap();
    assert!((config.terrain.window_target_distance_m - 200.0).abs() < 1e-9);
    assert!((config.pace_profile.flat_pace_percentile - 0.3).abs() < 1e-9);

    std::env::remove_var("TERRAIN_WINDOW_DISTANCE_M");
    std::env::remove_var("PROFILE_FLAT_PERCENTILE");
}

#[test]
#[serial]
fn test_unparsable_environment_value_is_an_error() {
    std::env::set_var("PROFILE_STALENESS_DAYS", "soon");
    assert!(EngineConfig::from_environment().is_err());
    std::env::remove_var("PROFILE_STALENESS_DAYS");
}

#[test]
#[serial]
fn test_environment_override_still_validates() {
    std::env::set_var("PROFILE_FLAT_PERCENTILE", "2.0");
    assert!(EngineConfig::from_environment().is_err());
    std::env::remove_var("PROFILE_FLAT_PERCENTILE");
}
