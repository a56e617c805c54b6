// ABOUTME: Integration tests for the ultra fatigue predictor and its companions
// ABOUTME: Covers monotonicity, clamps, the experience discount floor, and segment projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_terrain::config::UltraFatigueConfig;
use pierre_terrain::errors::ErrorCode;
use pierre_terrain::intelligence::UltraFatiguePredictor;
use pierre_terrain::models::{CourseSegment, RaceScenario, WarningLevel};

fn predictor() -> UltraFatiguePredictor {
    UltraFatiguePredictor::new(UltraFatigueConfig::default())
}

fn base_scenario() -> RaceScenario {
    RaceScenario {
        distance_km: 100.0,
        elevation_gain_m: 3000.0,
        expected_duration_hours: None,
        temperature_celsius: 18.0,
        humidity_percent: 40.0,
        night_section: false,
        longest_ultra_km: 50.0,
        ultra_count: 3,
        readiness_score: 80.0,
    }
}

#[test]
fn test_fatigue_factor_is_monotone_in_distance() {
    let predictor = predictor();
    let mut previous = 0.0;
    for distance in [20.0, 42.195, 45.0, 50.0, 70.0, 100.0, 130.0, 170.0] {
        let scenario = RaceScenario {
            distance_km: distance,
            ..base_scenario()
        };
        let factor = predictor.predict(&scenario).unwrap().fatigue_factor;
        assert!(
            factor >= previous,
            "factor {factor} at {distance} km dipped below {previous}"
        );
        previous = factor;
    }
}

#[test]
fn test_fatigue_factor_is_monotone_in_elevation_heat_and_humidity() {
    let predictor = predictor();

    let mut previous = 0.0;
    for gain in [0.0, 1000.0, 3000.0, 6000.0, 10_000.0] {
        let scenario = RaceScenario {
            elevation_gain_m: gain,
            ..base_scenario()
        };
        let factor = predictor.predict(&scenario).unwrap().fatigue_factor;
        assert!(factor >= previous, "elevation gain {gain}");
        previous = factor;
    }

    let mut previous = 0.0;
    for temperature in [20.0, 24.0, 28.0, 34.0, 40.0] {
        let scenario = RaceScenario {
            temperature_celsius: temperature,
            ..base_scenario()
        };
        let factor = predictor.predict(&scenario).unwrap().fatigue_factor;
        assert!(factor >= previous, "temperature {temperature}");
        previous = factor;
    }

    let mut previous = 0.0;
    for humidity in [60.0, 70.0, 80.0, 90.0, 100.0] {
        let scenario = RaceScenario {
            humidity_percent: humidity,
            ..base_scenario()
        };
        let factor = predictor.predict(&scenario).unwrap().fatigue_factor;
        assert!(factor >= previous, "humidity {humidity}");
        previous = factor;
    }
}

#[test]
fn test_fatigue_factor_never_exceeds_the_cap() {
    let predictor = predictor();
    let brutal = RaceScenario {
        distance_km: 320.0,
        elevation_gain_m: 20_000.0,
        expected_duration_hours: Some(60.0),
        temperature_celsius: 45.0,
        humidity_percent: 100.0,
        night_section: true,
        longest_ultra_km: 0.0,
        ultra_count: 0,
        readiness_score: 0.0,
    };
    let result = predictor.predict(&brutal).unwrap();
    assert!((result.fatigue_factor - 1.60).abs() < 1e-9);

    // Confidence stays clamped even for a scenario this extreme.
    assert!(result.confidence >= 20.0);
    assert!(result.confidence <= 95.0);
}

#[test]
fn test_experience_discount_never_drops_below_the_floor() {
    let predictor = predictor();
    for longest in [0.0, 40.0, 60.0, 90.0, 120.0, 200.0] {
        for count in [0_u32, 1, 2, 5, 10, 40] {
            let scenario = RaceScenario {
                longest_ultra_km: longest,
                ultra_count: count,
                ..base_scenario()
            };
            let result = predictor.predict(&scenario).unwrap();
            assert!(
                result.experience_discount >= 0.35,
                "discount {} for longest {longest} count {count}",
                result.experience_discount
            );
            assert!(result.experience_discount <= 1.0);
        }
    }
}

#[test]
fn test_veteran_discount_takes_effect_on_a_100k() {
    let predictor = predictor();

    let veteran = RaceScenario {
        longest_ultra_km: 120.0,
        ultra_count: 12,
        ..base_scenario()
    };
    let marathoner_only = RaceScenario {
        longest_ultra_km: 21.0,
        ultra_count: 0,
        ..base_scenario()
    };

    let veteran_result = predictor.predict(&veteran).unwrap();
    let marathoner_result = predictor.predict(&marathoner_only).unwrap();

    assert!(
        veteran_result.fatigue_factor < marathoner_result.fatigue_factor,
        "veteran {} should predict lower fatigue than marathoner {}",
        veteran_result.fatigue_factor,
        marathoner_result.fatigue_factor
    );
    // Full coverage plus 10+ finishes: 0.60 - 0.15.
    assert!((veteran_result.experience_discount - 0.45).abs() < 1e-9);
    // The veteran has covered the distance before: no inexperience term.
    assert!(veteran_result.breakdown.inexperience.abs() < 1e-12);
    assert!(marathoner_result.breakdown.inexperience > 0.0);
}

#[test]
fn test_low_readiness_amplifies_fatigue() {
    let predictor = predictor();
    let rested = predictor.predict(&base_scenario()).unwrap();
    let depleted = predictor
        .predict(&RaceScenario {
            readiness_score: 40.0,
            ..base_scenario()
        })
        .unwrap();

    assert!((rested.readiness_multiplier - 1.0).abs() < 1e-9);
    assert!((depleted.readiness_multiplier - 1.35).abs() < 1e-9);
    assert!(depleted.fatigue_factor > rested.fatigue_factor);
}

#[test]
fn test_night_penalty_doubles_beyond_80km() {
    let predictor = predictor();
    let short_night = predictor
        .predict(&RaceScenario {
            distance_km: 60.0,
            night_section: true,
            ..base_scenario()
        })
        .unwrap();
    let long_night = predictor
        .predict(&RaceScenario {
            distance_km: 100.0,
            night_section: true,
            ..base_scenario()
        })
        .unwrap();

    assert!(short_night.breakdown.night > 0.0);
    assert!(
        (long_night.breakdown.night - short_night.breakdown.night * 2.0).abs() < 1e-12,
        "night contribution doubles on long courses"
    );
}

#[test]
fn test_non_finite_inputs_fail_fast() {
    let predictor = predictor();

    let mut scenario = base_scenario();
    scenario.distance_km = f64::NAN;
    let error = predictor.predict(&scenario).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert!(error.message.contains("distance_km"));

    let mut scenario = base_scenario();
    scenario.temperature_celsius = f64::INFINITY;
    assert!(predictor.predict(&scenario).is_err());

    let mut scenario = base_scenario();
    scenario.distance_km = -5.0;
    assert!(predictor.predict(&scenario).is_err());
}

#[test]
fn test_finish_time_components_add_up() {
    let predictor = predictor();
    let scenario = base_scenario();
    let estimate = predictor.estimate_finish_time(&scenario, 10.0).unwrap();

    // 100 km at 10 km aid spacing and 3 minutes per stop.
    assert!((estimate.aid_station_hours - 0.5).abs() < 1e-9);
    assert!(estimate.night_penalty_hours.abs() < 1e-12);
    assert!(estimate.heat_penalty_hours.abs() < 1e-12);

    let reassembled = estimate.baseline_hours
        + estimate.fatigue_adjustment_hours
        + estimate.aid_station_hours
        + estimate.night_penalty_hours
        + estimate.heat_penalty_hours;
    assert!((estimate.total_hours - reassembled).abs() < 1e-9);
    assert!(estimate.total_hours > estimate.baseline_hours);

    assert!(predictor.estimate_finish_time(&scenario, 0.0).is_err());
}

#[test]
fn test_segment_projections_walk_cumulative_load() {
    let predictor = predictor();
    let scenario = RaceScenario {
        elevation_gain_m: 5000.0,
        expected_duration_hours: Some(14.0),
        ..base_scenario()
    };
    let course: Vec<CourseSegment> = (0..10)
        .map(|_| CourseSegment {
            distance_km: 10.0,
            elevation_gain_m: 500.0,
        })
        .collect();

    let projections = predictor.project_segments(&scenario, &course).unwrap();
    assert_eq!(projections.len(), 10);

    // Cumulative distance, glycogen depletion, and pace decay never decrease.
    for pair in projections.windows(2) {
        assert!(pair[1].cumulative_distance_km > pair[0].cumulative_distance_km);
        assert!(pair[1].glycogen_depletion_percent >= pair[0].glycogen_depletion_percent);
        assert!(pair[1].pace_decay_percent >= pair[0].pace_decay_percent);
    }

    // Early in the race everything is sustainable; deep glycogen depletion
    // flags the closing segments as critical.
    assert_eq!(projections[0].warning, WarningLevel::None);
    assert_eq!(projections[9].warning, WarningLevel::Critical);
    assert!(projections[9].glycogen_depletion_percent > 80.0);

    // Every reported level is consistent with the documented thresholds.
    let config = UltraFatigueConfig::default();
    for projection in &projections {
        let expected = if projection.glycogen_depletion_percent > config.glycogen_critical_pct {
            WarningLevel::Critical
        } else if projection.pace_decay_percent > config.decay_warning_pct {
            WarningLevel::Warning
        } else if projection.pace_decay_percent > config.decay_caution_pct {
            WarningLevel::Caution
        } else {
            WarningLevel::None
        };
        assert_eq!(projection.warning, expected);
    }
}

#[test]
fn test_segment_projection_rejects_negative_segments() {
    let predictor = predictor();
    let course = vec![CourseSegment {
        distance_km: -1.0,
        elevation_gain_m: 0.0,
    }];
    assert!(predictor
        .project_segments(&base_scenario(), &course)
        .is_err());
}
