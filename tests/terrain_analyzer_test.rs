// ABOUTME: Integration tests for terrain segmentation and effort-weighted time allocation
// ABOUTME: Covers bucket boundaries, duration conservation, and the elevation-range gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Utc;
use pierre_terrain::config::TerrainConfig;
use pierre_terrain::intelligence::terrain_analyzer::TerrainAnalyzer;
use pierre_terrain::models::{ActivityStreams, GradeBucket, TerrainType};
use uuid::Uuid;

/// Build streams with samples every `spacing_m` meters and elevation given
/// by a profile function of distance.
fn make_streams(
    total_m: f64,
    spacing_m: f64,
    duration_minutes: f64,
    elevation: impl Fn(f64) -> f64,
) -> ActivityStreams {
    let mut distance_meters = Vec::new();
    let mut elevation_meters = Vec::new();
    let mut d = 0.0;
    while d <= total_m + 0.001 {
        distance_meters.push(d);
        elevation_meters.push(elevation(d));
        d += spacing_m;
    }
    ActivityStreams {
        activity_id: "test_activity".to_owned(),
        user_id: Uuid::new_v4(),
        start_date: Utc::now(),
        distance_meters,
        elevation_meters,
        heart_rate_bpm: None,
        total_duration_minutes: duration_minutes,
        total_distance_km: total_m / 1000.0,
    }
}

/// Three-part course: 2 km climbing at 8%, 2 km flat, 2 km descending at 8%.
fn rolling_course() -> ActivityStreams {
    make_streams(6000.0, 25.0, 60.0, |d| {
        if d <= 2000.0 {
            d * 0.08
        } else if d <= 4000.0 {
            160.0
        } else {
            160.0 - (d - 4000.0) * 0.08
        }
    })
}

#[test]
fn test_grade_bucket_boundaries_resolve_toward_steeper() {
    assert_eq!(GradeBucket::classify(0.0), GradeBucket::Flat);
    assert_eq!(GradeBucket::classify(1.99), GradeBucket::Flat);
    assert_eq!(GradeBucket::classify(-1.99), GradeBucket::Flat);

    // Exact boundaries go to the steeper side.
    assert_eq!(GradeBucket::classify(2.0), GradeBucket::Up2To4);
    assert_eq!(GradeBucket::classify(4.0), GradeBucket::Up4To6);
    assert_eq!(GradeBucket::classify(15.0), GradeBucket::Up15To20);
    assert_eq!(GradeBucket::classify(20.0), GradeBucket::Up20Plus);
    assert_eq!(GradeBucket::classify(-2.0), GradeBucket::Down2To4);
    assert_eq!(GradeBucket::classify(-20.0), GradeBucket::Down20Plus);

    assert_eq!(GradeBucket::classify(19.99), GradeBucket::Up15To20);
    assert_eq!(GradeBucket::classify(55.0), GradeBucket::Up20Plus);
    assert_eq!(GradeBucket::classify(-55.0), GradeBucket::Down20Plus);
}

#[test]
fn test_classification_is_total_over_a_grade_sweep() {
    let mut grade = -60.0;
    while grade <= 60.0 {
        let bucket = GradeBucket::classify(grade);
        // Coarse terrain type must agree with the 3-bucket rule.
        let expected = if grade >= 2.0 {
            TerrainType::Uphill
        } else if grade <= -2.0 {
            TerrainType::Downhill
        } else {
            TerrainType::Flat
        };
        assert_eq!(bucket.terrain_type(), expected, "grade {grade}");
        grade += 0.1;
    }
}

#[test]
fn test_segment_durations_sum_to_activity_duration() {
    let analyzer = TerrainAnalyzer::new(TerrainConfig::default());
    let analysis = analyzer.analyze(&rolling_course()).unwrap();

    assert!(!analysis.segments.is_empty());
    let total: f64 = analysis.segments.iter().map(|s| s.duration_minutes).sum();
    assert!(
        (total - 60.0).abs() < 1e-6,
        "segment durations must sum to the activity duration, got {total}"
    );
}

#[test]
fn test_effort_weighting_credits_climbing_time() {
    let analyzer = TerrainAnalyzer::new(TerrainConfig::default());
    let analysis = analyzer.analyze(&rolling_course()).unwrap();

    let uphill_pace = analysis.uphill.pace_min_per_km.unwrap();
    let flat_pace = analysis.flat.pace_min_per_km.unwrap();
    assert!(
        uphill_pace > flat_pace,
        "uphill pace {uphill_pace} should be slower than flat pace {flat_pace}"
    );

    // Distances recovered per type should roughly match the course shape.
    assert!((analysis.uphill.distance_km - 2.0).abs() < 0.4);
    assert!((analysis.downhill.distance_km - 2.0).abs() < 0.4);
}

#[test]
fn test_flat_stream_has_no_terrain_signal() {
    let analyzer = TerrainAnalyzer::new(TerrainConfig::default());
    let flat = make_streams(10_000.0, 25.0, 50.0, |_| 120.0);
    assert!(analyzer.analyze(&flat).is_none());
}

#[test]
fn test_ten_meters_over_ten_km_is_below_the_scaled_gate() {
    // 10 m of range over 10 km sits on the absolute floor but far below the
    // distance-scaled bound of 100 m, so no analysis is produced.
    let analyzer = TerrainAnalyzer::new(TerrainConfig::default());
    let nearly_flat = make_streams(10_000.0, 25.0, 50.0, |d| d * 0.001);
    assert!(analyzer.analyze(&nearly_flat).is_none());
}

#[test]
fn test_ten_meters_over_one_km_clears_the_floor() {
    let analyzer = TerrainAnalyzer::new(TerrainConfig::default());
    let short_hilly = make_streams(1000.0, 25.0, 6.0, |d| d * 0.01);
    let analysis = analyzer.analyze(&short_hilly);
    assert!(analysis.is_some(), "range equal to the floor is analyzable");
}

#[test]
fn test_gentle_rolling_course_classifies_entirely_flat() {
    // 1.5% sustained grade passes the range gate on a 10 km run but stays
    // inside the flat band everywhere.
    let analyzer = TerrainAnalyzer::new(TerrainConfig::default());
    let gentle = make_streams(10_000.0, 25.0, 50.0, |d| d * 0.015);
    let analysis = analyzer.analyze(&gentle).unwrap();

    assert!(analysis
        .segments
        .iter()
        .all(|s| s.terrain_type == TerrainType::Flat));
    assert!(analysis.uphill.pace_min_per_km.is_none());
    assert!(analysis.downhill.pace_min_per_km.is_none());
}

#[test]
fn test_mismatched_streams_are_rejected_quietly() {
    let analyzer = TerrainAnalyzer::new(TerrainConfig::default());
    let mut streams = rolling_course();
    streams.elevation_meters.pop();
    assert!(analyzer.analyze(&streams).is_none());

    let mut short = rolling_course();
    short.distance_meters.truncate(1);
    short.elevation_meters.truncate(1);
    assert!(analyzer.analyze(&short).is_none());
}

#[test]
fn test_batch_analysis_preserves_order() {
    let analyzer = TerrainAnalyzer::new(TerrainConfig::default());
    let flat = make_streams(10_000.0, 25.0, 50.0, |_| 0.0);
    let hilly = rolling_course();

    let results = analyzer.analyze_batch(&[flat, hilly]);
    assert_eq!(results.len(), 2);
    assert!(results[0].is_none());
    assert!(results[1].is_some());
}
