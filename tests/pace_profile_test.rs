// ABOUTME: Integration tests for pace profile aggregation across historical activities
// ABOUTME: Covers recency weighting, IQR rejection, percentile selection, and quality tiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, Duration, Utc};
use pierre_terrain::config::PaceProfileConfig;
use pierre_terrain::intelligence::PaceProfileCalculator;
use pierre_terrain::models::{
    ConfidenceTier, DataQuality, GradeBucket, TerrainAnalysis, TerrainSegment, TerrainType,
    TerrainTypeSummary,
};
use uuid::Uuid;

fn segment(bucket: GradeBucket, distance_km: f64, pace_min_per_km: f64) -> TerrainSegment {
    TerrainSegment {
        terrain_type: bucket.terrain_type(),
        grade_bucket: bucket,
        distance_km,
        avg_grade_percent: match bucket.terrain_type() {
            TerrainType::Uphill => 5.0,
            TerrainType::Downhill => -5.0,
            TerrainType::Flat => 0.5,
        },
        elevation_gain_m: 0.0,
        elevation_loss_m: 0.0,
        duration_minutes: distance_km * pace_min_per_km,
        pace_min_per_km,
    }
}

fn analysis(
    user_id: Uuid,
    age_days: i64,
    now: DateTime<Utc>,
    segments: Vec<TerrainSegment>,
) -> TerrainAnalysis {
    let distance: f64 = segments.iter().map(|s| s.distance_km).sum();
    let duration: f64 = segments.iter().map(|s| s.duration_minutes).sum();
    TerrainAnalysis {
        activity_id: format!("activity_{age_days}_{}", segments.len()),
        user_id,
        start_date: now - Duration::days(age_days),
        total_distance_km: distance,
        total_duration_minutes: duration,
        total_elevation_gain_m: 100.0,
        total_elevation_loss_m: 100.0,
        uphill: TerrainTypeSummary::default(),
        downhill: TerrainTypeSummary::default(),
        flat: TerrainTypeSummary::default(),
        segments,
        analyzed_at: now,
    }
}

fn calculator() -> PaceProfileCalculator {
    PaceProfileCalculator::new(PaceProfileConfig::default())
}

#[test]
fn test_recency_weight_boundaries() {
    let calculator = calculator();
    assert_eq!(calculator.recency_weight(29), Some(2.0));
    assert_eq!(calculator.recency_weight(30), Some(2.0));
    assert_eq!(calculator.recency_weight(31), Some(1.0));
    assert_eq!(calculator.recency_weight(89), Some(1.0));
    assert_eq!(calculator.recency_weight(90), Some(1.0));
    assert_eq!(calculator.recency_weight(91), None);
}

#[test]
fn test_activities_past_the_window_contribute_nothing() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let old: Vec<TerrainAnalysis> = (0..3)
        .map(|i| {
            analysis(
                user_id,
                91 + i,
                now,
                vec![segment(GradeBucket::Flat, 1.0, 5.0); 4],
            )
        })
        .collect();
    assert!(calculator().calculate(user_id, &old, now).is_none());

    let recent: Vec<TerrainAnalysis> = (0..3)
        .map(|_| {
            analysis(
                user_id,
                89,
                now,
                vec![segment(GradeBucket::Flat, 1.0, 5.0); 4],
            )
        })
        .collect();
    assert!(calculator().calculate(user_id, &recent, now).is_some());
}

#[test]
fn test_insufficient_history_below_three_activities() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let history: Vec<TerrainAnalysis> = (0..2)
        .map(|_| {
            analysis(
                user_id,
                5,
                now,
                vec![segment(GradeBucket::Flat, 1.0, 5.0); 6],
            )
        })
        .collect();
    assert!(calculator().calculate(user_id, &history, now).is_none());
}

#[test]
fn test_iqr_outlier_does_not_influence_the_selected_pace() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    // Five plausible flat paces plus one absurd outlier, spread over three
    // recent activities.
    let history = vec![
        analysis(
            user_id,
            3,
            now,
            vec![
                segment(GradeBucket::Flat, 1.0, 5.0),
                segment(GradeBucket::Flat, 1.0, 5.1),
            ],
        ),
        analysis(
            user_id,
            4,
            now,
            vec![
                segment(GradeBucket::Flat, 1.0, 5.2),
                segment(GradeBucket::Flat, 1.0, 5.3),
            ],
        ),
        analysis(
            user_id,
            5,
            now,
            vec![
                segment(GradeBucket::Flat, 1.0, 5.4),
                segment(GradeBucket::Flat, 1.0, 12.0),
            ],
        ),
    ];

    let profile = calculator().calculate(user_id, &history, now).unwrap();
    let flat = profile.bucket_paces.get(&GradeBucket::Flat).unwrap();

    assert_eq!(flat.sample_count, 5, "the outlier must be filtered out");
    assert!(
        flat.pace_min_per_km < 6.0,
        "selected pace {} must not be dragged by the outlier",
        flat.pace_min_per_km
    );
    // 25th percentile of the five surviving equally-weighted samples.
    assert!((flat.pace_min_per_km - 5.1).abs() < 1e-9);
}

#[test]
fn test_thin_buckets_are_omitted_and_factors_default() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    // Plenty of flat, only two downhill samples, no uphill at all.
    let history = vec![
        analysis(
            user_id,
            3,
            now,
            vec![
                segment(GradeBucket::Flat, 1.0, 5.0),
                segment(GradeBucket::Flat, 1.0, 5.0),
                segment(GradeBucket::Down4To6, 1.0, 4.4),
            ],
        ),
        analysis(
            user_id,
            4,
            now,
            vec![
                segment(GradeBucket::Flat, 1.0, 5.0),
                segment(GradeBucket::Down4To6, 1.0, 4.5),
            ],
        ),
        analysis(
            user_id,
            5,
            now,
            vec![segment(GradeBucket::Flat, 1.0, 5.0)],
        ),
    ];

    let profile = calculator().calculate(user_id, &history, now).unwrap();

    assert!(profile.bucket_paces.contains_key(&GradeBucket::Flat));
    assert!(
        !profile.bucket_paces.contains_key(&GradeBucket::Down4To6),
        "two samples are below the bucket minimum"
    );
    assert!(!profile.bucket_paces.contains_key(&GradeBucket::Up4To6));

    // No uphill data at all: the coarse factor falls back to the default.
    assert!((profile.uphill_factor - 1.3).abs() < 1e-9);
    // Downhill has aggregate data even though the bucket was omitted.
    assert!(profile.downhill_factor < 1.0);
}

#[test]
fn test_adjustment_factors_derive_from_aggregate_paces() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let history: Vec<TerrainAnalysis> = (0..3)
        .map(|i| {
            analysis(
                user_id,
                3 + i,
                now,
                vec![
                    segment(GradeBucket::Flat, 1.0, 5.0),
                    segment(GradeBucket::Flat, 1.0, 5.0),
                    segment(GradeBucket::Up4To6, 1.0, 6.5),
                    segment(GradeBucket::Up4To6, 1.0, 6.5),
                ],
            )
        })
        .collect();

    let profile = calculator().calculate(user_id, &history, now).unwrap();

    assert!((profile.base_flat_pace_min_per_km - 5.0).abs() < 1e-9);
    assert!((profile.uphill_factor - 1.3).abs() < 1e-9);

    let uphill = profile.bucket_paces.get(&GradeBucket::Up4To6).unwrap();
    assert!((uphill.pace_min_per_km - 6.5).abs() < 1e-9);
}

#[test]
fn test_confidence_tiers_follow_sample_counts() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    // 16 flat, 8 uphill, 3 downhill samples across four activities.
    let history: Vec<TerrainAnalysis> = (0..4)
        .map(|i| {
            let mut segments = vec![segment(GradeBucket::Flat, 1.0, 5.0); 4];
            segments.extend(vec![segment(GradeBucket::Up6To8, 1.0, 7.0); 2]);
            if i < 3 {
                segments.push(segment(GradeBucket::Down2To4, 1.0, 4.6));
            }
            analysis(user_id, 3 + i64::from(i), now, segments)
        })
        .collect();

    let profile = calculator().calculate(user_id, &history, now).unwrap();

    assert_eq!(
        profile.bucket_paces.get(&GradeBucket::Flat).unwrap().confidence,
        ConfidenceTier::High
    );
    assert_eq!(
        profile.bucket_paces.get(&GradeBucket::Up6To8).unwrap().confidence,
        ConfidenceTier::Medium
    );
    assert_eq!(
        profile
            .bucket_paces
            .get(&GradeBucket::Down2To4)
            .unwrap()
            .confidence,
        ConfidenceTier::Low
    );
}

#[test]
fn test_data_quality_tiers_track_terrain_coverage() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let full: Vec<TerrainAnalysis> = (0..3)
        .map(|i| {
            analysis(
                user_id,
                3 + i,
                now,
                vec![
                    segment(GradeBucket::Flat, 1.0, 5.0),
                    segment(GradeBucket::Flat, 1.0, 5.0),
                    segment(GradeBucket::Up4To6, 1.0, 6.5),
                    segment(GradeBucket::Up4To6, 1.0, 6.6),
                    segment(GradeBucket::Down4To6, 1.0, 4.4),
                    segment(GradeBucket::Down4To6, 1.0, 4.5),
                ],
            )
        })
        .collect();
    let profile = calculator().calculate(user_id, &full, now).unwrap();
    assert_eq!(profile.data_quality, DataQuality::Excellent);

    let flat_only: Vec<TerrainAnalysis> = (0..3)
        .map(|i| {
            analysis(
                user_id,
                3 + i,
                now,
                vec![segment(GradeBucket::Flat, 1.0, 5.0); 3],
            )
        })
        .collect();
    let profile = calculator().calculate(user_id, &flat_only, now).unwrap();
    assert_eq!(profile.data_quality, DataQuality::Fair);
}

#[test]
fn test_short_segments_do_not_qualify_as_samples() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    // Every segment is shorter than the qualifying minimum.
    let history: Vec<TerrainAnalysis> = (0..3)
        .map(|i| {
            analysis(
                user_id,
                3 + i,
                now,
                vec![segment(GradeBucket::Flat, 0.05, 5.0); 5],
            )
        })
        .collect();
    assert!(calculator().calculate(user_id, &history, now).is_none());
}
