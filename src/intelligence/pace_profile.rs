// ABOUTME: Aggregates historical terrain analyses into a personalized pace-by-grade profile
// ABOUTME: Recency weighting, IQR outlier rejection, and weighted percentile selection per bucket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Pace profile aggregation.
//!
//! Historical terrain segments are pooled per grade bucket with recency
//! weights, cleaned with IQR fences, and reduced with a weighted percentile.
//! The flat bucket selects a low percentile rather than the median — the
//! median over many easy runs under-represents race-capable speed — while
//! graded buckets use the median, where typical effort is the meaningful
//! number.

use crate::config::PaceProfileConfig;
use crate::models::{
    ConfidenceTier, DataQuality, GradeBucket, GradePaceEntry, PaceProfile, TerrainAnalysis,
    TerrainType,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use super::statistics::{iqr_filter, weighted_mean, weighted_percentile, WeightedSample};

/// Pace profile aggregation engine
#[derive(Debug, Clone)]
pub struct PaceProfileCalculator {
    config: PaceProfileConfig,
}

impl PaceProfileCalculator {
    /// Create a calculator with the given configuration
    #[must_use]
    pub const fn new(config: PaceProfileConfig) -> Self {
        Self { config }
    }

    /// Recency weight for an activity of the given age.
    ///
    /// `None` means the activity falls outside the history window and is
    /// excluded entirely.
    #[must_use]
    pub fn recency_weight(&self, age_days: i64) -> Option<f64> {
        if age_days <= self.config.recent_days {
            Some(self.config.recent_weight)
        } else if age_days <= self.config.history_window_days {
            Some(self.config.base_weight)
        } else {
            None
        }
    }

    /// Aggregate historical terrain analyses into one pace profile.
    ///
    /// Returns `None` when fewer than the configured minimum of qualifying
    /// activities remain after recency exclusion — an expected branch that
    /// consumers surface as "insufficient history", not an error.
    #[must_use]
    pub fn calculate(
        &self,
        user_id: Uuid,
        history: &[TerrainAnalysis],
        now: DateTime<Utc>,
    ) -> Option<PaceProfile> {
        let mut bucket_samples: BTreeMap<GradeBucket, Vec<WeightedSample>> = BTreeMap::new();
        let mut type_samples: BTreeMap<&'static str, Vec<WeightedSample>> = BTreeMap::new();
        let mut type_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut activities_used = 0;
        let mut segments_used = 0;

        for analysis in history {
            let age_days = (now - analysis.start_date).num_days();
            let Some(weight) = self.recency_weight(age_days) else {
                continue;
            };

            let mut contributed = false;
            for segment in &analysis.segments {
                if segment.distance_km < self.config.min_segment_distance_km {
                    continue;
                }
                let pace = segment.pace_min_per_km;
                if !pace.is_finite() || pace <= 0.0 {
                    continue;
                }

                bucket_samples
                    .entry(segment.grade_bucket)
                    .or_default()
                    .push(WeightedSample { value: pace, weight });

                let type_key = type_key(segment.terrain_type);
                type_samples.entry(type_key).or_default().push(WeightedSample {
                    value: pace,
                    weight: weight * segment.distance_km,
                });
                *type_counts.entry(type_key).or_default() += 1;

                contributed = true;
                segments_used += 1;
            }
            if contributed {
                activities_used += 1;
            }
        }

        if activities_used < self.config.min_qualifying_activities {
            debug!(
                %user_id,
                activities_used,
                required = self.config.min_qualifying_activities,
                "insufficient history for pace profile"
            );
            return None;
        }

        let mut bucket_paces: BTreeMap<GradeBucket, GradePaceEntry> = BTreeMap::new();
        let mut all_samples: Vec<WeightedSample> = Vec::new();
        for (bucket, samples) in &bucket_samples {
            all_samples.extend_from_slice(samples);

            let filtered = if samples.len() >= self.config.iqr_min_samples {
                iqr_filter(samples, self.config.iqr_multiplier)
            } else {
                samples.clone()
            };
            if filtered.len() < self.config.min_bucket_samples {
                continue;
            }

            let percentile = if *bucket == GradeBucket::Flat {
                self.config.flat_pace_percentile
            } else {
                self.config.graded_pace_percentile
            };
            let Some(pace) = weighted_percentile(&filtered, percentile) else {
                continue;
            };

            bucket_paces.insert(
                *bucket,
                GradePaceEntry {
                    pace_min_per_km: pace,
                    sample_count: filtered.len(),
                    confidence: ConfidenceTier::from_sample_count(
                        filtered.len(),
                        self.config.high_confidence_samples,
                        self.config.medium_confidence_samples,
                    ),
                },
            );
        }

        let base_flat_pace = bucket_paces
            .get(&GradeBucket::Flat)
            .map(|entry| entry.pace_min_per_km)
            .or_else(|| weighted_mean(&all_samples))?;

        let uphill_factor = adjustment_factor(
            type_samples.get("uphill"),
            base_flat_pace,
            self.config.default_uphill_factor,
        );
        let downhill_factor = adjustment_factor(
            type_samples.get("downhill"),
            base_flat_pace,
            self.config.default_downhill_factor,
        );

        let data_quality = self.data_quality(&type_counts);

        Some(PaceProfile {
            user_id,
            base_flat_pace_min_per_km: base_flat_pace,
            uphill_factor,
            downhill_factor,
            bucket_paces,
            activities_used,
            segments_used,
            data_quality,
            calculated_at: now,
        })
    }

    /// Coverage tier from how many terrain types have enough segments
    fn data_quality(&self, type_counts: &BTreeMap<&'static str, usize>) -> DataQuality {
        let well_covered = ["uphill", "downhill", "flat"]
            .iter()
            .filter(|key| {
                type_counts.get(*key).copied().unwrap_or(0) >= self.config.well_covered_segments
            })
            .count();
        match well_covered {
            3 => DataQuality::Excellent,
            2 => DataQuality::Good,
            1 => DataQuality::Fair,
            _ => DataQuality::Insufficient,
        }
    }
}

const fn type_key(terrain_type: TerrainType) -> &'static str {
    match terrain_type {
        TerrainType::Uphill => "uphill",
        TerrainType::Downhill => "downhill",
        TerrainType::Flat => "flat",
    }
}

fn adjustment_factor(
    samples: Option<&Vec<WeightedSample>>,
    base_flat_pace: f64,
    default: f64,
) -> f64 {
    samples
        .and_then(|s| weighted_mean(s))
        .filter(|pace| pace.is_finite() && *pace > 0.0 && base_flat_pace > 0.0)
        .map_or(default, |pace| pace / base_flat_pace)
}
