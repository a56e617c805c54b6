// ABOUTME: Pace profile aggregation policy covering recency, outliers, and percentile selection
// ABOUTME: The flat-vs-graded percentile split is product policy, kept configurable here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Pace profile aggregation configuration.
///
/// The flat bucket deliberately selects a low percentile rather than the
/// median: the median pace over many junk and easy runs under-represents
/// race-capable speed. Graded buckets use the median, where typical effort
/// is the more meaningful number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaceProfileConfig {
    /// Activities at most this old get the recent weight, days
    pub recent_days: i64,

    /// Weight for recent activities
    pub recent_weight: f64,

    /// Activities at most this old get the base weight; older ones are
    /// excluded entirely, days
    pub history_window_days: i64,

    /// Weight for activities inside the window but past `recent_days`
    pub base_weight: f64,

    /// Minimum qualifying historical activities before a profile is computed
    pub min_qualifying_activities: usize,

    /// Minimum post-filter samples before a bucket is emitted
    pub min_bucket_samples: usize,

    /// Minimum samples in a bucket before IQR filtering is applied; the IQR
    /// is unstable below this size, so smaller buckets are left unfiltered
    pub iqr_min_samples: usize,

    /// Multiplier on the interquartile range for the outlier fences
    pub iqr_multiplier: f64,

    /// Percentile selected for the flat bucket, 0-1
    pub flat_pace_percentile: f64,

    /// Percentile selected for graded buckets, 0-1
    pub graded_pace_percentile: f64,

    /// Post-filter samples for high confidence
    pub high_confidence_samples: usize,

    /// Post-filter samples for medium confidence
    pub medium_confidence_samples: usize,

    /// Segments per terrain type for that type to count as well covered in
    /// the data-quality tier
    pub well_covered_segments: usize,

    /// Segments shorter than this do not qualify as pace samples, km
    pub min_segment_distance_km: f64,

    /// Uphill adjustment factor when no historical uphill data exists
    pub default_uphill_factor: f64,

    /// Downhill adjustment factor when no historical downhill data exists
    pub default_downhill_factor: f64,

    /// Profiles older than this are served stale while a background
    /// recompute is triggered, days
    pub staleness_days: i64,
}

impl Default for PaceProfileConfig {
    fn default() -> Self {
        Self {
            recent_days: 30,
            recent_weight: 2.0,
            history_window_days: 90,
            base_weight: 1.0,
            min_qualifying_activities: 3,
            min_bucket_samples: 3,
            iqr_min_samples: 4,
            iqr_multiplier: 1.5,
            flat_pace_percentile: 0.25,
            graded_pace_percentile: 0.50,
            high_confidence_samples: 15,
            medium_confidence_samples: 8,
            well_covered_segments: 5,
            min_segment_distance_km: 0.1,
            default_uphill_factor: 1.3,
            default_downhill_factor: 0.85,
            staleness_days: 7,
        }
    }
}

impl PaceProfileConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value found.
    pub fn validate(&self) -> AppResult<()> {
        if self.recent_days <= 0 || self.history_window_days < self.recent_days {
            return Err(AppError::config_invalid(
                "history_window_days must be >= recent_days > 0",
            ));
        }
        if self.recent_weight < self.base_weight || self.base_weight <= 0.0 {
            return Err(AppError::config_invalid(
                "recent_weight must be >= base_weight > 0",
            ));
        }
        for (name, p) in [
            ("flat_pace_percentile", self.flat_pace_percentile),
            ("graded_pace_percentile", self.graded_pace_percentile),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AppError::config_invalid(format!(
                    "{name} must be between 0 and 1"
                )));
            }
        }
        if self.iqr_multiplier <= 0.0 {
            return Err(AppError::config_invalid("iqr_multiplier must be > 0"));
        }
        if self.high_confidence_samples < self.medium_confidence_samples {
            return Err(AppError::config_invalid(
                "high_confidence_samples must be >= medium_confidence_samples",
            ));
        }
        if self.default_uphill_factor <= 0.0 || self.default_downhill_factor <= 0.0 {
            return Err(AppError::config_invalid(
                "default adjustment factors must be > 0",
            ));
        }
        if self.staleness_days <= 0 {
            return Err(AppError::config_invalid("staleness_days must be > 0"));
        }
        Ok(())
    }
}
