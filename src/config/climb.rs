// ABOUTME: Climb detection configuration covering candidate, merge, and significance thresholds
// ABOUTME: Also carries the weighted grade/gain difficulty scoring constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Climb detection configuration.
///
/// Detection is deliberately two-stage: raw candidates above the grade
/// threshold are merged across short interruptions before the significance
/// filter runs. Merging first keeps GPS noise from fragmenting one real
/// climb into many tiny ones; the significance filter then drops trivial
/// bumps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbConfig {
    /// Grade above which the stream is in a climbing state, percent
    pub climb_grade_threshold_percent: f64,

    /// Candidates shorter than this are discarded before merging, meters
    pub min_candidate_distance_m: f64,

    /// Adjacent candidates separated by less than this much non-climb
    /// distance are merged into one climb, meters
    pub merge_gap_max_m: f64,

    /// Minimum elevation gain for a merged climb to be significant, meters
    pub min_significant_gain_m: f64,

    /// Minimum distance for a merged climb to be significant, meters
    pub min_significant_distance_m: f64,

    /// Minimum climbs with nonzero VAM before fatigue-slope fields are
    /// reported
    pub min_climbs_for_fatigue: usize,

    /// Weight on average grade in the difficulty score
    pub difficulty_grade_weight: f64,

    /// Divisor turning elevation gain into difficulty score points
    pub difficulty_gain_divisor: f64,

    /// Difficulty score below which a climb is easy
    pub difficulty_easy_max: f64,

    /// Difficulty score below which a climb is moderate
    pub difficulty_moderate_max: f64,

    /// Difficulty score below which a climb is hard; above is extreme
    pub difficulty_hard_max: f64,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            climb_grade_threshold_percent: 3.0,
            min_candidate_distance_m: 50.0,
            merge_gap_max_m: 50.0,
            min_significant_gain_m: 80.0,
            min_significant_distance_m: 400.0,
            min_climbs_for_fatigue: 3,
            difficulty_grade_weight: 2.0,
            difficulty_gain_divisor: 50.0,
            difficulty_easy_max: 10.0,
            difficulty_moderate_max: 20.0,
            difficulty_hard_max: 35.0,
        }
    }
}

impl ClimbConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value found.
    pub fn validate(&self) -> AppResult<()> {
        if self.climb_grade_threshold_percent <= 0.0 {
            return Err(AppError::config_invalid(
                "climb_grade_threshold_percent must be > 0",
            ));
        }
        if self.min_candidate_distance_m <= 0.0 || self.merge_gap_max_m < 0.0 {
            return Err(AppError::config_invalid(
                "candidate and merge distances must be positive",
            ));
        }
        if self.min_significant_gain_m <= 0.0 || self.min_significant_distance_m <= 0.0 {
            return Err(AppError::config_invalid(
                "significance thresholds must be > 0",
            ));
        }
        if self.min_climbs_for_fatigue < 2 {
            return Err(AppError::config_invalid(
                "min_climbs_for_fatigue must be >= 2 for a regression to exist",
            ));
        }
        if self.difficulty_easy_max >= self.difficulty_moderate_max
            || self.difficulty_moderate_max >= self.difficulty_hard_max
        {
            return Err(AppError::config_invalid(
                "difficulty thresholds must be strictly increasing",
            ));
        }
        Ok(())
    }
}
