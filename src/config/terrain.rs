// ABOUTME: Terrain segmentation configuration covering smoothing, windows, and effort weights
// ABOUTME: Carries the tuned grade-dependent effort multiplier table used for time allocation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::GradeBucket;
use serde::{Deserialize, Serialize};

/// Grade-dependent effort multipliers for duration allocation.
///
/// Segment durations are allocated proportionally to distance × multiplier
/// rather than raw distance, crediting time spent climbing. The table is
/// empirically tuned; very steep descents cost more than gentle ones because
/// they are not free speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffortMultipliers {
    /// Flat terrain baseline
    pub flat: f64,
    /// Uphill 2-4%
    pub up_2_4: f64,
    /// Uphill 4-6%
    pub up_4_6: f64,
    /// Uphill 6-8%
    pub up_6_8: f64,
    /// Uphill 8-10%
    pub up_8_10: f64,
    /// Uphill 10-12%
    pub up_10_12: f64,
    /// Uphill 12-15%
    pub up_12_15: f64,
    /// Uphill 15-20%
    pub up_15_20: f64,
    /// Uphill at or above 20%
    pub up_20_plus: f64,
    /// Downhill 2-4%
    pub down_2_4: f64,
    /// Downhill 4-6%
    pub down_4_6: f64,
    /// Downhill 6-8%
    pub down_6_8: f64,
    /// Downhill 8-10%
    pub down_8_10: f64,
    /// Downhill 10-12%
    pub down_10_12: f64,
    /// Downhill 12-15%
    pub down_12_15: f64,
    /// Downhill 15-20%
    pub down_15_20: f64,
    /// Downhill at or below -20%
    pub down_20_plus: f64,
}

impl Default for EffortMultipliers {
    fn default() -> Self {
        Self {
            flat: 1.0,
            up_2_4: 1.3,
            up_4_6: 1.5,
            up_6_8: 1.65,
            up_8_10: 1.8,
            up_10_12: 1.95,
            up_12_15: 2.1,
            up_15_20: 2.3,
            up_20_plus: 2.5,
            down_2_4: 0.85,
            down_4_6: 0.88,
            down_6_8: 0.92,
            down_8_10: 0.98,
            down_10_12: 1.05,
            down_12_15: 1.12,
            down_15_20: 1.2,
            down_20_plus: 1.3,
        }
    }
}

impl EffortMultipliers {
    /// Multiplier for a grade bucket
    #[must_use]
    pub const fn for_bucket(&self, bucket: GradeBucket) -> f64 {
        match bucket {
            GradeBucket::Flat => self.flat,
            GradeBucket::Up2To4 => self.up_2_4,
            GradeBucket::Up4To6 => self.up_4_6,
            GradeBucket::Up6To8 => self.up_6_8,
            GradeBucket::Up8To10 => self.up_8_10,
            GradeBucket::Up10To12 => self.up_10_12,
            GradeBucket::Up12To15 => self.up_12_15,
            GradeBucket::Up15To20 => self.up_15_20,
            GradeBucket::Up20Plus => self.up_20_plus,
            GradeBucket::Down2To4 => self.down_2_4,
            GradeBucket::Down4To6 => self.down_4_6,
            GradeBucket::Down6To8 => self.down_6_8,
            GradeBucket::Down8To10 => self.down_8_10,
            GradeBucket::Down10To12 => self.down_10_12,
            GradeBucket::Down12To15 => self.down_12_15,
            GradeBucket::Down15To20 => self.down_15_20,
            GradeBucket::Down20Plus => self.down_20_plus,
        }
    }
}

/// Terrain segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Half-width of the symmetric elevation smoothing window (2 = 5-point)
    pub smoothing_half_width: usize,

    /// Target cumulative distance per rolling grade window, meters.
    /// Windows grow sample by sample until they reach this, which keeps
    /// grade estimates stable under irregular GPS sampling rates.
    pub window_target_distance_m: f64,

    /// Windows shorter than this carry too little signal and are skipped
    pub min_window_distance_m: f64,

    /// Absolute floor for the whole-activity elevation range gate, meters
    pub min_elevation_range_floor_m: f64,

    /// Distance-scaled component of the elevation range gate, meters per km.
    /// An activity is analyzed only when its elevation range reaches
    /// max(floor, `per_km` × total km); otherwise it is flat or bad data.
    pub min_elevation_range_m_per_km: f64,

    /// Grade-dependent effort multiplier table
    pub effort: EffortMultipliers,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            smoothing_half_width: 2,
            window_target_distance_m: 150.0,
            min_window_distance_m: 10.0,
            min_elevation_range_floor_m: 10.0,
            min_elevation_range_m_per_km: 10.0,
            effort: EffortMultipliers::default(),
        }
    }
}

impl TerrainConfig {
    /// Minimum elevation range required to analyze an activity of the given
    /// total distance, meters
    #[must_use]
    pub fn min_elevation_range_m(&self, total_distance_km: f64) -> f64 {
        self.min_elevation_range_floor_m
            .max(self.min_elevation_range_m_per_km * total_distance_km)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value found.
    pub fn validate(&self) -> AppResult<()> {
        if self.window_target_distance_m <= 0.0 {
            return Err(AppError::config_invalid(
                "window_target_distance_m must be > 0",
            ));
        }
        if self.min_window_distance_m <= 0.0
            || self.min_window_distance_m > self.window_target_distance_m
        {
            return Err(AppError::config_invalid(
                "min_window_distance_m must be > 0 and <= window_target_distance_m",
            ));
        }
        if self.min_elevation_range_floor_m < 0.0 || self.min_elevation_range_m_per_km < 0.0 {
            return Err(AppError::config_invalid(
                "elevation range thresholds must be >= 0",
            ));
        }
        for bucket in GradeBucket::ALL {
            if self.effort.for_bucket(bucket) <= 0.0 {
                return Err(AppError::config_invalid(format!(
                    "effort multiplier for {} must be > 0",
                    bucket.key()
                )));
            }
        }
        Ok(())
    }
}
