// ABOUTME: Grade bucket partition, terrain segments, and per-activity terrain analysis
// ABOUTME: Defines the fixed grade-axis partition every pipeline stage classifies against
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse terrain classification derived from the grade bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    /// Grade above +2%
    Uphill,
    /// Grade below -2%
    Downhill,
    /// Grade within ±2%
    Flat,
}

/// One discrete band in the fixed partition of the grade axis.
///
/// The partition is total and mutually exclusive: flat spans ±2%, eight
/// uphill bands cover 2% to >=20%, and eight mirrored downhill bands cover
/// -2% to <=-20%. Boundary values resolve toward the steeper bucket, so a
/// grade of exactly 2.0% classifies as `Up2To4` and exactly -20.0% as
/// `Down20Plus`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum GradeBucket {
    /// Grade <= -20%
    Down20Plus,
    /// -20% < grade <= -15%
    Down15To20,
    /// -15% < grade <= -12%
    Down12To15,
    /// -12% < grade <= -10%
    Down10To12,
    /// -10% < grade <= -8%
    Down8To10,
    /// -8% < grade <= -6%
    Down6To8,
    /// -6% < grade <= -4%
    Down4To6,
    /// -4% < grade <= -2%
    Down2To4,
    /// -2% < grade < 2%
    Flat,
    /// 2% <= grade < 4%
    Up2To4,
    /// 4% <= grade < 6%
    Up4To6,
    /// 6% <= grade < 8%
    Up6To8,
    /// 8% <= grade < 10%
    Up8To10,
    /// 10% <= grade < 12%
    Up10To12,
    /// 12% <= grade < 15%
    Up12To15,
    /// 15% <= grade < 20%
    Up15To20,
    /// Grade >= 20%
    Up20Plus,
}

impl GradeBucket {
    /// All buckets in ascending grade order
    pub const ALL: [Self; 17] = [
        Self::Down20Plus,
        Self::Down15To20,
        Self::Down12To15,
        Self::Down10To12,
        Self::Down8To10,
        Self::Down6To8,
        Self::Down4To6,
        Self::Down2To4,
        Self::Flat,
        Self::Up2To4,
        Self::Up4To6,
        Self::Up6To8,
        Self::Up8To10,
        Self::Up10To12,
        Self::Up12To15,
        Self::Up15To20,
        Self::Up20Plus,
    ];

    /// Classify a percent grade into its bucket.
    ///
    /// Total over all finite grades; boundary ties resolve toward the
    /// steeper bucket.
    #[must_use]
    pub fn classify(grade_percent: f64) -> Self {
        if grade_percent >= 20.0 {
            Self::Up20Plus
        } else if grade_percent >= 15.0 {
            Self::Up15To20
        } else if grade_percent >= 12.0 {
            Self::Up12To15
        } else if grade_percent >= 10.0 {
            Self::Up10To12
        } else if grade_percent >= 8.0 {
            Self::Up8To10
        } else if grade_percent >= 6.0 {
            Self::Up6To8
        } else if grade_percent >= 4.0 {
            Self::Up4To6
        } else if grade_percent >= 2.0 {
            Self::Up2To4
        } else if grade_percent <= -20.0 {
            Self::Down20Plus
        } else if grade_percent <= -15.0 {
            Self::Down15To20
        } else if grade_percent <= -12.0 {
            Self::Down12To15
        } else if grade_percent <= -10.0 {
            Self::Down10To12
        } else if grade_percent <= -8.0 {
            Self::Down8To10
        } else if grade_percent <= -6.0 {
            Self::Down6To8
        } else if grade_percent <= -4.0 {
            Self::Down4To6
        } else if grade_percent <= -2.0 {
            Self::Down2To4
        } else {
            Self::Flat
        }
    }

    /// Coarse terrain type for this bucket
    #[must_use]
    pub const fn terrain_type(self) -> TerrainType {
        match self {
            Self::Flat => TerrainType::Flat,
            Self::Up2To4
            | Self::Up4To6
            | Self::Up6To8
            | Self::Up8To10
            | Self::Up10To12
            | Self::Up12To15
            | Self::Up15To20
            | Self::Up20Plus => TerrainType::Uphill,
            _ => TerrainType::Downhill,
        }
    }

    /// Stable string key for persistence and display
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Down20Plus => "down_20_plus",
            Self::Down15To20 => "down_15_20",
            Self::Down12To15 => "down_12_15",
            Self::Down10To12 => "down_10_12",
            Self::Down8To10 => "down_8_10",
            Self::Down6To8 => "down_6_8",
            Self::Down4To6 => "down_4_6",
            Self::Down2To4 => "down_2_4",
            Self::Flat => "flat",
            Self::Up2To4 => "up_2_4",
            Self::Up4To6 => "up_4_6",
            Self::Up6To8 => "up_6_8",
            Self::Up8To10 => "up_8_10",
            Self::Up10To12 => "up_10_12",
            Self::Up12To15 => "up_12_15",
            Self::Up15To20 => "up_15_20",
            Self::Up20Plus => "up_20_plus",
        }
    }
}

/// A maximal run of consecutive stream windows sharing one grade bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainSegment {
    /// Coarse terrain type derived from the grade bucket
    pub terrain_type: TerrainType,
    /// Grade bucket the segment's windows classified into
    pub grade_bucket: GradeBucket,
    /// Segment distance in kilometers
    pub distance_km: f64,
    /// Average grade across the segment, percent
    pub avg_grade_percent: f64,
    /// Total elevation gained within the segment, meters
    pub elevation_gain_m: f64,
    /// Total elevation lost within the segment, meters (positive value)
    pub elevation_loss_m: f64,
    /// Effort-weighted share of the activity duration, minutes
    pub duration_minutes: f64,
    /// Derived pace over the segment, min/km
    pub pace_min_per_km: f64,
}

/// Aggregate distance/duration/pace for one terrain type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainTypeSummary {
    /// Total distance in kilometers
    pub distance_km: f64,
    /// Total allocated duration in minutes
    pub duration_minutes: f64,
    /// Distance-weighted pace in min/km, absent when no distance was covered
    pub pace_min_per_km: Option<f64>,
}

/// Per-activity terrain breakdown, persisted keyed by activity identity.
///
/// Re-analysis of the same activity overwrites the previous record
/// (idempotent upsert), never duplicates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainAnalysis {
    /// Provider-scoped activity identifier
    pub activity_id: String,
    /// Owning athlete
    pub user_id: Uuid,
    /// When the activity started
    pub start_date: DateTime<Utc>,
    /// Total activity distance in kilometers
    pub total_distance_km: f64,
    /// Total activity duration in minutes
    pub total_duration_minutes: f64,
    /// Total elevation gained, meters
    pub total_elevation_gain_m: f64,
    /// Total elevation lost, meters (positive value)
    pub total_elevation_loss_m: f64,
    /// Uphill totals
    pub uphill: TerrainTypeSummary,
    /// Downhill totals
    pub downhill: TerrainTypeSummary,
    /// Flat totals
    pub flat: TerrainTypeSummary,
    /// Ordered terrain segments
    pub segments: Vec<TerrainSegment>,
    /// When this analysis was computed
    pub analyzed_at: DateTime<Utc>,
}
