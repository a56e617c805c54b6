// ABOUTME: Personalized pace-by-grade profile derived from historical activity terrain data
// ABOUTME: Persisted one per athlete with sample counts and confidence tiers per bucket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::terrain::GradeBucket;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Confidence tier for one grade bucket, a monotone function of sample size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    /// At least the high-confidence sample count
    High,
    /// At least the medium-confidence sample count
    Medium,
    /// Fewer samples than the medium threshold
    Low,
}

impl ConfidenceTier {
    /// Derive the tier from a post-filter sample count and the configured
    /// thresholds
    #[must_use]
    pub const fn from_sample_count(count: usize, high: usize, medium: usize) -> Self {
        if count >= high {
            Self::High
        } else if count >= medium {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Overall data quality of a computed profile, from per-terrain-type coverage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    /// Uphill, downhill, and flat all well covered
    Excellent,
    /// Two terrain types well covered
    Good,
    /// One terrain type well covered
    Fair,
    /// No terrain type well covered
    Insufficient,
}

/// Selected pace for one grade bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradePaceEntry {
    /// Selected pace, min/km
    pub pace_min_per_km: f64,
    /// Post-filter sample count behind the selection
    pub sample_count: usize,
    /// Confidence tier for this bucket
    pub confidence: ConfidenceTier,
}

/// Per-athlete pace profile, persisted keyed by athlete identity.
///
/// Buckets without enough qualifying segments are omitted from
/// `bucket_paces`; consumers fall back to the coarse uphill/downhill
/// adjustment factors for those grades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaceProfile {
    /// Owning athlete
    pub user_id: Uuid,
    /// Base flat pace, min/km
    pub base_flat_pace_min_per_km: f64,
    /// Ratio of aggregate uphill pace to flat pace (> 1 means slower uphill)
    pub uphill_factor: f64,
    /// Ratio of aggregate downhill pace to flat pace (< 1 means faster downhill)
    pub downhill_factor: f64,
    /// Selected pace per grade bucket, only buckets with enough samples
    pub bucket_paces: BTreeMap<GradeBucket, GradePaceEntry>,
    /// Number of historical activities that contributed
    pub activities_used: usize,
    /// Number of terrain segments pooled across those activities
    pub segments_used: usize,
    /// Coverage-based quality tier
    pub data_quality: DataQuality,
    /// When this profile was computed
    pub calculated_at: DateTime<Utc>,
}

impl PaceProfile {
    /// Age of this profile relative to `now`, in whole days
    #[must_use]
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.calculated_at).num_days()
    }
}
