// ABOUTME: Raw activity stream inputs supplied by the activity-record collaborator
// ABOUTME: Parallel distance/elevation/heart-rate sequences plus activity scalars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw recording streams for one activity.
///
/// The three sequences are parallel and indexed identically. Distance is
/// cumulative meters from the start and monotonically non-decreasing;
/// elevation is meters above sea level as reported by the device. Heart rate
/// is optional since not every device supplies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityStreams {
    /// Provider-scoped activity identifier
    pub activity_id: String,
    /// Owning athlete
    pub user_id: Uuid,
    /// When the activity started
    pub start_date: DateTime<Utc>,
    /// Cumulative distance in meters, monotonically non-decreasing
    pub distance_meters: Vec<f64>,
    /// Elevation in meters, same length as `distance_meters`
    pub elevation_meters: Vec<f64>,
    /// Heart rate in bpm, same length as `distance_meters` when present
    pub heart_rate_bpm: Option<Vec<f64>>,
    /// Total moving duration of the activity in minutes
    pub total_duration_minutes: f64,
    /// Total activity distance in kilometers
    pub total_distance_km: f64,
}

impl ActivityStreams {
    /// Whether the streams carry enough signal to attempt terrain analysis.
    ///
    /// Requires parallel distance/elevation sequences of length >= 2 (and a
    /// matching heart-rate sequence when one is present) plus positive
    /// duration and distance. Anything less is "flat or bad data", handled
    /// by callers as a normal no-analysis branch.
    #[must_use]
    pub fn has_analyzable_streams(&self) -> bool {
        let len = self.distance_meters.len();
        if len < 2 || self.elevation_meters.len() != len {
            return false;
        }
        if let Some(hr) = &self.heart_rate_bpm {
            if hr.len() != len {
                return false;
            }
        }
        self.total_duration_minutes > 0.0 && self.total_distance_km > 0.0
    }

    /// Elevation range (max - min) across the whole recording, in meters
    #[must_use]
    pub fn elevation_range_m(&self) -> f64 {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &e in &self.elevation_meters {
            if e < min {
                min = e;
            }
            if e > max {
                max = e;
            }
        }
        if min.is_finite() && max.is_finite() {
            max - min
        } else {
            0.0
        }
    }
}
