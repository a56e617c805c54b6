// ABOUTME: Sustained climb records with VAM and within-activity fatigue metrics
// ABOUTME: Climbs are a persistent state above 3% grade, distinct from bucket segmentation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Difficulty category for a retained climb
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClimbDifficulty {
    /// Short or gentle climb
    Easy,
    /// Noticeable sustained effort
    Moderate,
    /// Long or steep climb
    Hard,
    /// Exceptional gradient and gain
    Extreme,
}

impl ClimbDifficulty {
    /// Human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Easy => "easy climb",
            Self::Moderate => "moderate climb",
            Self::Hard => "hard climb",
            Self::Extreme => "extreme climb",
        }
    }
}

/// One sustained climb retained by the significance filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbSegment {
    /// Distance from activity start where the climb begins, meters
    pub start_distance_m: f64,
    /// Distance from activity start where the climb ends, meters
    pub end_distance_m: f64,
    /// Climb length, meters
    pub distance_m: f64,
    /// Elevation gained over the climb, meters
    pub elevation_gain_m: f64,
    /// Average grade over the climb, percent
    pub avg_grade_percent: f64,
    /// Effort-weighted share of the activity duration, minutes
    pub duration_minutes: f64,
    /// Vertical ascent rate, meters of gain per hour of climbing
    pub vam_m_per_hour: f64,
    /// Difficulty category from grade and gain
    pub difficulty: ClimbDifficulty,
}

/// VAM decline across the ordered climbs of one activity.
///
/// Only reported when at least three climbs with nonzero VAM exist; a
/// missing value means "not enough climbs to measure", which is different
/// from "no fatigue detected".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VamFatigue {
    /// Distance-weighted regression slope of VAM against climb order,
    /// expressed as percent of mean VAM per climb (negative = slowing down)
    pub slope_percent_per_climb: f64,
    /// Simple first-vs-last VAM dropoff, percent (positive = last climb slower)
    pub first_to_last_dropoff_percent: f64,
    /// Mean VAM across the retained climbs, m/h
    pub mean_vam_m_per_hour: f64,
    /// Number of climbs the regression was fit over
    pub climb_count: usize,
}

/// Read-only climb query result for one activity; never persisted here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbAnalysis {
    /// Provider-scoped activity identifier
    pub activity_id: String,
    /// Retained climbs in course order
    pub climbs: Vec<ClimbSegment>,
    /// VAM fatigue metrics, when measurable
    pub fatigue: Option<VamFatigue>,
}
