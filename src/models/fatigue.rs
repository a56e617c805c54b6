// ABOUTME: Ultra fatigue prediction inputs and outputs for race scenarios
// ABOUTME: Scalar race/athlete parameters in, clamped fatigue factors and breakdowns out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Scalar race and athlete parameters for a fatigue prediction.
///
/// No stream input: the predictor is a pure function of these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceScenario {
    /// Race distance, kilometers
    pub distance_km: f64,
    /// Total course elevation gain, meters
    pub elevation_gain_m: f64,
    /// Expected time on course in hours; estimated from distance when absent
    pub expected_duration_hours: Option<f64>,
    /// Forecast temperature, degrees Celsius
    pub temperature_celsius: f64,
    /// Forecast relative humidity, percent
    pub humidity_percent: f64,
    /// Whether the race includes running through the night
    pub night_section: bool,
    /// Longest ultra distance the athlete has completed, kilometers
    pub longest_ultra_km: f64,
    /// Number of ultras the athlete has completed
    pub ultra_count: u32,
    /// Current readiness score, 0-100
    pub readiness_score: f64,
}

/// Weighted sub-factor contributions behind a fatigue factor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueBreakdown {
    /// Distance contribution
    pub distance: f64,
    /// Time-on-course contribution
    pub time: f64,
    /// Elevation gain contribution
    pub elevation: f64,
    /// Heat and humidity contribution
    pub heat: f64,
    /// Night running contribution
    pub night: f64,
    /// Inexperience contribution
    pub inexperience: f64,
}

/// Pure-function fatigue prediction for one race scenario.
///
/// Recomputed per query; never persisted by this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueResult {
    /// Multiplicative pace penalty, >= 1.0 and capped at 1.60
    pub fatigue_factor: f64,
    /// Weighted sub-factor contributions
    pub breakdown: FatigueBreakdown,
    /// Readiness amplification that was applied (>= 1.0)
    pub readiness_multiplier: f64,
    /// Experience discount that was applied, within [0.35, 1.0]
    pub experience_discount: f64,
    /// Prediction confidence, clamped to [20, 95]
    pub confidence: f64,
}

/// Finish-time estimate with named components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishTimeEstimate {
    /// Baseline estimate before adjustments, hours
    pub baseline_hours: f64,
    /// Additional hours from the fatigue factor
    pub fatigue_adjustment_hours: f64,
    /// Cumulative aid-station stop time, hours
    pub aid_station_hours: f64,
    /// Night-section slowdown, hours
    pub night_penalty_hours: f64,
    /// Heat slowdown beyond the fatigue factor, hours
    pub heat_penalty_hours: f64,
    /// Total predicted finish time, hours
    pub total_hours: f64,
    /// Fatigue factor the estimate was built from
    pub fatigue_factor: f64,
}

/// One course segment for the progression variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSegment {
    /// Segment length, kilometers
    pub distance_km: f64,
    /// Elevation gained within the segment, meters
    pub elevation_gain_m: f64,
}

/// Warning level for one projected course segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarningLevel {
    /// Within sustainable limits
    None,
    /// Pace decay above the caution threshold
    Caution,
    /// Pace decay above the warning threshold
    Warning,
    /// Glycogen depletion beyond the critical threshold
    Critical,
}

/// Projected state at the end of one course segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentProjection {
    /// Index of the course segment, starting at 0
    pub segment_index: usize,
    /// Cumulative distance at segment end, kilometers
    pub cumulative_distance_km: f64,
    /// Cumulative elevation gain at segment end, meters
    pub cumulative_elevation_gain_m: f64,
    /// Estimated glycogen depletion at segment end, percent (0-100)
    pub glycogen_depletion_percent: f64,
    /// Estimated pace decay at segment end, percent above fresh pace
    pub pace_decay_percent: f64,
    /// Warning level at segment end
    pub warning: WarningLevel,
}
