// ABOUTME: Sustained climb detection with merge-tolerant candidates and significance filtering
// ABOUTME: Computes VAM per climb and a distance-weighted fatigue slope across climbs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Climb identification.
//!
//! A climb is a *state* — grade held above the threshold — not a single
//! grade-bucket window. Detection runs in two stages: raw candidates above
//! the grade threshold are merged across short interruptions, then a
//! significance filter keeps only climbs with enough gain and length.
//! Merging first keeps GPS noise from fragmenting one real climb; the filter
//! keeps trivial bumps out of the report.

use crate::config::{ClimbConfig, TerrainConfig};
use crate::models::{
    ActivityStreams, ClimbAnalysis, ClimbDifficulty, ClimbSegment, GradeBucket, VamFatigue,
};
use tracing::debug;

use super::preprocessing::smooth_elevation;
use super::statistics::weighted_linear_regression;
use super::terrain_analyzer::{grade_windows, total_window_effort};

/// A raw climb candidate before significance filtering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbCandidate {
    /// Distance from activity start where the candidate begins, meters
    pub start_distance_m: f64,
    /// Distance from activity start where the candidate ends, meters
    pub end_distance_m: f64,
    /// Elevation gained over the candidate, meters
    pub elevation_gain_m: f64,
}

impl ClimbCandidate {
    /// Candidate length, meters
    #[must_use]
    pub fn distance_m(&self) -> f64 {
        self.end_distance_m - self.start_distance_m
    }
}

/// Merge adjacent candidates separated by less than `max_gap_m` of
/// non-climb distance.
///
/// Idempotent: every gap in the output is at least `max_gap_m`, so running
/// the merge again changes nothing.
#[must_use]
pub fn merge_candidates(candidates: Vec<ClimbCandidate>, max_gap_m: f64) -> Vec<ClimbCandidate> {
    let mut merged: Vec<ClimbCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let bridges_gap = merged
            .last()
            .is_some_and(|previous| candidate.start_distance_m - previous.end_distance_m < max_gap_m);
        if bridges_gap {
            if let Some(previous) = merged.last_mut() {
                previous.end_distance_m = candidate.end_distance_m;
                previous.elevation_gain_m += candidate.elevation_gain_m;
            }
        } else {
            merged.push(candidate);
        }
    }
    merged
}

/// Climb detection engine
#[derive(Debug, Clone)]
pub struct ClimbDetector {
    terrain: TerrainConfig,
    config: ClimbConfig,
}

impl ClimbDetector {
    /// Create a detector with the given configurations
    #[must_use]
    pub const fn new(terrain: TerrainConfig, config: ClimbConfig) -> Self {
        Self { terrain, config }
    }

    /// Identify sustained climbs in one activity's streams.
    ///
    /// Returns `None` when the streams are missing or too short to scan;
    /// a valid but flat recording yields `Some` with an empty climb list.
    #[must_use]
    pub fn detect(&self, streams: &ActivityStreams) -> Option<ClimbAnalysis> {
        if !streams.has_analyzable_streams() {
            debug!(
                activity_id = %streams.activity_id,
                "streams missing or too short for climb detection"
            );
            return None;
        }

        let smoothed =
            smooth_elevation(&streams.elevation_meters, self.terrain.smoothing_half_width);
        let windows = grade_windows(&streams.distance_meters, &smoothed, &self.terrain);

        let mut candidates = Vec::new();
        let mut current: Option<ClimbCandidate> = None;
        for window in &windows {
            if window.grade_percent > self.config.climb_grade_threshold_percent {
                let gain =
                    (smoothed[window.end_idx] - smoothed[window.start_idx]).max(0.0);
                current = Some(match current {
                    Some(mut candidate) => {
                        candidate.end_distance_m = window.end_distance_m;
                        candidate.elevation_gain_m += gain;
                        candidate
                    }
                    None => ClimbCandidate {
                        start_distance_m: window.start_distance_m,
                        end_distance_m: window.end_distance_m,
                        elevation_gain_m: gain,
                    },
                });
            } else if let Some(candidate) = current.take() {
                candidates.push(candidate);
            }
        }
        if let Some(candidate) = current.take() {
            candidates.push(candidate);
        }

        candidates.retain(|c| c.distance_m() >= self.config.min_candidate_distance_m);
        let merged = merge_candidates(candidates, self.config.merge_gap_max_m);

        let significant: Vec<ClimbCandidate> =
            merged.into_iter().filter(|c| self.is_significant(c)).collect();

        let total_effort = total_window_effort(&windows, &self.terrain);
        let climbs: Vec<ClimbSegment> = if total_effort > 0.0 {
            significant
                .iter()
                .map(|c| self.build_climb(c, streams.total_duration_minutes, total_effort))
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            activity_id = %streams.activity_id,
            climbs = climbs.len(),
            "climb detection complete"
        );

        let fatigue = self.vam_fatigue(&climbs);
        Some(ClimbAnalysis {
            activity_id: streams.activity_id.clone(),
            climbs,
            fatigue,
        })
    }

    /// Whether a merged candidate clears the significance thresholds.
    ///
    /// Exact boundary values are retained: a climb of exactly the minimum
    /// gain and minimum distance is significant.
    #[must_use]
    pub fn is_significant(&self, candidate: &ClimbCandidate) -> bool {
        candidate.elevation_gain_m >= self.config.min_significant_gain_m
            && candidate.distance_m() >= self.config.min_significant_distance_m
    }

    fn build_climb(
        &self,
        candidate: &ClimbCandidate,
        total_duration_minutes: f64,
        total_effort: f64,
    ) -> ClimbSegment {
        let distance_m = candidate.distance_m();
        let avg_grade = candidate.elevation_gain_m / distance_m * 100.0;
        let bucket = GradeBucket::classify(avg_grade);

        let effort = distance_m / 1000.0 * self.terrain.effort.for_bucket(bucket);
        let duration_minutes = total_duration_minutes * effort / total_effort;
        let vam = if duration_minutes > 0.0 {
            candidate.elevation_gain_m / (duration_minutes / 60.0)
        } else {
            0.0
        };

        ClimbSegment {
            start_distance_m: candidate.start_distance_m,
            end_distance_m: candidate.end_distance_m,
            distance_m,
            elevation_gain_m: candidate.elevation_gain_m,
            avg_grade_percent: avg_grade,
            duration_minutes,
            vam_m_per_hour: vam,
            difficulty: self.difficulty(avg_grade, candidate.elevation_gain_m),
        }
    }

    fn difficulty(&self, avg_grade_percent: f64, gain_m: f64) -> ClimbDifficulty {
        let score = avg_grade_percent.mul_add(
            self.config.difficulty_grade_weight,
            gain_m / self.config.difficulty_gain_divisor,
        );
        if score < self.config.difficulty_easy_max {
            ClimbDifficulty::Easy
        } else if score < self.config.difficulty_moderate_max {
            ClimbDifficulty::Moderate
        } else if score < self.config.difficulty_hard_max {
            ClimbDifficulty::Hard
        } else {
            ClimbDifficulty::Extreme
        }
    }

    /// Distance-weighted VAM decline across the ordered climbs.
    ///
    /// Omitted (not zeroed) below the minimum climb count: a missing value
    /// means "not measurable", which downstream consumers treat differently
    /// from "no fatigue detected".
    fn vam_fatigue(&self, climbs: &[ClimbSegment]) -> Option<VamFatigue> {
        let with_vam: Vec<&ClimbSegment> =
            climbs.iter().filter(|c| c.vam_m_per_hour > 0.0).collect();
        if with_vam.len() < self.config.min_climbs_for_fatigue {
            return None;
        }

        let points: Vec<(f64, f64, f64)> = with_vam
            .iter()
            .enumerate()
            .map(|(order, climb)| {
                #[allow(clippy::cast_precision_loss)] // climb counts are tiny
                let x = order as f64;
                (x, climb.vam_m_per_hour, climb.distance_m)
            })
            .collect();
        let (slope, _intercept) = weighted_linear_regression(&points)?;

        let total_distance: f64 = with_vam.iter().map(|c| c.distance_m).sum();
        let mean_vam: f64 = with_vam
            .iter()
            .map(|c| c.vam_m_per_hour * c.distance_m)
            .sum::<f64>()
            / total_distance;
        if mean_vam <= 0.0 {
            return None;
        }

        let first = with_vam[0].vam_m_per_hour;
        let last = with_vam[with_vam.len() - 1].vam_m_per_hour;

        Some(VamFatigue {
            slope_percent_per_climb: slope / mean_vam * 100.0,
            first_to_last_dropoff_percent: (first - last) / first * 100.0,
            mean_vam_m_per_hour: mean_vam,
            climb_count: with_vam.len(),
        })
    }
}
