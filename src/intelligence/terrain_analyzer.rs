// ABOUTME: Terrain segmentation over rolling distance windows with grade-bucket classification
// ABOUTME: Allocates activity duration across segments by effort, not raw distance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Terrain segmentation.
//!
//! The stream is walked with a rolling window sized to a target distance
//! (not a fixed sample count — GPS sampling rate is irregular). Each window
//! gets a grade and a grade bucket; a segment boundary is emitted whenever
//! the bucket changes. Durations are then allocated proportionally to an
//! effort score (distance × grade multiplier) so time spent climbing is
//! credited instead of being spread evenly per kilometer.

use crate::config::TerrainConfig;
use crate::models::{
    ActivityStreams, GradeBucket, TerrainAnalysis, TerrainSegment, TerrainType,
    TerrainTypeSummary,
};
use chrono::Utc;
use rayon::prelude::*;
use tracing::debug;

use super::preprocessing::smooth_elevation;

/// One rolling grade window over the stream
#[derive(Debug, Clone, Copy)]
pub(crate) struct GradeWindow {
    /// Index of the first sample in the window
    pub start_idx: usize,
    /// Index of the last sample in the window
    pub end_idx: usize,
    /// Cumulative distance at the window start, meters
    pub start_distance_m: f64,
    /// Cumulative distance at the window end, meters
    pub end_distance_m: f64,
    /// Window length, meters
    pub distance_m: f64,
    /// Grade over the window, percent
    pub grade_percent: f64,
    /// Bucket the grade classifies into
    pub bucket: GradeBucket,
}

/// Walk the stream with rolling distance-target windows and classify each.
///
/// Windows shorter than the configured minimum carry too little signal and
/// are dropped. Elevation must already be smoothed.
pub(crate) fn grade_windows(
    distance_meters: &[f64],
    smoothed_elevation: &[f64],
    config: &TerrainConfig,
) -> Vec<GradeWindow> {
    let n = distance_meters.len();
    let mut windows = Vec::new();
    let mut i = 0;

    while i + 1 < n {
        let mut j = i + 1;
        while j < n - 1 && distance_meters[j] - distance_meters[i] < config.window_target_distance_m
        {
            j += 1;
        }

        let window_distance = distance_meters[j] - distance_meters[i];
        if window_distance >= config.min_window_distance_m {
            let grade =
                (smoothed_elevation[j] - smoothed_elevation[i]) / window_distance * 100.0;
            windows.push(GradeWindow {
                start_idx: i,
                end_idx: j,
                start_distance_m: distance_meters[i],
                end_distance_m: distance_meters[j],
                distance_m: window_distance,
                grade_percent: grade,
                bucket: GradeBucket::classify(grade),
            });
        }
        i = j;
    }

    windows
}

/// Total effort across all windows: Σ distance × grade multiplier
pub(crate) fn total_window_effort(windows: &[GradeWindow], config: &TerrainConfig) -> f64 {
    windows
        .iter()
        .map(|w| w.distance_m / 1000.0 * config.effort.for_bucket(w.bucket))
        .sum()
}

/// Terrain segmentation engine
#[derive(Debug, Clone)]
pub struct TerrainAnalyzer {
    config: TerrainConfig,
}

impl TerrainAnalyzer {
    /// Create an analyzer with the given configuration
    #[must_use]
    pub const fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    /// Analyze one activity's streams into a terrain breakdown.
    ///
    /// Returns `None` when the streams carry no terrain signal: missing or
    /// mismatched sequences, or a whole-activity elevation range below
    /// max(floor, per-km × distance). That is a normal branch for callers,
    /// not an error, and deliberately not a degenerate all-flat result.
    #[must_use]
    pub fn analyze(&self, streams: &ActivityStreams) -> Option<TerrainAnalysis> {
        if !streams.has_analyzable_streams() {
            debug!(
                activity_id = %streams.activity_id,
                "streams missing or too short for terrain analysis"
            );
            return None;
        }

        let min_range = self.config.min_elevation_range_m(streams.total_distance_km);
        let range = streams.elevation_range_m();
        if range < min_range {
            debug!(
                activity_id = %streams.activity_id,
                elevation_range_m = range,
                required_m = min_range,
                "elevation range below threshold, treating as flat or bad data"
            );
            return None;
        }

        let smoothed =
            smooth_elevation(&streams.elevation_meters, self.config.smoothing_half_width);
        let windows = grade_windows(&streams.distance_meters, &smoothed, &self.config);
        if windows.is_empty() {
            debug!(
                activity_id = %streams.activity_id,
                "no usable grade windows in stream"
            );
            return None;
        }

        let segments = self.build_segments(&windows, &smoothed, streams.total_duration_minutes);
        if segments.is_empty() {
            return None;
        }

        let (uphill, downhill, flat) = summarize_types(&segments);
        let (total_gain, total_loss) = elevation_totals(&smoothed);

        Some(TerrainAnalysis {
            activity_id: streams.activity_id.clone(),
            user_id: streams.user_id,
            start_date: streams.start_date,
            total_distance_km: streams.total_distance_km,
            total_duration_minutes: streams.total_duration_minutes,
            total_elevation_gain_m: total_gain,
            total_elevation_loss_m: total_loss,
            uphill,
            downhill,
            flat,
            segments,
            analyzed_at: Utc::now(),
        })
    }

    /// Analyze a batch of activities in parallel.
    ///
    /// Each activity is independent; results keep input order. Entries are
    /// `None` for activities without terrain signal.
    #[must_use]
    pub fn analyze_batch(&self, streams: &[ActivityStreams]) -> Vec<Option<TerrainAnalysis>> {
        streams.par_iter().map(|s| self.analyze(s)).collect()
    }

    /// Merge consecutive same-bucket windows into segments and allocate the
    /// activity duration across them by effort share.
    fn build_segments(
        &self,
        windows: &[GradeWindow],
        smoothed_elevation: &[f64],
        total_duration_minutes: f64,
    ) -> Vec<TerrainSegment> {
        struct Draft {
            bucket: GradeBucket,
            distance_m: f64,
            grade_dot_distance: f64,
            gain_m: f64,
            loss_m: f64,
        }

        let mut drafts: Vec<Draft> = Vec::new();
        for window in windows {
            let (gain, loss) = window_elevation_deltas(window, smoothed_elevation);
            let starts_new = drafts.last().map_or(true, |d| d.bucket != window.bucket);
            if starts_new {
                drafts.push(Draft {
                    bucket: window.bucket,
                    distance_m: 0.0,
                    grade_dot_distance: 0.0,
                    gain_m: 0.0,
                    loss_m: 0.0,
                });
            }
            if let Some(draft) = drafts.last_mut() {
                draft.distance_m += window.distance_m;
                draft.grade_dot_distance += window.grade_percent * window.distance_m;
                draft.gain_m += gain;
                draft.loss_m += loss;
            }
        }

        let total_effort: f64 = drafts
            .iter()
            .map(|d| d.distance_m / 1000.0 * self.config.effort.for_bucket(d.bucket))
            .sum();
        if total_effort <= 0.0 {
            return Vec::new();
        }

        drafts
            .into_iter()
            .map(|draft| {
                let distance_km = draft.distance_m / 1000.0;
                let effort = distance_km * self.config.effort.for_bucket(draft.bucket);
                let duration = total_duration_minutes * effort / total_effort;
                TerrainSegment {
                    terrain_type: draft.bucket.terrain_type(),
                    grade_bucket: draft.bucket,
                    distance_km,
                    avg_grade_percent: draft.grade_dot_distance / draft.distance_m,
                    elevation_gain_m: draft.gain_m,
                    elevation_loss_m: draft.loss_m,
                    duration_minutes: duration,
                    pace_min_per_km: duration / distance_km,
                }
            })
            .collect()
    }
}

fn window_elevation_deltas(window: &GradeWindow, smoothed_elevation: &[f64]) -> (f64, f64) {
    let mut gain = 0.0;
    let mut loss = 0.0;
    for k in window.start_idx..window.end_idx {
        let delta = smoothed_elevation[k + 1] - smoothed_elevation[k];
        if delta > 0.0 {
            gain += delta;
        } else {
            loss -= delta;
        }
    }
    (gain, loss)
}

fn elevation_totals(smoothed_elevation: &[f64]) -> (f64, f64) {
    let mut gain = 0.0;
    let mut loss = 0.0;
    for pair in smoothed_elevation.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain += delta;
        } else {
            loss -= delta;
        }
    }
    (gain, loss)
}

fn summarize_types(
    segments: &[TerrainSegment],
) -> (TerrainTypeSummary, TerrainTypeSummary, TerrainTypeSummary) {
    let mut uphill = TerrainTypeSummary::default();
    let mut downhill = TerrainTypeSummary::default();
    let mut flat = TerrainTypeSummary::default();

    for segment in segments {
        let summary = match segment.terrain_type {
            TerrainType::Uphill => &mut uphill,
            TerrainType::Downhill => &mut downhill,
            TerrainType::Flat => &mut flat,
        };
        summary.distance_km += segment.distance_km;
        summary.duration_minutes += segment.duration_minutes;
    }

    for summary in [&mut uphill, &mut downhill, &mut flat] {
        if summary.distance_km > 0.0 {
            summary.pace_min_per_km = Some(summary.duration_minutes / summary.distance_km);
        }
    }

    (uphill, downhill, flat)
}
