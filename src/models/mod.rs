// ABOUTME: Data models for stream inputs and derived terrain/pace/fatigue records
// ABOUTME: Shared structures produced and consumed across the analysis pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models for the terrain intelligence engine.
//!
//! Inputs arrive as [`ActivityStreams`] from the activity-record
//! collaborator; the engine produces [`TerrainAnalysis`] records (persisted,
//! one per activity), [`PaceProfile`] records (persisted, one per athlete),
//! and read-only [`ClimbAnalysis`] / [`FatigueResult`] query results.

/// Raw activity stream inputs
pub mod activity;
/// Sustained climbs, VAM, and within-activity fatigue
pub mod climb;
/// Ultra fatigue prediction inputs and outputs
pub mod fatigue;
/// Personalized pace-by-grade profiles
pub mod profile;
/// Grade buckets and terrain segmentation records
pub mod terrain;

pub use activity::ActivityStreams;
pub use climb::{ClimbAnalysis, ClimbDifficulty, ClimbSegment, VamFatigue};
pub use fatigue::{
    CourseSegment, FatigueBreakdown, FatigueResult, FinishTimeEstimate, RaceScenario,
    SegmentProjection, WarningLevel,
};
pub use profile::{ConfidenceTier, DataQuality, GradePaceEntry, PaceProfile};
pub use terrain::{
    GradeBucket, TerrainAnalysis, TerrainSegment, TerrainType, TerrainTypeSummary,
};
