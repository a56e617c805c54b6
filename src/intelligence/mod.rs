// ABOUTME: Analysis algorithms for terrain segmentation, climbs, pace profiles, and fatigue
// ABOUTME: Pure synchronous math; the profile service is the only async surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! The analysis pipeline, leaves first:
//!
//! 1. [`preprocessing`] smooths noisy elevation before any slope math.
//! 2. [`terrain_analyzer`] segments the stream into grade-bucket terrain
//!    segments with effort-weighted time allocation.
//! 3. [`climb_detection`] finds sustained climbs and computes VAM and the
//!    within-activity fatigue slope.
//! 4. [`pace_profile`] aggregates many historical terrain analyses into a
//!    personalized pace-by-grade profile.
//! 5. [`ultra_fatigue`] predicts pace decay and finish time for
//!    ultra-distance race scenarios from scalar inputs.
//!
//! [`profile_service`] wraps the aggregator with cached serving and
//! fire-and-forget staleness recomputation on top of the storage seam.

/// Sustained climb detection, VAM, and fatigue slope
pub mod climb_detection;
/// Pace-by-grade profile aggregation
pub mod pace_profile;
/// Elevation stream smoothing
pub mod preprocessing;
/// Cached profile serving with background recomputation
pub mod profile_service;
/// Shared statistical primitives
pub mod statistics;
/// Terrain segmentation and effort-weighted time allocation
pub mod terrain_analyzer;
/// Ultra-distance fatigue and finish-time model
pub mod ultra_fatigue;

pub use climb_detection::{merge_candidates, ClimbCandidate, ClimbDetector};
pub use pace_profile::PaceProfileCalculator;
pub use profile_service::PaceProfileService;
pub use terrain_analyzer::TerrainAnalyzer;
pub use ultra_fatigue::UltraFatiguePredictor;
