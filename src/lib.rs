// ABOUTME: Library entry point for the Pierre terrain intelligence engine
// ABOUTME: Turns raw GPS/elevation recordings into terrain, pace, and fatigue analytics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Terrain Intelligence
//!
//! Terrain-aware performance profiling and fatigue prediction for trail and
//! ultra runners. The engine transforms a raw distance/elevation/time
//! recording into:
//!
//! - a segmented terrain breakdown with effort-weighted time allocation,
//! - sustained-climb detection with VAM and within-activity fatigue slope,
//! - a personalized pace-by-grade profile aggregated over activity history,
//! - a nonlinear fatigue and finish-time model for ultra-distance efforts.
//!
//! ## Architecture
//!
//! - **Models**: stream inputs and derived analysis records
//! - **Config**: tuned analysis constants with environment overrides
//! - **Intelligence**: the analysis algorithms themselves
//! - **Storage**: pluggable persistence seam for analyses and profiles
//!
//! All analysis math is synchronous and side-effect-free; the only async
//! surface is the storage seam and the pace-profile service built on it.
//!
//! ## Example Usage
//!
//! ```rust
//! use pierre_terrain::config::EngineConfig;
//! use pierre_terrain::intelligence::terrain_analyzer::TerrainAnalyzer;
//! use pierre_terrain::models::ActivityStreams;
//! use chrono::Utc;
//! use uuid::Uuid;
//!
//! let config = EngineConfig::default();
//! let analyzer = TerrainAnalyzer::new(config.terrain);
//!
//! let streams = ActivityStreams {
//!     activity_id: "demo_1".to_owned(),
//!     user_id: Uuid::new_v4(),
//!     start_date: Utc::now(),
//!     distance_meters: (0..=100).map(|i| f64::from(i) * 100.0).collect(),
//!     elevation_meters: (0..=100).map(|i| f64::from(i % 50) * 8.0).collect(),
//!     heart_rate_bpm: None,
//!     total_duration_minutes: 75.0,
//!     total_distance_km: 10.0,
//! };
//!
//! if let Some(analysis) = analyzer.analyze(&streams) {
//!     println!("{} terrain segments", analysis.segments.len());
//! }
//! ```

/// Tuned analysis constants with environment overrides and validation
pub mod config;

/// Unified error handling for the engine
pub mod errors;

/// Terrain, climb, pace, and fatigue analysis algorithms
pub mod intelligence;

/// Stream inputs and derived analysis records
pub mod models;

/// Pluggable persistence seam for analyses and pace profiles
pub mod storage;
