// ABOUTME: Storage abstraction for terrain analyses and pace profiles
// ABOUTME: Pluggable backends behind one trait; ships an in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Persistence seam for the engine.
//!
//! The engine persists exactly two derived record kinds: one
//! [`TerrainAnalysis`] per activity and one [`PaceProfile`] per athlete.
//! Both writes are idempotent upserts — re-analysis overwrites, never
//! duplicates. Climb and fatigue query results are never persisted here.

/// In-memory store implementation
pub mod memory;

pub use memory::InMemoryStore;

use crate::models::{PaceProfile, TerrainAnalysis};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Storage abstraction trait.
///
/// All backends must implement this trait to provide a consistent interface
/// to the analysis layer.
#[async_trait]
pub trait AnalysisStore: Send + Sync + Clone {
    /// Upsert the terrain analysis for an activity, keyed by activity id
    async fn save_terrain_analysis(&self, analysis: &TerrainAnalysis) -> Result<()>;

    /// Get the terrain analysis for an activity, if one exists
    async fn get_terrain_analysis(&self, activity_id: &str) -> Result<Option<TerrainAnalysis>>;

    /// Get all terrain analyses for an athlete with a start date at or
    /// after `since`, ordered oldest first
    async fn get_terrain_analyses_for_athlete(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<TerrainAnalysis>>;

    /// Upsert the pace profile for an athlete, keyed by athlete id
    async fn save_pace_profile(&self, profile: &PaceProfile) -> Result<()>;

    /// Get the pace profile for an athlete, if one exists
    async fn get_pace_profile(&self, user_id: Uuid) -> Result<Option<PaceProfile>>;
}
