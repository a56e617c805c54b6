// ABOUTME: In-memory AnalysisStore backed by RwLock-protected hash maps
// ABOUTME: Used by tests and embeddings that do not need durable persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AnalysisStore;
use crate::models::{PaceProfile, TerrainAnalysis};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory store keyed the same way a database backend would be:
/// analyses by activity id, profiles by athlete id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    analyses: Arc<RwLock<HashMap<String, TerrainAnalysis>>>,
    profiles: Arc<RwLock<HashMap<Uuid, PaceProfile>>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for InMemoryStore {
    async fn save_terrain_analysis(&self, analysis: &TerrainAnalysis) -> Result<()> {
        let mut analyses = self
            .analyses
            .write()
            .map_err(|_| anyhow!("analysis store lock poisoned"))?;
        analyses.insert(analysis.activity_id.clone(), analysis.clone());
        Ok(())
    }

    async fn get_terrain_analysis(&self, activity_id: &str) -> Result<Option<TerrainAnalysis>> {
        let analyses = self
            .analyses
            .read()
            .map_err(|_| anyhow!("analysis store lock poisoned"))?;
        Ok(analyses.get(activity_id).cloned())
    }

    async fn get_terrain_analyses_for_athlete(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<TerrainAnalysis>> {
        let analyses = self
            .analyses
            .read()
            .map_err(|_| anyhow!("analysis store lock poisoned"))?;
        let mut matching: Vec<TerrainAnalysis> = analyses
            .values()
            .filter(|a| a.user_id == user_id && a.start_date >= since)
            .cloned()
            .collect();
        matching.sort_by_key(|a| a.start_date);
        Ok(matching)
    }

    async fn save_pace_profile(&self, profile: &PaceProfile) -> Result<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| anyhow!("profile store lock poisoned"))?;
        profiles.insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn get_pace_profile(&self, user_id: Uuid) -> Result<Option<PaceProfile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| anyhow!("profile store lock poisoned"))?;
        Ok(profiles.get(&user_id).cloned())
    }
}
