// ABOUTME: Cached pace-profile serving with staleness-triggered background recomputation
// ABOUTME: Callers always get the current cached value immediately; recomputes never block
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Pace profile service.
//!
//! Serving policy:
//!
//! - A cached profile inside the staleness window is returned as-is.
//! - A stale cached profile is still returned immediately, and a
//!   fire-and-forget background recompute is spawned. The recompute is a
//!   single attempt: failures are logged, never retried, never surfaced to
//!   the caller that already received the stale value.
//! - No cached profile triggers a synchronous recompute.
//! - Storage read failures are logged and treated as a cache miss, so the
//!   service can always fall back to full recomputation.

use crate::config::PaceProfileConfig;
use crate::errors::{AppError, AppResult};
use crate::models::PaceProfile;
use crate::storage::AnalysisStore;
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::pace_profile::PaceProfileCalculator;

/// Pace profile service over a pluggable store
#[derive(Debug, Clone)]
pub struct PaceProfileService<S> {
    store: S,
    config: PaceProfileConfig,
}

impl<S: AnalysisStore + 'static> PaceProfileService<S> {
    /// Create a service over the given store and configuration
    #[must_use]
    pub const fn new(store: S, config: PaceProfileConfig) -> Self {
        Self { store, config }
    }

    /// Get the athlete's pace profile, serving stale values while a
    /// background recompute runs.
    ///
    /// Returns `Ok(None)` when the athlete has insufficient history for a
    /// profile — an expected, displayable state for consumers.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<PaceProfile>> {
        match self.store.get_pace_profile(user_id).await {
            Ok(Some(profile)) => {
                if profile.age_days(Utc::now()) > self.config.staleness_days {
                    debug!(%user_id, "cached pace profile is stale, scheduling recompute");
                    self.spawn_background_recompute(user_id);
                }
                Ok(Some(profile))
            }
            Ok(None) => self.recompute_profile(user_id).await,
            Err(error) => {
                warn!(%user_id, %error, "profile read failed, treating as cache miss");
                self.recompute_profile(user_id).await
            }
        }
    }

    /// Recompute the athlete's profile from stored terrain history and
    /// persist the result.
    ///
    /// A persistence failure on the write is logged, not surfaced: the
    /// caller still receives the freshly computed profile.
    pub async fn recompute_profile(&self, user_id: Uuid) -> AppResult<Option<PaceProfile>> {
        let now = Utc::now();
        let since = now - Duration::days(self.config.history_window_days);
        let history = self
            .store
            .get_terrain_analyses_for_athlete(user_id, since)
            .await
            .map_err(AppError::from)?;

        let calculator = PaceProfileCalculator::new(self.config.clone());
        let Some(profile) = calculator.calculate(user_id, &history, now) else {
            info!(%user_id, "insufficient history for pace profile");
            return Ok(None);
        };

        if let Err(error) = self.store.save_pace_profile(&profile).await {
            warn!(%user_id, %error, "failed to persist recomputed pace profile");
        }
        Ok(Some(profile))
    }

    /// Fire-and-forget recompute: single attempt, no retry, no timeout.
    fn spawn_background_recompute(&self, user_id: Uuid) {
        let service = self.clone();
        tokio::spawn(async move {
            match service.recompute_profile(user_id).await {
                Ok(_) => debug!(%user_id, "background profile recompute complete"),
                Err(error) => {
                    warn!(%user_id, %error, "background profile recompute failed");
                }
            }
        });
    }
}
