// ABOUTME: Configuration-driven constants for terrain analysis replacing magic numbers
// ABOUTME: Per-domain config structs with tuned defaults, env overrides, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration.
//!
//! Every empirically tuned constant in the analysis pipeline lives here so
//! behavior is inspectable and overridable without touching algorithm code.
//! Defaults are the production values; a small set of operationally relevant
//! knobs can be overridden from the environment.

/// Climb detection thresholds and difficulty scoring
pub mod climb;
/// Pace profile aggregation policy
pub mod pace_profile;
/// Terrain segmentation windows and effort multipliers
pub mod terrain;
/// Ultra fatigue model curves and caps
pub mod ultra_fatigue;

pub use climb::ClimbConfig;
pub use pace_profile::PaceProfileConfig;
pub use terrain::{EffortMultipliers, TerrainConfig};
pub use ultra_fatigue::UltraFatigueConfig;

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Top-level engine configuration aggregating all analysis domains
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Terrain segmentation configuration
    pub terrain: TerrainConfig,
    /// Climb detection configuration
    pub climb: ClimbConfig,
    /// Pace profile aggregation configuration
    pub pace_profile: PaceProfileConfig,
    /// Ultra fatigue model configuration
    pub ultra_fatigue: UltraFatigueConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables with fallback to
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable contains an unparsable
    /// value or the resulting configuration fails validation.
    pub fn from_environment() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("TERRAIN_WINDOW_DISTANCE_M") {
            config.terrain.window_target_distance_m = parse_env("TERRAIN_WINDOW_DISTANCE_M", &val)?;
        }

        if let Ok(val) = std::env::var("TERRAIN_SMOOTHING_HALF_WIDTH") {
            config.terrain.smoothing_half_width = parse_env("TERRAIN_SMOOTHING_HALF_WIDTH", &val)?;
        }

        if let Ok(val) = std::env::var("PROFILE_FLAT_PERCENTILE") {
            config.pace_profile.flat_pace_percentile = parse_env("PROFILE_FLAT_PERCENTILE", &val)?;
        }

        if let Ok(val) = std::env::var("PROFILE_STALENESS_DAYS") {
            config.pace_profile.staleness_days = parse_env("PROFILE_STALENESS_DAYS", &val)?;
        }

        if let Ok(val) = std::env::var("FATIGUE_COMBINED_CAP") {
            config.ultra_fatigue.combined_cap = parse_env("FATIGUE_COMBINED_CAP", &val)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate all domain configurations.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value found.
    pub fn validate(&self) -> AppResult<()> {
        self.terrain.validate()?;
        self.climb.validate()?;
        self.pace_profile.validate()?;
        self.ultra_fatigue.validate()?;
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::config_invalid(format!("{name} has invalid value {value:?}")))
}
