// ABOUTME: Ultra fatigue model configuration covering sub-factor curves, weights, and caps
// ABOUTME: Piecewise distance thresholds and exponents are tuned values, preserved exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Ultra fatigue model configuration.
///
/// The distance curve is piecewise on purpose: fatigue growth accelerates at
/// each successive ultra threshold instead of following one curve for all
/// distances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltraFatigueConfig {
    /// Weight on the distance sub-factor
    pub distance_weight: f64,
    /// Weight on the time sub-factor
    pub time_weight: f64,
    /// Weight on the elevation sub-factor
    pub elevation_weight: f64,
    /// Weight on the heat sub-factor
    pub heat_weight: f64,
    /// Weight on the night sub-factor
    pub night_weight: f64,
    /// Weight on the inexperience sub-factor
    pub inexperience_weight: f64,

    /// Marathon distance, first piecewise threshold, km
    pub marathon_km: f64,
    /// 50K threshold, km
    pub fifty_k_km: f64,
    /// 100K threshold, km
    pub hundred_k_km: f64,
    /// Linear slope below marathon distance, per km
    pub sub_marathon_slope: f64,
    /// Steeper linear slope from marathon to 50K, per km
    pub marathon_to_fifty_slope: f64,
    /// Power-law coefficient from 50K to 100K
    pub fifty_to_hundred_coeff: f64,
    /// Power-law exponent from 50K to 100K
    pub fifty_to_hundred_exponent: f64,
    /// Power-law coefficient beyond 100K
    pub beyond_hundred_coeff: f64,
    /// Power-law exponent beyond 100K
    pub beyond_hundred_exponent: f64,

    /// Hours on course below which time fatigue is linear
    pub time_linear_hours: f64,
    /// Linear time slope, per hour
    pub time_slope: f64,
    /// Power-law coefficient for hours beyond the linear span
    pub time_overage_coeff: f64,
    /// Power-law exponent for hours beyond the linear span
    pub time_overage_exponent: f64,
    /// Assumed average speed when no expected duration is given, km/h
    pub fallback_speed_kmh: f64,

    /// Elevation fatigue per 1000 m of gain
    pub elevation_per_1000m: f64,
    /// Average steepness above which elevation fatigue is multiplied, percent
    pub steepness_threshold_percent: f64,
    /// Multiplier applied above the steepness threshold
    pub steep_course_multiplier: f64,

    /// Temperature above which heat fatigue accrues, Celsius
    pub heat_temp_threshold_c: f64,
    /// Humidity above which heat fatigue accrues, percent
    pub heat_humidity_threshold_pct: f64,
    /// Heat fatigue per excess degree
    pub heat_per_degree: f64,
    /// Heat fatigue per excess humidity point
    pub heat_per_humidity_point: f64,
    /// Hours divisor in the heat accumulation factor (1 + hours / divisor)
    pub heat_accumulation_hours_divisor: f64,
    /// Cap on the heat accumulation factor
    pub heat_accumulation_cap: f64,

    /// Flat night penalty
    pub night_penalty: f64,
    /// Distance beyond which the night penalty doubles, km
    pub night_long_race_km: f64,
    /// Multiplier on the night penalty beyond that distance
    pub night_long_race_multiplier: f64,

    /// Coefficient on the inexperience gap-ratio power law
    pub inexperience_coeff: f64,
    /// Exponent on the inexperience gap ratio
    pub inexperience_exponent: f64,

    /// Readiness below this amplifies fatigue
    pub readiness_threshold: f64,
    /// Divisor converting readiness deficit into the amplification factor
    pub readiness_deficit_divisor: f64,

    /// Experience discount when the longest prior ultra covers the race
    pub discount_full_coverage: f64,
    /// Experience discount at 80% coverage
    pub discount_near_coverage: f64,
    /// Experience discount at 50% coverage
    pub discount_half_coverage: f64,
    /// Extra discount for 10+ completed ultras
    pub discount_veteran_bonus: f64,
    /// Extra discount for 5-9 completed ultras
    pub discount_seasoned_bonus: f64,
    /// Extra discount for 2-4 completed ultras
    pub discount_novice_bonus: f64,
    /// Hard floor on the experience discount
    pub discount_floor: f64,

    /// Hard cap on the combined fatigue before the +1 offset
    pub combined_cap: f64,

    /// Base prediction confidence
    pub confidence_base: f64,
    /// Confidence bonus for 5+ completed ultras
    pub confidence_veteran_bonus: f64,
    /// Confidence penalty when racing beyond the longest prior ultra
    pub confidence_unknown_distance_penalty: f64,
    /// Confidence penalty for extreme heat or humidity forecasts
    pub confidence_extreme_conditions_penalty: f64,
    /// Temperature considered extreme for confidence purposes, Celsius
    pub confidence_extreme_temp_c: f64,
    /// Humidity considered extreme for confidence purposes, percent
    pub confidence_extreme_humidity_pct: f64,
    /// Lower confidence clamp
    pub confidence_min: f64,
    /// Upper confidence clamp
    pub confidence_max: f64,

    /// Aid station spacing assumed for finish-time estimates, km
    pub aid_station_spacing_km: f64,
    /// Stop time per aid station, minutes
    pub aid_station_stop_minutes: f64,
    /// Night-section finish-time penalty as a fraction of baseline
    pub night_finish_fraction: f64,
    /// Finish-time penalty per degree above the heat threshold, fraction of
    /// baseline
    pub heat_finish_fraction_per_degree: f64,

    /// Glycogen depletion per kilometer, percent
    pub glycogen_per_km: f64,
    /// Glycogen depletion per meter of elevation gain, percent
    pub glycogen_per_meter_gain: f64,
    /// Glycogen depletion beyond which a segment is critical, percent
    pub glycogen_critical_pct: f64,
    /// Pace decay beyond which a segment is a warning, percent
    pub decay_warning_pct: f64,
    /// Pace decay beyond which a segment is a caution, percent
    pub decay_caution_pct: f64,
}

impl Default for UltraFatigueConfig {
    fn default() -> Self {
        Self {
            distance_weight: 0.30,
            time_weight: 0.25,
            elevation_weight: 0.20,
            heat_weight: 0.15,
            night_weight: 0.05,
            inexperience_weight: 0.05,

            marathon_km: 42.195,
            fifty_k_km: 50.0,
            hundred_k_km: 100.0,
            sub_marathon_slope: 0.002,
            marathon_to_fifty_slope: 0.005,
            fifty_to_hundred_coeff: 0.0009,
            fifty_to_hundred_exponent: 1.35,
            beyond_hundred_coeff: 0.0012,
            beyond_hundred_exponent: 1.5,

            time_linear_hours: 6.0,
            time_slope: 0.01,
            time_overage_coeff: 0.014,
            time_overage_exponent: 1.3,
            fallback_speed_kmh: 8.0,

            elevation_per_1000m: 0.035,
            steepness_threshold_percent: 5.0,
            steep_course_multiplier: 1.2,

            heat_temp_threshold_c: 20.0,
            heat_humidity_threshold_pct: 60.0,
            heat_per_degree: 0.01,
            heat_per_humidity_point: 0.002,
            heat_accumulation_hours_divisor: 12.0,
            heat_accumulation_cap: 2.0,

            night_penalty: 0.02,
            night_long_race_km: 80.0,
            night_long_race_multiplier: 2.0,

            inexperience_coeff: 0.12,
            inexperience_exponent: 0.7,

            readiness_threshold: 75.0,
            readiness_deficit_divisor: 100.0,

            discount_full_coverage: 0.60,
            discount_near_coverage: 0.75,
            discount_half_coverage: 0.90,
            discount_veteran_bonus: 0.15,
            discount_seasoned_bonus: 0.10,
            discount_novice_bonus: 0.05,
            discount_floor: 0.35,

            combined_cap: 0.60,

            confidence_base: 80.0,
            confidence_veteran_bonus: 10.0,
            confidence_unknown_distance_penalty: 15.0,
            confidence_extreme_conditions_penalty: 10.0,
            confidence_extreme_temp_c: 30.0,
            confidence_extreme_humidity_pct: 85.0,
            confidence_min: 20.0,
            confidence_max: 95.0,

            aid_station_spacing_km: 10.0,
            aid_station_stop_minutes: 3.0,
            night_finish_fraction: 0.05,
            heat_finish_fraction_per_degree: 0.004,

            glycogen_per_km: 0.8,
            glycogen_per_meter_gain: 0.006,
            glycogen_critical_pct: 80.0,
            decay_warning_pct: 40.0,
            decay_caution_pct: 25.0,
        }
    }
}

impl UltraFatigueConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value found.
    pub fn validate(&self) -> AppResult<()> {
        let weight_sum = self.distance_weight
            + self.time_weight
            + self.elevation_weight
            + self.heat_weight
            + self.night_weight
            + self.inexperience_weight;
        if (weight_sum - 1.0).abs() > 0.01 {
            return Err(AppError::config_invalid(format!(
                "fatigue sub-factor weights must sum to 1.0, got {weight_sum}"
            )));
        }
        if !(self.marathon_km < self.fifty_k_km && self.fifty_k_km < self.hundred_k_km) {
            return Err(AppError::config_invalid(
                "distance thresholds must be strictly increasing",
            ));
        }
        if self.combined_cap <= 0.0 {
            return Err(AppError::config_invalid("combined_cap must be > 0"));
        }
        if !(0.0 < self.discount_floor && self.discount_floor <= 1.0) {
            return Err(AppError::config_invalid(
                "discount_floor must be in (0, 1]",
            ));
        }
        if self.confidence_min >= self.confidence_max {
            return Err(AppError::config_invalid(
                "confidence_min must be < confidence_max",
            ));
        }
        if self.heat_accumulation_cap < 1.0 {
            return Err(AppError::config_invalid(
                "heat_accumulation_cap must be >= 1.0",
            ));
        }
        if self.fallback_speed_kmh <= 0.0 {
            return Err(AppError::config_invalid("fallback_speed_kmh must be > 0"));
        }
        Ok(())
    }
}
