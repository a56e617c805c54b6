// ABOUTME: Nonlinear ultra-distance fatigue model over scalar race/athlete inputs
// ABOUTME: Six weighted sub-factors, readiness amplification, floor-protected experience discount
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ultra fatigue prediction.
//!
//! A pure function from race/athlete scalars to a clamped fatigue factor.
//! Each sub-factor has its own nonlinear curve; the distance curve is
//! piecewise so fatigue growth accelerates at each successive ultra
//! threshold. All outputs are clamped to their documented ranges regardless
//! of how extreme the inputs are; the only failure mode is a non-finite or
//! nonsensical input, which fails fast.

use crate::config::UltraFatigueConfig;
use crate::errors::{require_finite, AppError, AppResult};
use crate::models::{
    CourseSegment, FatigueBreakdown, FatigueResult, FinishTimeEstimate, RaceScenario,
    SegmentProjection, WarningLevel,
};

/// Ultra fatigue prediction engine
#[derive(Debug, Clone)]
pub struct UltraFatiguePredictor {
    config: UltraFatigueConfig,
}

impl UltraFatiguePredictor {
    /// Create a predictor with the given configuration
    #[must_use]
    pub const fn new(config: UltraFatigueConfig) -> Self {
        Self { config }
    }

    /// Predict the fatigue factor for one race scenario.
    ///
    /// The factor is multiplicative on pace, always >= 1.0, and hard-capped
    /// at `1 + combined_cap` (1.60 by default) regardless of inputs.
    pub fn predict(&self, scenario: &RaceScenario) -> AppResult<FatigueResult> {
        self.validate(scenario)?;
        let cfg = &self.config;

        let hours = self.expected_hours(scenario);

        let distance_f = self.distance_fatigue(scenario.distance_km);
        let time_f = self.time_fatigue(hours);
        let elevation_f = self.elevation_fatigue(scenario.elevation_gain_m, scenario.distance_km);
        let heat_f = self.heat_fatigue(
            scenario.temperature_celsius,
            scenario.humidity_percent,
            hours,
        );
        let night_f = self.night_fatigue(scenario.night_section, scenario.distance_km);
        let inexperience_f =
            self.inexperience_fatigue(scenario.longest_ultra_km, scenario.distance_km);

        let breakdown = FatigueBreakdown {
            distance: cfg.distance_weight * distance_f,
            time: cfg.time_weight * time_f,
            elevation: cfg.elevation_weight * elevation_f,
            heat: cfg.heat_weight * heat_f,
            night: cfg.night_weight * night_f,
            inexperience: cfg.inexperience_weight * inexperience_f,
        };
        let weighted_sum = breakdown.distance
            + breakdown.time
            + breakdown.elevation
            + breakdown.heat
            + breakdown.night
            + breakdown.inexperience;

        let readiness_multiplier = self.readiness_multiplier(scenario.readiness_score);
        let experience_discount =
            self.experience_discount(scenario.longest_ultra_km, scenario.distance_km, scenario.ultra_count);

        let combined = weighted_sum * readiness_multiplier * experience_discount;
        let fatigue_factor = 1.0 + combined.min(cfg.combined_cap);

        Ok(FatigueResult {
            fatigue_factor,
            breakdown,
            readiness_multiplier,
            experience_discount,
            confidence: self.confidence(scenario),
        })
    }

    /// Apply the fatigue factor, aid-station time, and night/heat
    /// sub-penalties to a baseline finish-time estimate.
    pub fn estimate_finish_time(
        &self,
        scenario: &RaceScenario,
        baseline_hours: f64,
    ) -> AppResult<FinishTimeEstimate> {
        require_finite("baseline_hours", baseline_hours)?;
        if baseline_hours <= 0.0 {
            return Err(AppError::invalid_input("baseline_hours must be > 0"));
        }

        let result = self.predict(scenario)?;
        let cfg = &self.config;

        let fatigue_adjustment_hours = baseline_hours * (result.fatigue_factor - 1.0);
        let aid_stations = (scenario.distance_km / cfg.aid_station_spacing_km).floor();
        let aid_station_hours = aid_stations * cfg.aid_station_stop_minutes / 60.0;
        let night_penalty_hours = if scenario.night_section {
            baseline_hours * cfg.night_finish_fraction
        } else {
            0.0
        };
        let heat_penalty_hours = baseline_hours
            * cfg.heat_finish_fraction_per_degree
            * (scenario.temperature_celsius - cfg.heat_temp_threshold_c).max(0.0);

        Ok(FinishTimeEstimate {
            baseline_hours,
            fatigue_adjustment_hours,
            aid_station_hours,
            night_penalty_hours,
            heat_penalty_hours,
            total_hours: baseline_hours
                + fatigue_adjustment_hours
                + aid_station_hours
                + night_penalty_hours
                + heat_penalty_hours,
            fatigue_factor: result.fatigue_factor,
        })
    }

    /// Walk cumulative distance/elevation per course segment and flag
    /// glycogen and pace-decay warning levels at each segment end.
    pub fn project_segments(
        &self,
        scenario: &RaceScenario,
        course: &[CourseSegment],
    ) -> AppResult<Vec<SegmentProjection>> {
        self.validate(scenario)?;
        for (index, segment) in course.iter().enumerate() {
            require_finite("segment distance_km", segment.distance_km)?;
            require_finite("segment elevation_gain_m", segment.elevation_gain_m)?;
            if segment.distance_km < 0.0 || segment.elevation_gain_m < 0.0 {
                return Err(AppError::invalid_input(format!(
                    "course segment {index} has negative distance or gain"
                )));
            }
        }

        let cfg = &self.config;
        let total_hours = self.expected_hours(scenario);
        let mut projections = Vec::with_capacity(course.len());
        let mut cumulative_km = 0.0;
        let mut cumulative_gain = 0.0;

        for (index, segment) in course.iter().enumerate() {
            cumulative_km += segment.distance_km;
            cumulative_gain += segment.elevation_gain_m;

            let glycogen_depletion = cfg
                .glycogen_per_km
                .mul_add(cumulative_km, cfg.glycogen_per_meter_gain * cumulative_gain)
                .min(100.0);

            let pace_decay = if cumulative_km > 0.0 {
                let partial = RaceScenario {
                    distance_km: cumulative_km,
                    elevation_gain_m: cumulative_gain,
                    expected_duration_hours: Some(
                        total_hours * cumulative_km / scenario.distance_km,
                    ),
                    ..scenario.clone()
                };
                (self.predict(&partial)?.fatigue_factor - 1.0) * 100.0
            } else {
                0.0
            };

            let warning = if glycogen_depletion > cfg.glycogen_critical_pct {
                WarningLevel::Critical
            } else if pace_decay > cfg.decay_warning_pct {
                WarningLevel::Warning
            } else if pace_decay > cfg.decay_caution_pct {
                WarningLevel::Caution
            } else {
                WarningLevel::None
            };

            projections.push(SegmentProjection {
                segment_index: index,
                cumulative_distance_km: cumulative_km,
                cumulative_elevation_gain_m: cumulative_gain,
                glycogen_depletion_percent: glycogen_depletion,
                pace_decay_percent: pace_decay,
                warning,
            });
        }

        Ok(projections)
    }

    fn validate(&self, scenario: &RaceScenario) -> AppResult<()> {
        require_finite("distance_km", scenario.distance_km)?;
        require_finite("elevation_gain_m", scenario.elevation_gain_m)?;
        require_finite("temperature_celsius", scenario.temperature_celsius)?;
        require_finite("humidity_percent", scenario.humidity_percent)?;
        require_finite("longest_ultra_km", scenario.longest_ultra_km)?;
        require_finite("readiness_score", scenario.readiness_score)?;
        if let Some(hours) = scenario.expected_duration_hours {
            require_finite("expected_duration_hours", hours)?;
            if hours <= 0.0 {
                return Err(AppError::invalid_input(
                    "expected_duration_hours must be > 0",
                ));
            }
        }
        if scenario.distance_km <= 0.0 {
            return Err(AppError::invalid_input("distance_km must be > 0"));
        }
        if scenario.elevation_gain_m < 0.0 {
            return Err(AppError::invalid_input("elevation_gain_m must be >= 0"));
        }
        if scenario.longest_ultra_km < 0.0 {
            return Err(AppError::invalid_input("longest_ultra_km must be >= 0"));
        }
        Ok(())
    }

    fn expected_hours(&self, scenario: &RaceScenario) -> f64 {
        scenario
            .expected_duration_hours
            .unwrap_or(scenario.distance_km / self.config.fallback_speed_kmh)
    }

    /// Piecewise distance curve: linear to marathon, steeper linear to 50K,
    /// then power-law growth accelerating at the 100K threshold.
    fn distance_fatigue(&self, distance_km: f64) -> f64 {
        let cfg = &self.config;
        let at_marathon = cfg.sub_marathon_slope * cfg.marathon_km;
        let at_fifty =
            cfg.marathon_to_fifty_slope.mul_add(cfg.fifty_k_km - cfg.marathon_km, at_marathon);
        let at_hundred = cfg.fifty_to_hundred_coeff.mul_add(
            (cfg.hundred_k_km - cfg.fifty_k_km).powf(cfg.fifty_to_hundred_exponent),
            at_fifty,
        );

        if distance_km <= cfg.marathon_km {
            cfg.sub_marathon_slope * distance_km
        } else if distance_km <= cfg.fifty_k_km {
            cfg.marathon_to_fifty_slope.mul_add(distance_km - cfg.marathon_km, at_marathon)
        } else if distance_km <= cfg.hundred_k_km {
            cfg.fifty_to_hundred_coeff.mul_add(
                (distance_km - cfg.fifty_k_km).powf(cfg.fifty_to_hundred_exponent),
                at_fifty,
            )
        } else {
            cfg.beyond_hundred_coeff.mul_add(
                (distance_km - cfg.hundred_k_km).powf(cfg.beyond_hundred_exponent),
                at_hundred,
            )
        }
    }

    fn time_fatigue(&self, hours: f64) -> f64 {
        let cfg = &self.config;
        if hours <= cfg.time_linear_hours {
            cfg.time_slope * hours.max(0.0)
        } else {
            let at_linear_end = cfg.time_slope * cfg.time_linear_hours;
            cfg.time_overage_coeff.mul_add(
                (hours - cfg.time_linear_hours).powf(cfg.time_overage_exponent),
                at_linear_end,
            )
        }
    }

    fn elevation_fatigue(&self, gain_m: f64, distance_km: f64) -> f64 {
        let cfg = &self.config;
        let base = cfg.elevation_per_1000m * gain_m / 1000.0;
        // Average steepness in percent: meters climbed per 10 m of each km.
        let steepness = gain_m / (distance_km * 10.0);
        if steepness > cfg.steepness_threshold_percent {
            base * cfg.steep_course_multiplier
        } else {
            base
        }
    }

    /// Heat stress compounds over time on course; it is not a flat
    /// per-degree penalty.
    fn heat_fatigue(&self, temperature_c: f64, humidity_pct: f64, hours: f64) -> f64 {
        let cfg = &self.config;
        let excess_temp = (temperature_c - cfg.heat_temp_threshold_c).max(0.0);
        let excess_humidity = (humidity_pct - cfg.heat_humidity_threshold_pct).max(0.0);
        let base = cfg
            .heat_per_degree
            .mul_add(excess_temp, cfg.heat_per_humidity_point * excess_humidity);
        let accumulation = (1.0 + hours.max(0.0) / cfg.heat_accumulation_hours_divisor)
            .min(cfg.heat_accumulation_cap);
        base * accumulation
    }

    fn night_fatigue(&self, night_section: bool, distance_km: f64) -> f64 {
        if !night_section {
            return 0.0;
        }
        let cfg = &self.config;
        if distance_km > cfg.night_long_race_km {
            cfg.night_penalty * cfg.night_long_race_multiplier
        } else {
            cfg.night_penalty
        }
    }

    fn inexperience_fatigue(&self, longest_ultra_km: f64, distance_km: f64) -> f64 {
        if longest_ultra_km >= distance_km {
            return 0.0;
        }
        let cfg = &self.config;
        let gap_ratio = (distance_km - longest_ultra_km) / distance_km;
        cfg.inexperience_coeff * gap_ratio.powf(cfg.inexperience_exponent)
    }

    fn readiness_multiplier(&self, readiness_score: f64) -> f64 {
        let cfg = &self.config;
        let readiness = readiness_score.clamp(0.0, 100.0);
        if readiness < cfg.readiness_threshold {
            1.0 + (cfg.readiness_threshold - readiness) / cfg.readiness_deficit_divisor
        } else {
            1.0
        }
    }

    /// Stepped discount for proven ultra experience, floor-protected so it
    /// never reduces fatigue below the configured fraction of its
    /// undiscounted value.
    fn experience_discount(
        &self,
        longest_ultra_km: f64,
        distance_km: f64,
        ultra_count: u32,
    ) -> f64 {
        let cfg = &self.config;
        let coverage = longest_ultra_km / distance_km;

        let base = if coverage >= 1.0 {
            cfg.discount_full_coverage
        } else if coverage >= 0.8 {
            cfg.discount_near_coverage
        } else if coverage >= 0.5 {
            cfg.discount_half_coverage
        } else {
            1.0
        };

        let count_bonus = if ultra_count >= 10 {
            cfg.discount_veteran_bonus
        } else if ultra_count >= 5 {
            cfg.discount_seasoned_bonus
        } else if ultra_count >= 2 {
            cfg.discount_novice_bonus
        } else {
            0.0
        };

        (base - count_bonus).max(cfg.discount_floor)
    }

    fn confidence(&self, scenario: &RaceScenario) -> f64 {
        let cfg = &self.config;
        let mut confidence = cfg.confidence_base;
        if scenario.ultra_count >= 5 {
            confidence += cfg.confidence_veteran_bonus;
        }
        if scenario.distance_km > scenario.longest_ultra_km {
            confidence -= cfg.confidence_unknown_distance_penalty;
        }
        if scenario.temperature_celsius > cfg.confidence_extreme_temp_c
            || scenario.humidity_percent > cfg.confidence_extreme_humidity_pct
        {
            confidence -= cfg.confidence_extreme_conditions_penalty;
        }
        confidence.clamp(cfg.confidence_min, cfg.confidence_max)
    }
}
