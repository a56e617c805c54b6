// ABOUTME: Statistical primitives shared across the analysis pipeline
// ABOUTME: Moving averages, quartiles, IQR fences, weighted percentiles and regression
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::cast_precision_loss)] // Safe: statistical calculations with controlled ranges

/// One observation with an attached weight.
///
/// Weights act as repeat counts in percentile selection, not as multipliers
/// on the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSample {
    /// Observed value
    pub value: f64,
    /// Sample weight, > 0
    pub weight: f64,
}

/// Symmetric moving average with the window clamped at sequence boundaries.
///
/// Each point is replaced by the mean of up to `2 * half_width + 1`
/// neighbors. Empty input yields empty output.
#[must_use]
pub fn moving_average(values: &[f64], half_width: usize) -> Vec<f64> {
    if values.is_empty() || half_width == 0 {
        return values.to_vec();
    }

    let mut smoothed = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = i.saturating_sub(half_width);
        let end = std::cmp::min(i + half_width + 1, values.len());
        let window_sum: f64 = values[start..end].iter().sum();
        smoothed.push(window_sum / (end - start) as f64);
    }
    smoothed
}

/// Linear-interpolated percentile of a sorted slice, `p` in [0, 1]
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Drop samples outside the Tukey fences `[Q1 - k*IQR, Q3 + k*IQR]`.
///
/// Quartiles are computed on the unweighted value distribution; weights ride
/// along with surviving samples.
#[must_use]
pub fn iqr_filter(samples: &[WeightedSample], multiplier: f64) -> Vec<WeightedSample> {
    let mut values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let (Some(q1), Some(q3)) = (
        percentile_sorted(&values, 0.25),
        percentile_sorted(&values, 0.75),
    ) else {
        return samples.to_vec();
    };

    let iqr = q3 - q1;
    let low = multiplier.mul_add(-iqr, q1);
    let high = multiplier.mul_add(iqr, q3);

    samples
        .iter()
        .copied()
        .filter(|s| s.value >= low && s.value <= high)
        .collect()
}

/// Weighted percentile where weight acts as a repeat count.
///
/// Samples are sorted by value; the selected value is the smallest one whose
/// cumulative weight reaches `p` of the total weight.
#[must_use]
pub fn weighted_percentile(samples: &[WeightedSample], p: f64) -> Option<f64> {
    let total_weight: f64 = samples.iter().map(|s| s.weight).sum();
    if samples.is_empty() || total_weight <= 0.0 {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));

    let target = p.clamp(0.0, 1.0) * total_weight;
    let mut cumulative = 0.0;
    for sample in &sorted {
        cumulative += sample.weight;
        if cumulative >= target {
            return Some(sample.value);
        }
    }
    sorted.last().map(|s| s.value)
}

/// Weighted mean of the samples
#[must_use]
pub fn weighted_mean(samples: &[WeightedSample]) -> Option<f64> {
    let total_weight: f64 = samples.iter().map(|s| s.weight).sum();
    if total_weight <= 0.0 {
        return None;
    }
    let sum: f64 = samples.iter().map(|s| s.value * s.weight).sum();
    Some(sum / total_weight)
}

/// Weighted least-squares slope and intercept for `(x, y, weight)` points.
///
/// Returns `None` with fewer than two points or zero weighted variance in x.
#[must_use]
pub fn weighted_linear_regression(points: &[(f64, f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }

    let total_weight: f64 = points.iter().map(|(_, _, w)| w).sum();
    if total_weight <= 0.0 {
        return None;
    }

    let mean_x: f64 = points.iter().map(|(x, _, w)| x * w).sum::<f64>() / total_weight;
    let mean_y: f64 = points.iter().map(|(_, y, w)| y * w).sum::<f64>() / total_weight;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (x, y, w) in points {
        let dx = x - mean_x;
        numerator += w * dx * (y - mean_y);
        denominator += w * dx * dx;
    }

    if denominator.abs() < f64::EPSILON {
        return None;
    }

    let slope = numerator / denominator;
    let intercept = slope.mul_add(-mean_x, mean_y);
    Some((slope, intercept))
}
