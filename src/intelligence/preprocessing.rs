// ABOUTME: Elevation stream preprocessing ahead of any slope math
// ABOUTME: Raw barometric/GPS elevation is noisy; grades computed from it are garbage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::statistics::moving_average;

/// Smooth a raw elevation sequence with a symmetric moving average.
///
/// Deterministic, same-length output; the window is clamped at sequence
/// boundaries. The default half-width of 2 (a 5-point window) comes from
/// [`crate::config::TerrainConfig`]. Empty input returns empty output.
#[must_use]
pub fn smooth_elevation(elevation_meters: &[f64], half_width: usize) -> Vec<f64> {
    moving_average(elevation_meters, half_width)
}
