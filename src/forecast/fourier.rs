//! Fourier features for the smooth periodic seasonal component.

use std::f64::consts::PI;

/// Truncated Fourier feature matrix: for each time `t` (in sample units),
/// the `2 * order` columns `sin(2*pi*j*t/period), cos(2*pi*j*t/period)` for
/// `j = 1..=order`.
///
/// Unlike a fixed per-position lookup, these features are defined for any
/// `t`, so a seasonal component fitted on history generalizes into the
/// forecast horizon.
pub fn fourier_features(t: &[f64], period: f64, order: usize) -> Vec<Vec<f64>> {
    t.iter()
        .map(|&ti| {
            let mut row = Vec::with_capacity(2 * order);
            for j in 1..=order {
                let angle = 2.0 * PI * j as f64 * ti / period;
                row.push(angle.sin());
                row.push(angle.cos());
            }
            row
        })
        .collect()
}
