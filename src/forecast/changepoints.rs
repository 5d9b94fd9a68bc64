//! Piecewise-linear trend basis with automatically placed changepoints.
//!
//! Changepoints are laid out on a uniform grid over the leading share of
//! the (normalized) history, and the trend is linear between them:
//!
//! `trend(t) = m + k*t + sum_j delta_j * max(0, t - cp_j)`
//!
//! so each `delta_j` is the growth-rate shift introduced at changepoint
//! `cp_j`.

/// Uniformly spaced changepoint locations in normalized time.
///
/// Places up to `n_changepoints` points over the first `range` share of
/// [0, 1], excluding the endpoints. With `n` history points available the
/// count is capped so every segment still spans at least two observations.
pub fn changepoint_grid(n: usize, n_changepoints: usize, range: f64) -> Vec<f64> {
    if n < 3 || n_changepoints == 0 {
        return Vec::new();
    }
    let range = range.clamp(0.0, 1.0);
    let count = n_changepoints.min(n / 2);
    (1..=count)
        .map(|i| range * i as f64 / (count + 1) as f64)
        .collect()
}

/// Hinge basis: one column per changepoint, `max(0, t - cp_j)`.
pub fn changepoint_basis(t: &[f64], changepoints: &[f64]) -> Vec<Vec<f64>> {
    t.iter()
        .map(|&ti| {
            changepoints
                .iter()
                .map(|&cp| (ti - cp).max(0.0))
                .collect()
        })
        .collect()
}

/// Evaluate the piecewise-linear trend at the given (normalized) times.
pub fn piecewise_linear(k: f64, m: f64, delta: &[f64], t: &[f64], changepoints: &[f64]) -> Vec<f64> {
    t.iter()
        .map(|&ti| {
            let shifts: f64 = delta
                .iter()
                .zip(changepoints.iter())
                .map(|(d, cp)| d * (ti - cp).max(0.0))
                .sum();
            m + k * ti + shifts
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grid_is_uniform_within_range() {
        let cps = changepoint_grid(60, 3, 0.8);
        assert_eq!(cps.len(), 3);
        assert_relative_eq!(cps[0], 0.2);
        assert_relative_eq!(cps[1], 0.4);
        assert_relative_eq!(cps[2], 0.6);
        assert!(cps.iter().all(|c| *c > 0.0 && *c < 0.8));
    }

    #[test]
    fn grid_caps_count_on_short_history() {
        let cps = changepoint_grid(6, 25, 0.8);
        assert_eq!(cps.len(), 3);

        assert!(changepoint_grid(2, 25, 0.8).is_empty());
        assert!(changepoint_grid(60, 0, 0.8).is_empty());
    }

    #[test]
    fn basis_is_zero_before_changepoint() {
        let t = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let basis = changepoint_basis(&t, &[0.5]);

        assert_relative_eq!(basis[0][0], 0.0);
        assert_relative_eq!(basis[1][0], 0.0);
        assert_relative_eq!(basis[2][0], 0.0);
        assert_relative_eq!(basis[3][0], 0.25);
        assert_relative_eq!(basis[4][0], 0.5);
    }

    #[test]
    fn piecewise_trend_changes_slope_at_changepoint() {
        // slope 1 before t=0.5, slope 3 after
        let t: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        let trend = piecewise_linear(1.0, 0.0, &[2.0], &t, &[0.5]);

        assert_relative_eq!(trend[0], 0.0);
        assert_relative_eq!(trend[5], 0.5);
        assert_relative_eq!(trend[10], 0.5 + 0.5 * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn no_changepoints_is_plain_line() {
        let t = vec![0.0, 0.5, 1.0];
        let trend = piecewise_linear(2.0, 1.0, &[], &t, &[]);
        assert_eq!(trend, vec![1.0, 2.0, 3.0]);
    }
}
