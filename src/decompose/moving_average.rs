//! Centered moving average used for trend extraction.

/// Centered moving average of window `window`.
///
/// Edge points that cannot fit a full centered window are `None`: exactly
/// the first and last `window / 2` indices for both even and odd windows.
///
/// For an odd window the average spans the `window` points centered on the
/// target index. For an even window a single window cannot be centered, so
/// the two adjacent centered windows are averaged (the 2xP convention):
/// the window spans `window + 1` points with the two endpoints half-weighted.
pub fn centered_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let half = window / 2;
    let mut result = vec![None; n];

    if window < 2 || n < window + (window % 2 == 0) as usize {
        return result;
    }

    for i in half..n - half {
        let sum = if window % 2 == 0 {
            // Endpoints of the (window + 1)-wide span carry half weight.
            let mut s = 0.5 * values[i - half] + 0.5 * values[i + half];
            for j in (i - half + 1)..(i + half) {
                s += values[j];
            }
            s
        } else {
            values[(i - half)..=(i + half)].iter().sum()
        };
        result[i] = Some(sum / window as f64);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn odd_window_is_plain_centered_average() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ma = centered_moving_average(&values, 3);

        assert_eq!(ma[0], None);
        assert_relative_eq!(ma[1].unwrap(), 2.0);
        assert_relative_eq!(ma[2].unwrap(), 3.0);
        assert_relative_eq!(ma[3].unwrap(), 4.0);
        assert_eq!(ma[4], None);
    }

    #[test]
    fn even_window_half_weights_endpoints() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ma = centered_moving_average(&values, 4);

        // index 2: (0.5*1 + 2 + 3 + 4 + 0.5*5) / 4 = 3.0
        assert_eq!(ma[0], None);
        assert_eq!(ma[1], None);
        assert_relative_eq!(ma[2].unwrap(), 3.0);
        assert_relative_eq!(ma[3].unwrap(), 4.0);
        assert_eq!(ma[4], None);
        assert_eq!(ma[5], None);
    }

    #[test]
    fn edge_counts_match_half_window() {
        let values: Vec<f64> = (0..30).map(|i| i as f64).collect();

        for window in [4usize, 5, 12, 13] {
            let ma = centered_moving_average(&values, window);
            let half = window / 2;
            let undefined_head = ma.iter().take_while(|v| v.is_none()).count();
            let undefined_tail = ma.iter().rev().take_while(|v| v.is_none()).count();
            assert_eq!(undefined_head, half, "window {window}");
            assert_eq!(undefined_tail, half, "window {window}");
        }
    }

    #[test]
    fn linear_series_recovers_itself_at_interior_points() {
        let values: Vec<f64> = (0..24).map(|i| 2.0 + 0.5 * i as f64).collect();
        let ma = centered_moving_average(&values, 12);

        for (i, v) in ma.iter().enumerate() {
            if let Some(t) = v {
                assert_relative_eq!(*t, values[i], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn window_larger_than_series_yields_all_none() {
        let values = vec![1.0, 2.0, 3.0];
        let ma = centered_moving_average(&values, 12);
        assert!(ma.iter().all(|v| v.is_none()));
    }
}
