//! Least-squares solver for the forecasting design matrix.

/// Solve `min ||X b - y||^2 + lambda ||b||^2` via the normal equations with
/// Gaussian elimination and partial pivoting.
///
/// `x` is row-major with one row per observation. Returns `None` when the
/// system is empty, dimensions disagree, or the (regularized) system is
/// still effectively singular.
pub fn ridge_solve(x: &[Vec<f64>], y: &[f64], lambda: f64) -> Option<Vec<f64>> {
    let n = x.len();
    if n == 0 || n != y.len() {
        return None;
    }
    let p = x[0].len();
    if p == 0 || x.iter().any(|row| row.len() != p) {
        return None;
    }

    // Accumulate X'X and X'y.
    let mut xtx = vec![vec![0.0; p]; p];
    let mut xty = vec![0.0; p];
    for (row, &yi) in x.iter().zip(y.iter()) {
        for a in 0..p {
            let xa = row[a];
            xty[a] += xa * yi;
            for b in a..p {
                xtx[a][b] += xa * row[b];
            }
        }
    }
    for a in 0..p {
        for b in 0..a {
            xtx[a][b] = xtx[b][a];
        }
        xtx[a][a] += lambda;
    }

    // Gauss-Jordan with partial pivoting.
    let mut a = xtx;
    let mut b = xty;
    for i in 0..p {
        let mut max_row = i;
        let mut max_val = a[i][i].abs();
        for r in (i + 1)..p {
            if a[r][i].abs() > max_val {
                max_val = a[r][i].abs();
                max_row = r;
            }
        }
        if max_row != i {
            a.swap(i, max_row);
            b.swap(i, max_row);
        }
        let pivot = a[i][i];
        if pivot.abs() < 1e-12 {
            return None;
        }
        let inv = 1.0 / pivot;
        for j in i..p {
            a[i][j] *= inv;
        }
        b[i] *= inv;
        for r in 0..p {
            if r == i {
                continue;
            }
            let factor = a[r][i];
            if factor == 0.0 {
                continue;
            }
            for j in i..p {
                a[r][j] -= factor * a[i][j];
            }
            b[r] -= factor * b[i];
        }
    }

    if b.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(b)
}
