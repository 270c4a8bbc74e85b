//! Least-squares curve fitting, kernel density estimation, and histogram
//! binning for the chart builders.

// ---------------------------------------------------------------------------
// Polynomial / logarithmic least squares
// ---------------------------------------------------------------------------

/// Fit a polynomial of the given degree through `points` by least squares.
/// Returns coefficients in ascending order (`c[0] + c[1]·x + …`), or
/// `None` when there are fewer points than coefficients or the normal
/// equations are singular.
pub fn poly_fit(points: &[[f64; 2]], degree: usize) -> Option<Vec<f64>> {
    let n = degree + 1;
    if points.len() < n {
        return None;
    }

    // Normal equations: A^T·A·c = A^T·y, assembled from power sums.
    let mut matrix = vec![vec![0.0; n + 1]; n];
    for row in 0..n {
        for col in 0..n {
            matrix[row][col] = points
                .iter()
                .map(|p| p[0].powi((row + col) as i32))
                .sum();
        }
        matrix[row][n] = points
            .iter()
            .map(|p| p[1] * p[0].powi(row as i32))
            .sum();
    }

    solve(matrix)
}

/// Fit `y = a + b·ln x` by least squares over the points with `x > 0`.
pub fn log_fit(points: &[[f64; 2]]) -> Option<(f64, f64)> {
    let log_points: Vec<[f64; 2]> = points
        .iter()
        .filter(|p| p[0] > 0.0)
        .map(|p| [p[0].ln(), p[1]])
        .collect();
    let coeffs = poly_fit(&log_points, 1)?;
    Some((coeffs[0], coeffs[1]))
}

/// Gaussian elimination with partial pivoting over an augmented matrix.
fn solve(mut matrix: Vec<Vec<f64>>) -> Option<Vec<f64>> {
    let n = matrix.len();

    for col in 0..n {
        let pivot = (col..n).max_by(|&a, &b| {
            matrix[a][col].abs().total_cmp(&matrix[b][col].abs())
        })?;
        if matrix[pivot][col].abs() < 1e-12 {
            return None;
        }
        matrix.swap(col, pivot);

        for row in col + 1..n {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..=n {
                matrix[row][k] -= factor * matrix[col][k];
            }
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = matrix[row][n];
        for col in row + 1..n {
            acc -= matrix[row][col] * solution[col];
        }
        solution[row] = acc / matrix[row][row];
    }
    Some(solution)
}

// ---------------------------------------------------------------------------
// Kernel density estimation
// ---------------------------------------------------------------------------

/// Scott's rule bandwidth: `std · n^(-1/5)`.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = var.sqrt();
    if std <= 0.0 {
        return None;
    }
    Some(std * n.powf(-0.2))
}

/// Evaluate a Gaussian kernel density estimate at each grid position.
/// Returns `None` when a bandwidth cannot be derived (fewer than two
/// values, or zero spread).
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Option<Vec<f64>> {
    let h = scott_bandwidth(values)?;
    let norm = 1.0 / (values.len() as f64 * h * (2.0 * std::f64::consts::PI).sqrt());

    Some(
        grid.iter()
            .map(|&g| {
                values
                    .iter()
                    .map(|&v| {
                        let z = (g - v) / h;
                        (-0.5 * z * z).exp()
                    })
                    .sum::<f64>()
                    * norm
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Equal-width bins over the value range: `(center, width, count)` per bin.
/// The maximum lands in the last bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<(f64, f64, usize)> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= 0.0 {
        // All values identical: one unit-width bin.
        return vec![(min, 1.0, values.len())];
    }
    let width = span / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut index = ((v - min) / width) as usize;
        if index == bins {
            index -= 1;
        }
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (min + (i as f64 + 0.5) * width, width, count))
        .collect()
}

// ---------------------------------------------------------------------------
