//! Ordinary least squares with an intercept
//!
//! Columns and target are centred, which absorbs the intercept, and the
//! normal equations are solved by Gauss-Jordan elimination with partial
//! pivoting. Columns that are (numerically) linear combinations of earlier
//! ones get a zero coefficient, which still yields a least-squares fit.

use crate::analysis::mean;
use crate::features::FEATURE_COUNT;

/// Relative pivot size below which a column is treated as dependent
const PIVOT_TOLERANCE: f64 = 1e-10;

/// Fitted weights
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    pub coefficients: [f64; FEATURE_COUNT],
    pub intercept: f64,
}

/// `intercept + coefficients · row`, unclamped
pub fn evaluate(coefficients: &[f64; FEATURE_COUNT], intercept: f64, row: &[f64; FEATURE_COUNT]) -> f64 {
    intercept
        + coefficients
            .iter()
            .zip(row.iter())
            .map(|(c, x)| c * x)
            .sum::<f64>()
}

/// Fit `target ~ intercept + rows · coefficients`
///
/// `rows` and `targets` must have the same non-zero length.
pub fn fit(rows: &[[f64; FEATURE_COUNT]], targets: &[f64]) -> LinearFit {
    let n = rows.len();
    let y_mean = mean(targets);

    let mut x_mean = [0.0; FEATURE_COUNT];
    for row in rows {
        for (m, x) in x_mean.iter_mut().zip(row.iter()) {
            *m += x;
        }
    }
    for m in x_mean.iter_mut() {
        *m /= n as f64;
    }

    // Augmented normal equations [Xc'Xc | Xc'yc]
    let mut system = [[0.0; FEATURE_COUNT + 1]; FEATURE_COUNT];
    for (row, &y) in rows.iter().zip(targets) {
        let mut centred = [0.0; FEATURE_COUNT];
        for j in 0..FEATURE_COUNT {
            centred[j] = row[j] - x_mean[j];
        }
        let yc = y - y_mean;
        for i in 0..FEATURE_COUNT {
            for j in 0..FEATURE_COUNT {
                system[i][j] += centred[i] * centred[j];
            }
            system[i][FEATURE_COUNT] += centred[i] * yc;
        }
    }

    let coefficients = solve_normal_equations(system);
    let intercept = y_mean
        - coefficients
            .iter()
            .zip(x_mean.iter())
            .map(|(c, m)| c * m)
            .sum::<f64>();

    LinearFit {
        coefficients,
        intercept,
    }
}

fn solve_normal_equations(
    mut system: [[f64; FEATURE_COUNT + 1]; FEATURE_COUNT],
) -> [f64; FEATURE_COUNT] {
    let scale = (0..FEATURE_COUNT)
        .map(|i| system[i][i])
        .fold(0.0, f64::max);
    let mut coefficients = [0.0; FEATURE_COUNT];
    if scale <= 0.0 {
        return coefficients;
    }
    let tolerance = scale * PIVOT_TOLERANCE;

    let mut pivots: Vec<(usize, usize)> = Vec::with_capacity(FEATURE_COUNT);
    let mut pivot_row = 0;

    for col in 0..FEATURE_COUNT {
        let best = (pivot_row..FEATURE_COUNT)
            .max_by(|&a, &b| system[a][col].abs().total_cmp(&system[b][col].abs()));
        let Some(best) = best else { break };
        if system[best][col].abs() <= tolerance {
            continue;
        }

        system.swap(pivot_row, best);
        let pivot = system[pivot_row][col];
        for value in system[pivot_row].iter_mut() {
            *value /= pivot;
        }

        for row in 0..FEATURE_COUNT {
            if row == pivot_row {
                continue;
            }
            let factor = system[row][col];
            if factor != 0.0 {
                for k in 0..=FEATURE_COUNT {
                    system[row][k] -= factor * system[pivot_row][k];
                }
            }
        }

        pivots.push((pivot_row, col));
        pivot_row += 1;
    }

    for (row, col) in pivots {
        coefficients[col] = system[row][FEATURE_COUNT];
    }
    coefficients
}

/// Mean absolute error
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let errors: Vec<f64> = actual.iter().zip(predicted).map(|(a, p)| (a - p).abs()).collect();
    mean(&errors)
}

/// Root mean squared error
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let squared: Vec<f64> = actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).collect();
    mean(&squared).sqrt()
}

/// Coefficient of determination
///
/// A constant target scores 1.0 when reproduced exactly and 0.0 otherwise.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    let actual_mean = mean(actual);
    let ss_res: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - actual_mean).powi(2)).sum();

    let negligible = f64::EPSILON * actual.iter().map(|a| a * a).sum::<f64>().max(1.0);
    if ss_tot <= negligible {
        return if ss_res <= negligible { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_from(seed_rows: &[[f64; 2]]) -> Vec<[f64; FEATURE_COUNT]> {
        seed_rows
            .iter()
            .map(|r| [r[0], r[1], r[0] * r[1], (r[0] - r[1]).abs(), r[0] * r[0], 1.0 + r[1] * r[1]])
            .collect()
    }

    #[test]
    fn test_recovers_exact_linear_relation() {
        let rows = rows_from(&[
            [0.0, 1.0], [1.0, 3.0], [2.0, 0.5], [3.0, 2.0], [4.0, 4.5],
            [5.0, 1.5], [6.0, 3.5], [7.0, 0.0], [8.0, 2.5], [9.0, 5.0],
        ]);
        let truth = [1.5, -2.0, 0.25, 3.0, -0.1, 0.75];
        let targets: Vec<f64> = rows
            .iter()
            .map(|r| 4.0 + r.iter().zip(truth.iter()).map(|(x, c)| x * c).sum::<f64>())
            .collect();

        let fit = fit(&rows, &targets);

        for (c, t) in fit.coefficients.iter().zip(truth.iter()) {
            assert!((c - t).abs() < 1e-6, "coefficient {} vs {}", c, t);
        }
        assert!((fit.intercept - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_constant_column_gets_zero_weight() {
        let rows: Vec<[f64; FEATURE_COUNT]> = (0..20)
            .map(|i| {
                let x = i as f64;
                [x, 7.0, (x * 0.3).sin(), 7.0, (x * 0.7).cos(), x * x]
            })
            .collect();
        let targets: Vec<f64> = rows.iter().map(|r| 2.0 + 3.0 * r[0] - r[5] * 0.01).collect();

        let fit = fit(&rows, &targets);

        assert_eq!(fit.coefficients[1], 0.0);
        assert_eq!(fit.coefficients[3], 0.0);
        let predicted: Vec<f64> = rows.iter().map(|r| evaluate(&fit.coefficients, fit.intercept, r)).collect();
        assert!(r2_score(&targets, &predicted) > 1.0 - 1e-9);
    }

    #[test]
    fn test_single_row_predicts_its_target() {
        let rows = [[1.0, 2.0, 3.0, 4.0, 0.0, 1.0]];
        let fit = fit(&rows, &[12.5]);
        assert!((evaluate(&fit.coefficients, fit.intercept, &rows[0]) - 12.5).abs() < 1e-12);
        assert!(fit.coefficients.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_metrics() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [1.5, 2.0, 2.5, 4.0];
        assert!((mean_absolute_error(&actual, &predicted) - 0.25).abs() < 1e-12);
        assert!((root_mean_squared_error(&actual, &predicted) - 0.125f64.sqrt()).abs() < 1e-12);
        // ss_res = 0.5, ss_tot = 5
        assert!((r2_score(&actual, &predicted) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_r2_constant_target() {
        assert_eq!(r2_score(&[3.0, 3.0], &[3.0, 3.0]), 1.0);
        assert_eq!(r2_score(&[3.0, 3.0], &[2.0, 4.0]), 0.0);
    }
}
