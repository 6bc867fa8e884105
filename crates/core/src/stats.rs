//! Descriptive statistics and regression used by the QC evaluator.
//!
//! All functions are total: degenerate inputs (empty slices, zero means,
//! zero variance) resolve to a fixed convention instead of an error.
//!
//! Standard deviation is always the sample estimate (Bessel's correction,
//! divide by `n - 1`); there is no population (`n`) variant. Zero total
//! variance in a regression yields `r² = 1`. Both match the values written
//! into stored session reports.

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Keep only finite values (drops `NaN` and `±∞`), preserving order.
pub fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean. Returns `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation around a precomputed `mean`.
///
/// `sqrt(Σ(x - mean)² / (n - 1))`. Returns `0.0` when fewer than two values
/// are available.
pub fn sample_sd(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Coefficient of variation `sd / mean`; `0.0` when `mean == 0`.
pub fn coefficient_of_variation(sd: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        return 0.0;
    }
    sd / mean
}

/// Signed percentage deviation of `measured` from `nominal`.
///
/// `((measured - nominal) / nominal) * 100`; `0.0` when `nominal == 0`.
pub fn percent_deviation(measured: f64, nominal: f64) -> f64 {
    if nominal == 0.0 {
        return 0.0;
    }
    ((measured - nominal) / nominal) * 100.0
}

// ---------------------------------------------------------------------------
// Regression through the origin
// ---------------------------------------------------------------------------

/// Result of fitting `y = slope · x` (no intercept term).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginFit {
    pub slope: f64,
    /// `Σ(y - ȳ)²`.
    pub ss_total: f64,
    /// `Σ(y - slope·x)²`.
    pub ss_residual: f64,
    /// `1 - ss_residual / ss_total`, or `1.0` when `ss_total == 0`.
    ///
    /// Because the fit is forced through the origin this can be negative
    /// when the data are far from proportional.
    pub r_squared: f64,
}

/// Least-squares fit through the origin over `(x, y)` pairs.
///
/// `slope = Σxy / Σx²`. When every `y` is identical the total variance is
/// zero and `r_squared` is defined as `1.0`. When `Σx² == 0` (or the input
/// is empty) the slope is `0.0`. If either sum overflows `f64` the slope is
/// `NaN`, which propagates into `r_squared`.
pub fn regression_through_origin(points: &[(f64, f64)]) -> OriginFit {
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let slope = if !sum_xx.is_finite() || !sum_xy.is_finite() {
        f64::NAN
    } else if sum_xx == 0.0 {
        0.0
    } else {
        sum_xy / sum_xx
    };

    let ys: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
    let y_mean = mean(&ys);

    let ss_total: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
    let ss_residual: f64 = points
        .iter()
        .map(|(x, y)| (y - slope * x).powi(2))
        .sum();

    let r_squared = if ss_total == 0.0 {
        1.0
    } else {
        1.0 - ss_residual / ss_total
    };

    OriginFit {
        slope,
        ss_total,
        ss_residual,
        r_squared,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
