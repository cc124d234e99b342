//! Scalar statistics for the Okeanos teleconnection mapper.
//!
//! All paired tests filter to indices where both series are finite before
//! computing anything (an inner join on validity), and report "not
//! computable" as `None` rather than an error so that callers iterating over
//! many grid cells never abort on a single bad cell.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Minimum number of paired finite samples required by the paired tests.
///
/// Three is the smallest sample size for which the t-test on a correlation
/// or slope has positive degrees of freedom (`n - 2`).
pub const MIN_PAIRED_SAMPLES: usize = 3;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Centered second-moment sums of a paired sample.
struct PairedMoments {
    n: usize,
    sum_xy: f64,
    sum_xx: f64,
    sum_yy: f64,
}

/// Filter to paired finite samples and accumulate centered moment sums.
///
/// Returns `None` if fewer than [`MIN_PAIRED_SAMPLES`] pairs survive.
fn paired_moments(x: &[f64], y: &[f64]) -> Option<PairedMoments> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect();

    if pairs.len() < MIN_PAIRED_SAMPLES {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    Some(PairedMoments {
        n: pairs.len(),
        sum_xy,
        sum_xx,
        sum_yy,
    })
}

/// Two-sided p-value of a t statistic with `dof` degrees of freedom.
fn two_sided_p(t: f64, dof: f64) -> f64 {
    match StudentsT::new(0.0, 1.0, dof) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    }
}

/// Pearson correlation coefficient with a two-sided p-value.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite. The p-value
/// tests the null hypothesis of zero correlation via the t statistic
/// `r * sqrt((n - 2) / (1 - r^2))`.
///
/// Returns `None` if fewer than [`MIN_PAIRED_SAMPLES`] finite pairs remain
/// or if either filtered series has zero variance.
pub fn pearson_test(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let m = paired_moments(x, y)?;

    let denom = (m.sum_xx * m.sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    let r = (m.sum_xy / denom).clamp(-1.0, 1.0);
    let dof = (m.n - 2) as f64;

    // A perfect fit drives the t statistic to infinity; report p = 0 directly.
    let one_minus_r2 = 1.0 - r * r;
    let p = if one_minus_r2 <= f64::EPSILON {
        0.0
    } else {
        two_sided_p(r * (dof / one_minus_r2).sqrt(), dof)
    };

    Some((r, p))
}

/// Ordinary-least-squares slope of `y` on `x` with a two-sided p-value.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite. The p-value
/// tests the null hypothesis of zero slope via the t statistic
/// `slope / se(slope)`.
///
/// Returns `None` if fewer than [`MIN_PAIRED_SAMPLES`] finite pairs remain
/// or if the filtered `x` has zero variance (undefined slope). A constant
/// filtered `y` yields `Some((0.0, NaN))`: the slope is exactly zero but its
/// standard error degenerates, so no p-value is defined.
pub fn regression_test(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let m = paired_moments(x, y)?;

    if m.sum_xx == 0.0 {
        return None;
    }

    let slope = m.sum_xy / m.sum_xx;
    let dof = (m.n - 2) as f64;

    // Residual sum of squares; clamp tiny negative values from rounding.
    let rss = (m.sum_yy - slope * m.sum_xy).max(0.0);
    let se = (rss / dof / m.sum_xx).sqrt();

    let p = if se == 0.0 {
        // Noiseless fit: a nonzero slope is trivially significant, while a
        // zero slope through constant y has no defined test.
        if slope == 0.0 { f64::NAN } else { 0.0 }
    } else {
        two_sided_p(slope / se, dof)
    };

    Some((slope, p))
}
