//! Monthly-climatology anomaly removal.

use std::collections::BTreeMap;

/// Compute anomalies by subtracting monthly means.
///
/// For each timestep, subtract the mean of all finite values sharing that
/// calendar month. Non-finite values are excluded from the climatology and
/// come back as NaN, as do values in a month with no finite sample.
///
/// # Panics
///
/// Panics if `values` and `months` differ in length.
pub fn monthly_anomalies(values: &[f64], months: &[u8]) -> Vec<f64> {
    assert_eq!(
        values.len(),
        months.len(),
        "values and months must align ({} vs {})",
        values.len(),
        months.len()
    );

    let mut monthly: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for (&value, &month) in values.iter().zip(months.iter()) {
        if value.is_finite() {
            monthly.entry(month).or_default().push(value);
        }
    }

    let monthly_means: BTreeMap<u8, f64> = monthly
        .iter()
        .map(|(&month, vals)| (month, okeanos_stats::mean(vals)))
        .collect();

    values
        .iter()
        .zip(months.iter())
        .map(|(&value, &month)| match monthly_means.get(&month) {
            Some(mean) if value.is_finite() => value - mean,
            _ => f64::NAN,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn subtracts_monthly_means() {
        let values = vec![10.0, 20.0, 30.0, 15.0, 25.0, 35.0];
        let months = vec![1, 2, 3, 1, 2, 3];

        let anomalies = monthly_anomalies(&values, &months);

        // Each month contributes a pair with mean halfway between.
        for (i, expected) in [-2.5, -2.5, -2.5, 2.5, 2.5, 2.5].into_iter().enumerate() {
            assert_relative_eq!(anomalies[i], expected);
        }
        let per_month_sum = anomalies[0] + anomalies[3];
        assert_relative_eq!(per_month_sum, 0.0);
    }

    #[test]
    fn single_month_centres_series() {
        let values = vec![5.0, 10.0, 15.0, 20.0];
        let months = vec![1, 1, 1, 1];

        let anomalies = monthly_anomalies(&values, &months);
        assert_relative_eq!(anomalies[0], -7.5);
        assert_relative_eq!(anomalies[3], 7.5);
        assert_relative_eq!(anomalies.iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn nan_excluded_from_climatology() {
        // Month 1 climatology comes from the finite values only.
        let values = vec![10.0, f64::NAN, 20.0];
        let months = vec![1, 1, 1];

        let anomalies = monthly_anomalies(&values, &months);
        assert_relative_eq!(anomalies[0], -5.0);
        assert!(anomalies[1].is_nan());
        assert_relative_eq!(anomalies[2], 5.0);
    }

    #[test]
    fn month_with_no_finite_sample_stays_nan() {
        let values = vec![1.0, f64::NAN, 2.0, f64::NAN];
        let months = vec![1, 2, 1, 2];

        let anomalies = monthly_anomalies(&values, &months);
        assert_relative_eq!(anomalies[0], -0.5);
        assert!(anomalies[1].is_nan());
        assert_relative_eq!(anomalies[2], 0.5);
        assert!(anomalies[3].is_nan());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(monthly_anomalies(&[], &[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "values and months must align")]
    fn mismatched_lengths_panic() {
        monthly_anomalies(&[1.0, 2.0], &[1]);
    }
}
