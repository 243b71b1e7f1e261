//! Summary statistics for experiment reports.

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    mean_over(values, values.len())
}

/// Sum of `values` divided by `n`, for when some samples are known to be
/// excluded (e.g. the diagonal of a matrix).
pub fn mean_over(values: &[f64], n: usize) -> Option<f64> {
    (n > 0).then(|| sum(values) / n as f64)
}

/// Population standard deviation. `None` for an empty slice.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

pub fn remove_zeros(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|&x| x != 0.).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_statistics() {
        let values = [2., 4., 4., 4., 5., 5., 7., 9.];
        assert_eq!(sum(&values), 40.);
        assert_eq!(mean(&values), Some(5.));
        assert_eq!(std_dev(&values), Some(2.));
        assert_eq!(mean_over(&values, 10), Some(4.));
    }

    #[test]
    fn empty_input() {
        assert_eq!(mean(&[]), None);
        assert_eq!(std_dev(&[]), None);
        assert_eq!(sum(&[]), 0.);
    }

    #[test]
    fn zeros_are_removed() {
        assert_eq!(remove_zeros(&[0., 1., 0., 2.5]), vec![1., 2.5]);
    }
}
