//! Sample statistics for repeated readings
//!
//! Plain functions over slices, no state. The stdev uses the sample
//! (n−1, Bessel-corrected) divisor and is defined as 0 for fewer than
//! two readings, so a single observation yields a zero Type-A
//! component rather than NaN.

/// Arithmetic mean. Returns 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n−1 divisor). 0 when fewer than two values.
pub fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    libm::sqrt(sum_sq / (values.len() - 1) as f64)
}

/// Standard error of the mean, `stdev / sqrt(n)`. 0 when fewer than two values.
pub fn standard_error(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    sample_stdev(values) / libm::sqrt(values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[8.0, 9.0, 10.0]), 9.0);
    }

    #[test]
    fn stdev_of_single_reading_is_zero() {
        assert_eq!(sample_stdev(&[10.0]), 0.0);
        assert_eq!(standard_error(&[10.0]), 0.0);
    }

    #[test]
    fn stdev_of_constant_sample_is_zero() {
        assert_eq!(sample_stdev(&[10.0, 10.0, 10.0]), 0.0);
    }

    #[test]
    fn stdev_matches_sample_formula() {
        // Sum of squared deviations from mean 2 is 2; 2 / (3-1) = 1.
        assert_eq!(sample_stdev(&[1.0, 2.0, 3.0]), 1.0);
    }

    #[test]
    fn standard_error_divides_by_sqrt_n() {
        let values = [1.0, 2.0, 3.0];
        let expected = sample_stdev(&values) / libm::sqrt(3.0);
        assert_eq!(standard_error(&values), expected);
    }
}
