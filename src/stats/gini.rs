//! Gini coefficient via the area under the Lorenz curve.

use super::sorted_present;

/// Gini coefficient of the present values, in [0, 1].
///
/// Sorts ascending, builds the Lorenz ordinates `w_0 = 0`,
/// `w_i = cumsum[i-1] / total`, and returns `1 - (1/n) * Σ (w_i + w_{i+1})`,
/// the trapezoidal deficit from the line of equality.
///
/// `None` when there is nothing to measure. An all-zero distribution is
/// perfectly equal and yields `0.0`.
pub fn gini(values: &[Option<f64>]) -> Option<f64> {
    let sorted = sorted_present(values);
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let total: f64 = sorted.iter().sum();
    if n == 1 || total == 0.0 {
        return Some(0.0);
    }

    let mut area = 0.0;
    let mut prev = 0.0;
    let mut cumsum = 0.0;
    for v in &sorted {
        cumsum += v;
        let w = cumsum / total;
        area += prev + w;
        prev = w;
    }
    Some(1.0 - area / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn single_value_is_equal() {
        assert_eq!(gini(&[Some(1.0)]), Some(0.0));
        assert_eq!(gini(&[Some(123_456.0)]), Some(0.0));
        assert_eq!(gini(&[Some(0.0)]), Some(0.0));
    }

    #[test]
    fn two_point_distribution() {
        assert_eq!(gini(&some(&[0.0, 100.0])), Some(0.5));
    }

    #[test]
    fn matches_reference_values() {
        let g = gini(&some(&[998_000.0, 20_000.0, 17_500.0, 70_000.0, 23_500.0, 45_200.0])).unwrap();
        assert!((g - 0.7202).abs() < 0.00005, "got {g}");

        let g = gini(&some(&[1.0, 1.0, 2.0, 2.0])).unwrap();
        assert!((g - 0.167).abs() < 0.0005, "got {g}");
    }

    #[test]
    fn ignores_order_and_missing_values() {
        let base = gini(&some(&[1.0, 1.0, 2.0, 2.0]));
        assert_eq!(gini(&[Some(1.0), None, Some(2.0), Some(2.0), Some(1.0)]), base);
        assert_eq!(gini(&some(&[2.0, 1.0, 2.0, 1.0])), base);
    }

    #[test]
    fn no_data() {
        assert_eq!(gini(&[]), None);
        assert_eq!(gini(&[None, None]), None);
        assert_eq!(gini(&some(&[0.0, 0.0, 0.0])), Some(0.0));
    }
}
