use super::sorted_present;

/// Quantile `q` of ascending `sorted` by linear interpolation between the
/// order statistics around position `q * (n - 1)`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

pub fn quantile(values: &[Option<f64>], q: f64) -> Option<f64> {
    quantile_sorted(&sorted_present(values), q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_order_statistics() {
        let v = [Some(4.0), Some(1.0), None, Some(3.0), Some(2.0)];
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 0.25), Some(1.75));
        assert_eq!(quantile(&v, 0.5), Some(2.5));
        assert_eq!(quantile(&v, 0.75), Some(3.25));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
    }

    #[test]
    fn empty_has_no_quantile() {
        assert_eq!(quantile(&[None], 0.5), None);
        assert_eq!(quantile_sorted(&[7.0], 0.25), Some(7.0));
    }
}
