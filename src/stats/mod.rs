//! Descriptive statistics over salary distributions.
//!
//! All functions take `Option<f64>` observations and skip the `None`s, so a
//! column of the reconciled dataset can be passed as-is.

pub mod gini;
pub mod quantile;
pub mod rank;

pub use gini::gini;
pub use quantile::{quantile, quantile_sorted};
pub use rank::rank_descending;

/// The present values, ascending.
pub(crate) fn sorted_present(values: &[Option<f64>]) -> Vec<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(f64::total_cmp);
    present
}
