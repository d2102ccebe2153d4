/// Computes a single percentile value from sorted data.
///
/// This function uses the nearest-rank method without interpolation.
/// For a dataset with n values, the k-th percentile is the value at position
/// `floor(n * k / 100)`, clamped to the last index.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (0.0 to 100.0)
///
/// # Returns
///
/// The value at the specified percentile, or `None` if the input is empty.
///
/// # Examples
///
/// ```
/// use chemflow_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), Some(3.0));
/// assert_eq!(compute_percentile(&values, 25.0), Some(2.0));
/// assert_eq!(compute_percentile(&values, 100.0), Some(5.0));
/// assert_eq!(compute_percentile(&[], 50.0), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );

    let last = sorted_values.len().checked_sub(1)?;
    let idx = ((sorted_values.len() as f64 * percentile) / 100.0).floor() as usize;
    Some(sorted_values[idx.min(last)])
}
