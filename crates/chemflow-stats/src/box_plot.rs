use serde::{Deserialize, Serialize};

use crate::{StatsError, percentiles::compute_percentile};

/// Multiplier applied to the interquartile range to place the Tukey fences.
pub const FENCE_FACTOR: f64 = 1.5;

/// Robust five-number summary of a sample, plus its mean.
///
/// Quartiles are read directly from the sorted sample at index
/// `floor(n * p)` without interpolation. The whiskers (`min`/`max`) are the
/// raw extremes pulled in to the Tukey fences `q1 - 1.5 * iqr` and
/// `q3 + 1.5 * iqr` when the data extends beyond them.
///
/// Invariant: `min <= q1 <= median <= q3 <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSummary {
    /// Lower whisker: the raw minimum clipped to the lower fence.
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Upper whisker: the raw maximum clipped to the upper fence.
    pub max: f64,
    /// Arithmetic mean of the sample, summed in input order.
    pub mean: f64,
    /// Number of values lying strictly outside the fences.
    pub outliers: usize,
}

impl BoxPlotSummary {
    /// Computes the summary from values in any order.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::EmptySample`] if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chemflow_stats::box_plot::BoxPlotSummary;
    /// let summary = BoxPlotSummary::new([1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
    /// assert_eq!(summary.q1, 2.0);
    /// assert_eq!(summary.q3, 4.0);
    /// // 100.0 lies beyond the upper fence 4.0 + 1.5 * 2.0
    /// assert_eq!(summary.max, 7.0);
    /// assert_eq!(summary.outliers, 1);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn new<I>(values: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        if sorted.is_empty() {
            return Err(StatsError::EmptySample);
        }
        // Summed before sorting so the result does not depend on the sort.
        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
        sorted.sort_by(f64::total_cmp);

        let quartile =
            |percentile| compute_percentile(&sorted, percentile).ok_or(StatsError::EmptySample);
        let q1 = quartile(25.0)?;
        let median = quartile(50.0)?;
        let q3 = quartile(75.0)?;

        let iqr = q3 - q1;
        let lower_fence = q1 - FENCE_FACTOR * iqr;
        let upper_fence = q3 + FENCE_FACTOR * iqr;
        let min = f64::max(sorted[0], lower_fence);
        let max = f64::min(sorted[sorted.len() - 1], upper_fence);
        let outliers = sorted
            .iter()
            .filter(|&&v| v < lower_fence || v > upper_fence)
            .count();

        Ok(Self {
            min,
            q1,
            median,
            q3,
            max,
            mean,
            outliers,
        })
    }

    /// Returns the interquartile range `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Returns the lower Tukey fence `q1 - 1.5 * iqr`.
    #[must_use]
    pub fn lower_fence(&self) -> f64 {
        self.q1 - FENCE_FACTOR * self.iqr()
    }

    /// Returns the upper Tukey fence `q3 + 1.5 * iqr`.
    #[must_use]
    pub fn upper_fence(&self) -> f64 {
        self.q3 + FENCE_FACTOR * self.iqr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ordered(summary: &BoxPlotSummary) {
        assert!(summary.min <= summary.q1, "{summary:?}");
        assert!(summary.q1 <= summary.median, "{summary:?}");
        assert!(summary.median <= summary.q3, "{summary:?}");
        assert!(summary.q3 <= summary.max, "{summary:?}");
    }

    #[test]
    fn test_no_clipping_inside_fences() {
        let summary = BoxPlotSummary::new([10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        assert_eq!(summary.q1, 20.0);
        assert_eq!(summary.median, 30.0);
        assert_eq!(summary.q3, 40.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 50.0);
        assert!((summary.mean - 30.0).abs() < 1e-12);
        assert_eq!(summary.iqr(), 20.0);
        assert_eq!(summary.lower_fence(), -10.0);
        assert_eq!(summary.upper_fence(), 70.0);
        assert_eq!(summary.outliers, 0);
    }

    #[test]
    fn test_input_order_does_not_matter_for_quartiles() {
        let summary = BoxPlotSummary::new([50.0, 10.0, 40.0, 30.0, 20.0]).unwrap();
        assert_eq!(summary.q1, 20.0);
        assert_eq!(summary.median, 30.0);
        assert_eq!(summary.q3, 40.0);
    }

    #[test]
    fn test_low_outlier_is_clipped() {
        let summary = BoxPlotSummary::new([-500.0, 10.0, 11.0, 12.0, 13.0, 14.0]).unwrap();
        // n = 6: q1 = sorted[1], median = sorted[3], q3 = sorted[4]
        assert_eq!(summary.q1, 10.0);
        assert_eq!(summary.median, 12.0);
        assert_eq!(summary.q3, 13.0);
        assert_eq!(summary.min, 5.5);
        assert_eq!(summary.max, 14.0);
        assert_eq!(summary.outliers, 1);
        // The mean still sees the raw outlier.
        assert!(summary.mean < 0.0);
        assert_ordered(&summary);
    }

    #[test]
    fn test_single_value_collapses() {
        let summary = BoxPlotSummary::new([42.0]).unwrap();
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.q1, 42.0);
        assert_eq!(summary.median, 42.0);
        assert_eq!(summary.q3, 42.0);
        assert_eq!(summary.max, 42.0);
        assert_eq!(summary.mean, 42.0);
    }

    #[test]
    fn test_two_values() {
        // n = 2: q1 = sorted[0], median = sorted[1], q3 = sorted[1]
        let summary = BoxPlotSummary::new([3.0, 1.0]).unwrap();
        assert_eq!(summary.q1, 1.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 3.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert_ordered(&summary);
    }

    #[test]
    fn test_ordering_invariant_over_many_samples() {
        for n in 1..60_u32 {
            let values = (0..n)
                .map(|i| (f64::from(i) * 7.3).cos() * 100.0 + f64::from(i * i % 17))
                .collect::<Vec<_>>();
            let summary = BoxPlotSummary::new(values).unwrap();
            assert_ordered(&summary);
        }
    }

    #[test]
    fn test_idempotent() {
        let values = [3.5, 9.0, -1.25, 7.0, 7.0, 2.0, 100.0];
        let first = BoxPlotSummary::new(values).unwrap();
        let second = BoxPlotSummary::new(values).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            BoxPlotSummary::new(std::iter::empty()),
            Err(StatsError::EmptySample)
        );
    }
}
