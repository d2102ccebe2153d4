use serde::{Deserialize, Serialize};

/// Minimum, mean and maximum of a dataset.
///
/// Unlike [`BoxPlotSummary`](crate::box_plot::BoxPlotSummary), the extremes
/// here are the raw extremes of the data; no outlier clipping is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeStats {
    /// The minimum value in the dataset.
    pub min: f64,
    /// The arithmetic mean of the dataset, summed in input order.
    pub mean: f64,
    /// The maximum value in the dataset.
    pub max: f64,
}

impl RangeStats {
    /// All-zero statistics, reported for groups with no values.
    pub const ZERO: Self = Self {
        min: 0.0,
        mean: 0.0,
        max: 0.0,
    };

    /// Computes range statistics from values in any order.
    ///
    /// # Returns
    ///
    /// * `Some(RangeStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use chemflow_stats::descriptive::RangeStats;
    /// let stats = RangeStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0_usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            count += 1;
            sum += value;
            min = f64::min(min, value);
            max = f64::max(max, value);
        }
        if count == 0 {
            return None;
        }

        Some(Self {
            min,
            mean: sum / count as f64,
            max,
        })
    }
}
