use std::{num::NonZeroUsize, ops::Range};

use serde::Serialize;

use crate::StatsError;

/// Number of bins used by the metric distribution chart.
pub const DEFAULT_NUM_BINS: NonZeroUsize = NonZeroUsize::new(12).unwrap();

/// A histogram representation of a dataset's distribution.
///
/// The data range `[min, max]` is split into equal-width bins. The lowest
/// value always lands in the first bin and the highest value in the last one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, ordered from low to high.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end,
    /// except for the last bin which also holds the maximum).
    pub range: Range<f64>,
    /// Display label `"{start}-{end}"` with both ends rounded to integers
    /// (exponent form such as `2e+21` from `1e21` up).
    pub label: String,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from values in any order.
    ///
    /// # Arguments
    ///
    /// * `values` - Finite data points. Non-finite values must be filtered out first.
    /// * `num_bins` - The number of equal-width bins to create.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::EmptySample`] if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::num::NonZeroUsize;
    /// # use chemflow_stats::histogram::Histogram;
    /// let values = [1.0, 1.0, 1.0, 1.0];
    /// let histogram = Histogram::new(values, NonZeroUsize::new(4).unwrap()).unwrap();
    /// assert_eq!(histogram.counts(), vec![4, 0, 0, 0]);
    /// ```
    pub fn new<I>(values: I, num_bins: NonZeroUsize) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        Self::from_slice(&values, num_bins)
    }

    /// Creates a histogram from a borrowed sample.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::EmptySample`] if `values` is empty.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn from_slice(values: &[f64], num_bins: NonZeroUsize) -> Result<Self, StatsError> {
        debug_assert!(
            values.iter().all(|v| v.is_finite()),
            "histogram values must be finite"
        );
        if values.is_empty() {
            return Err(StatsError::EmptySample);
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let num_bins = num_bins.get();

        // Bins are laid out in a halved space when `max - min` overflows.
        let scale = if (max - min).is_finite() { 1.0 } else { 0.5 };
        let scaled_min = min * scale;
        let bin_width = (max * scale - scaled_min) / num_bins as f64;
        let edge = |bin_idx: usize| ((scaled_min + bin_idx as f64 * bin_width) / scale).min(max);

        let mut bins = (0..num_bins)
            .map(|bin_idx| {
                let start = edge(bin_idx);
                let end = edge(bin_idx + 1);
                HistogramBin {
                    range: start..end,
                    label: format_range_label(start, end),
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        let last_idx = num_bins - 1;
        for &val in values {
            // A constant sample has zero width; everything belongs to the first bin.
            let idx = if bin_width > 0.0 {
                let position = ((val * scale - scaled_min) / bin_width).floor();
                if position <= 0.0 {
                    0
                } else {
                    (position as usize).min(last_idx)
                }
            } else {
                0
            };
            bins[idx].count += 1;
        }

        Ok(Self { bins })
    }

    /// Returns the bin labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.bins.iter().map(|bin| bin.label.as_str())
    }

    /// Returns the bin counts in order.
    #[must_use]
    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// Returns the number of values counted across all bins.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Returns the width shared by every bin.
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        self.bins
            .first()
            .map_or(0.0, |bin| bin.range.end - bin.range.start)
    }
}

/// Formats a bin range with both ends rounded half away from zero.
fn format_range_label(start: f64, end: f64) -> String {
    format!("{}-{}", format_bound(start), format_bound(end))
}

/// Integer text for magnitudes below `1e21`, exponent form (`2e+21`) above.
fn format_bound(value: f64) -> String {
    const EXPONENT_THRESHOLD: f64 = 1e21;

    let rounded = value.round();
    if rounded.abs() < EXPONENT_THRESHOLD {
        format!("{rounded}")
    } else {
        format!("{rounded:e}").replacen('e', "e+", 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bins(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_empty_values() {
        let result = Histogram::new(Vec::new(), bins(12));
        assert_eq!(result, Err(StatsError::EmptySample));
    }

    #[test]
    fn test_constant_sample_lands_in_first_bin() {
        let histogram = Histogram::new([1.0, 1.0, 1.0, 1.0], bins(4)).unwrap();
        assert_eq!(histogram.counts(), vec![4, 0, 0, 0]);
        assert_eq!(histogram.bin_width(), 0.0);
        assert!(histogram.labels().all(|label| label == "1-1"));
    }

    #[test]
    fn test_maximum_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 10.0], bins(5)).unwrap();
        assert_eq!(histogram.counts(), vec![1, 0, 0, 0, 1]);
    }

    #[test]
    fn test_single_bin() {
        let histogram = Histogram::new([3.0, 9.0, 4.5], bins(1)).unwrap();
        assert_eq!(histogram.counts(), vec![3]);
        assert_eq!(histogram.labels().collect::<Vec<_>>(), vec!["3-9"]);
    }

    #[test]
    fn test_labels_round_to_integers() {
        // width = 2.5: 0-3, 3-5, 5-8, 8-10
        let histogram = Histogram::new([0.0, 10.0], bins(4)).unwrap();
        assert_eq!(
            histogram.labels().collect::<Vec<_>>(),
            vec!["0-3", "3-5", "5-8", "8-10"]
        );
    }

    #[test]
    fn test_negative_range_labels() {
        let histogram = Histogram::new([-10.0, -2.0], bins(2)).unwrap();
        assert_eq!(
            histogram.labels().collect::<Vec<_>>(),
            vec!["-10--6", "-6--2"]
        );
        assert_eq!(histogram.counts(), vec![1, 1]);
    }

    #[test]
    fn test_counts_sum_to_sample_size() {
        let values = (0..257)
            .map(|i| f64::from(i).sin() * 37.0 + f64::from(i % 11))
            .collect::<Vec<_>>();
        for n in [1, 2, 7, 12, 50] {
            let histogram = Histogram::from_slice(&values, bins(n)).unwrap();
            assert_eq!(histogram.bins.len(), n);
            assert_eq!(histogram.total_count(), values.len() as u64);
        }
    }

    #[test]
    fn test_bin_boundaries_follow_floor() {
        // width = 1.0: 2.0 belongs to bin 2, 1.999 to bin 1
        let histogram = Histogram::new([0.0, 1.999, 2.0, 4.0], bins(4)).unwrap();
        assert_eq!(histogram.counts(), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_span_wider_than_f64_range() {
        let histogram = Histogram::new([-1e308, 0.0, 1e308], bins(4)).unwrap();
        assert_eq!(histogram.counts(), vec![1, 0, 1, 1]);
        assert_eq!(histogram.bins[0].range.start, -1e308);
        assert_eq!(histogram.bins[3].range.end, 1e308);
        assert!(histogram.bins.iter().all(|bin| {
            bin.range.start.is_finite() && bin.range.end.is_finite() && bin.range.start < bin.range.end
        }));
        assert!(
            histogram
                .labels()
                .all(|label| !label.contains("NaN") && !label.contains("inf"))
        );
        assert_eq!(histogram.labels().next(), Some("-1e+308--5e+307"));
    }

    #[test]
    fn test_large_bounds_use_exponent_labels() {
        let histogram = Histogram::new([0.0, 4e21], bins(2)).unwrap();
        assert_eq!(
            histogram.labels().collect::<Vec<_>>(),
            vec!["0-2e+21", "2e+21-4e+21"]
        );
        assert_eq!(format_bound(999_999.5), "1000000");
        assert_eq!(format_bound(-1.5e22), "-1.5e+22");
    }

    #[test]
    fn test_serializes_labels_and_counts() {
        let histogram = Histogram::new([0.0, 2.0], bins(2)).unwrap();
        let json = serde_json::to_value(&histogram).unwrap();
        assert_eq!(json["bins"][0]["label"], "0-1");
        assert_eq!(json["bins"][1]["count"], 1);
        assert_eq!(json["bins"][1]["range"]["end"], 2.0);
    }
}
