//! Numeric kernels behind the ChemFlow charts.
//!
//! This crate knows nothing about equipment records. It turns plain `f64`
//! samples into the structures the dashboard draws:
//!
//! - **Range statistics**: min / mean / max with raw extremes
//! - **Percentiles**: index-based (nearest-rank) lookup on sorted data
//! - **Histogram**: equal-width bins with integer-rounded range labels
//! - **Box plot**: index-based quartiles with Tukey-fence clipped whiskers
//!
//! # Modules
//!
//! - [`descriptive`]: Min / mean / max summaries used for grouped bar charts
//! - [`percentiles`]: Percentile lookup shared by the box plot
//! - [`histogram`]: Equal-width frequency histograms
//! - [`box_plot`]: Robust five-number summaries
//!
//! # Examples
//!
//! ## Creating a histogram
//!
//! ```
//! use std::num::NonZeroUsize;
//!
//! use chemflow_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let histogram = Histogram::new(values, NonZeroUsize::new(4).unwrap()).unwrap();
//! assert_eq!(histogram.counts(), vec![2, 2, 2, 2]);
//! assert_eq!(histogram.labels().next(), Some("1-3"));
//! ```
//!
//! ## Computing a box plot
//!
//! ```
//! use chemflow_stats::box_plot::BoxPlotSummary;
//!
//! let summary = BoxPlotSummary::new([10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
//! assert_eq!(summary.median, 30.0);
//! assert_eq!(summary.q1, 20.0);
//! assert_eq!(summary.q3, 40.0);
//! ```
//!
//! ## Range statistics with an empty fallback
//!
//! ```
//! use chemflow_stats::descriptive::RangeStats;
//!
//! let stats = RangeStats::new(Vec::<f64>::new()).unwrap_or(RangeStats::ZERO);
//! assert_eq!(stats, RangeStats::ZERO);
//! ```

pub mod box_plot;
pub mod descriptive;
pub mod histogram;
pub mod percentiles;

/// Errors produced by the numeric kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// The sample had no values to summarize.
    #[display("sample contains no finite values")]
    EmptySample,
}
