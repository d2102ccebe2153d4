//! All chart views for one dataset and one selected metric
//!
//! [`Dashboard::compute`] runs every aggregation in one pass over an
//! immutable record slice. The result depends only on the records, the
//! metric and the [`DashboardConfig`]; recomputing with the same inputs
//! yields the same value.

use std::num::NonZeroUsize;

use chemflow_stats::{box_plot::BoxPlotSummary, histogram, histogram::Histogram};
use serde::{Deserialize, Serialize};

use crate::{
    AnalysisError, filter,
    grouping::{GroupStats, TypeDistribution},
    record::{EquipmentRecord, Metric},
    sampling::{self, LabeledSeries, MetricPair, PairSample},
};

/// Chart sizing options.
///
/// Missing fields take their defaults when deserialized, so a config file
/// only needs the values it changes:
///
/// ```json
/// { "histogram_bins": 20, "categories": ["Pump", "Valve"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Number of equal-width bins in the metric histogram
    pub histogram_bins: NonZeroUsize,
    /// Number of leading records plotted in the correlation chart
    pub correlation_sample_size: usize,
    /// Metric pairings plotted in the correlation chart
    pub correlation_pairs: Vec<MetricPair>,
    /// Number of leading records in the flowrate / pressure comparison
    pub top_n: usize,
    /// Number of leading records in the temperature trend
    pub trend_len: usize,
    /// Equipment types reported by the grouped view; discovered from the
    /// data in first-seen order when absent
    pub categories: Option<Vec<String>>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            histogram_bins: histogram::DEFAULT_NUM_BINS,
            correlation_sample_size: sampling::CORRELATION_SAMPLE_SIZE,
            correlation_pairs: sampling::DEFAULT_CORRELATION_PAIRS.to_vec(),
            top_n: sampling::TOP_N,
            trend_len: sampling::TREND_LEN,
            categories: None,
        }
    }
}

/// Histogram and box plot of the selected metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    /// Number of finite values behind both views
    pub sample_size: usize,
    pub histogram: Histogram,
    pub box_plot: BoxPlotSummary,
}

impl MetricSummary {
    /// Summarizes the finite values of `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyMetric`] if no record has a finite value
    /// for `metric`.
    pub fn compute(
        records: &[EquipmentRecord],
        metric: Metric,
        num_bins: NonZeroUsize,
    ) -> Result<Self, AnalysisError> {
        let values = filter::metric_values(records, metric);
        let empty = |source| AnalysisError::EmptyMetric { metric, source };
        let histogram = Histogram::from_slice(&values, num_bins).map_err(empty)?;
        let box_plot = BoxPlotSummary::new(values.iter().copied()).map_err(empty)?;
        Ok(Self {
            metric,
            sample_size: values.len(),
            histogram,
            box_plot,
        })
    }
}

/// Every chart view of the equipment dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Number of input records, including those with missing readings
    pub record_count: usize,
    pub summary: MetricSummary,
    pub by_type: GroupStats,
    pub distribution: TypeDistribution,
    pub correlation: Vec<PairSample>,
    /// Flowrate and pressure of the leading records, by equipment name
    pub top_flowrate: LabeledSeries,
    pub top_pressure: LabeledSeries,
    /// Temperature of the leading records, by equipment name
    pub temperature_trend: LabeledSeries,
}

impl Dashboard {
    /// Computes all views for `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyMetric`] if no record has a finite value
    /// for `metric`; the histogram and box plot cannot be drawn in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use chemflow_analysis::{
    ///     dashboard::{Dashboard, DashboardConfig},
    ///     record::{EquipmentRecord, Metric},
    /// };
    ///
    /// let records = vec![
    ///     EquipmentRecord::new("Pump-1", "Pump", 120.0, 5.0, 110.0),
    ///     EquipmentRecord::new("Valve-1", "Valve", 60.0, 4.1, 95.0),
    ///     EquipmentRecord::new("Pump-2", "Pump", 130.0, 5.5, 115.0),
    /// ];
    /// let dashboard = Dashboard::compute(&records, Metric::Flowrate, &DashboardConfig::default())?;
    /// assert_eq!(dashboard.summary.histogram.total_count(), 3);
    /// assert_eq!(dashboard.distribution.get("Pump"), 2);
    /// # Ok::<(), chemflow_analysis::AnalysisError>(())
    /// ```
    pub fn compute(
        records: &[EquipmentRecord],
        metric: Metric,
        config: &DashboardConfig,
    ) -> Result<Self, AnalysisError> {
        tracing::debug!(records = records.len(), %metric, "computing dashboard");

        let summary = MetricSummary::compute(records, metric, config.histogram_bins)?;
        tracing::debug!(
            sample_size = summary.sample_size,
            dropped = records.len() - summary.sample_size,
            "metric summary computed"
        );

        let by_type = match &config.categories {
            Some(categories) => GroupStats::for_categories(records, metric, categories),
            None => GroupStats::from_records(records, metric),
        };
        let distribution = TypeDistribution::from_records(records);
        tracing::debug!(
            categories = distribution.counts.len(),
            "type aggregation computed"
        );

        let correlation = sampling::pair_samples(
            records,
            &config.correlation_pairs,
            config.correlation_sample_size,
        );

        Ok(Self {
            record_count: records.len(),
            summary,
            by_type,
            distribution,
            correlation,
            top_flowrate: LabeledSeries::prefix(records, Metric::Flowrate, config.top_n),
            top_pressure: LabeledSeries::prefix(records, Metric::Pressure, config.top_n),
            temperature_trend: LabeledSeries::prefix(records, Metric::Temperature, config.trend_len),
        })
    }
}
