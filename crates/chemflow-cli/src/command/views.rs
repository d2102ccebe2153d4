//! Single-view commands
//!
//! These write one chart's data instead of the whole dashboard, for callers
//! that only render one chart.

use std::path::PathBuf;

use chemflow_analysis::{AnalysisError, filter};
use chemflow_stats::{box_plot::BoxPlotSummary, histogram::Histogram};
use clap::Args;
use serde::Serialize;

use crate::{
    command::{ConfigArg, DatasetArg},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct HistogramArg {
    #[clap(flatten)]
    pub dataset: DatasetArg,

    #[clap(flatten)]
    pub settings: ConfigArg,

    /// Output file path (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct BoxPlotArg {
    #[clap(flatten)]
    pub dataset: DatasetArg,

    /// Output file path (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Histogram in the label / count layout chart libraries expect
#[derive(Debug, Serialize)]
struct HistogramView {
    labels: Vec<String>,
    counts: Vec<u64>,
}

impl From<&Histogram> for HistogramView {
    fn from(histogram: &Histogram) -> Self {
        Self {
            labels: histogram.labels().map(str::to_owned).collect(),
            counts: histogram.counts(),
        }
    }
}

fn load_values(dataset: &DatasetArg) -> anyhow::Result<Vec<f64>> {
    let records = util::read_records_file(&dataset.input)?;
    let values = filter::metric_values(&records, dataset.metric);
    if values.len() < records.len() {
        tracing::warn!(
            "Skipped {} records without a finite {}",
            records.len() - values.len(),
            dataset.metric
        );
    }
    Ok(values)
}

pub(crate) fn run_histogram(arg: &HistogramArg) -> anyhow::Result<()> {
    let config = arg.settings.load_config()?;
    let values = load_values(&arg.dataset)?;
    let histogram =
        Histogram::from_slice(&values, config.histogram_bins).map_err(|source| {
            AnalysisError::EmptyMetric {
                metric: arg.dataset.metric,
                source,
            }
        })?;
    util::Output::save_json(&HistogramView::from(&histogram), arg.output.clone())
}

pub(crate) fn run_box_plot(arg: &BoxPlotArg) -> anyhow::Result<()> {
    let values = load_values(&arg.dataset)?;
    let summary = BoxPlotSummary::new(values).map_err(|source| AnalysisError::EmptyMetric {
        metric: arg.dataset.metric,
        source,
    })?;
    util::Output::save_json(&summary, arg.output.clone())
}
