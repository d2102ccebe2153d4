use std::path::PathBuf;

use chemflow_analysis::dashboard::{Dashboard, DashboardConfig};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use crate::{
    command::{ConfigArg, DatasetArg},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct SummarizeArg {
    #[clap(flatten)]
    pub dataset: DatasetArg,

    #[clap(flatten)]
    pub settings: ConfigArg,

    /// Output file path (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// JSON document written by `summarize`
#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    /// Timestamp when the summary was generated (ISO 8601 format)
    generated_at: DateTime<Utc>,
    /// Dataset the summary was computed from
    source: String,
    config: &'a DashboardConfig,
    dashboard: &'a Dashboard,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let config = arg.settings.load_config()?;
    let records = util::read_records_file(&arg.dataset.input)?;

    tracing::info!("Computing {} dashboard...", arg.dataset.metric);
    let dashboard = Dashboard::compute(&records, arg.dataset.metric, &config)?;
    tracing::info!(
        "Dashboard computed ({} of {} records have a finite {})",
        dashboard.summary.sample_size,
        dashboard.record_count,
        arg.dataset.metric
    );

    let document = SummaryDocument {
        generated_at: Utc::now(),
        source: arg.dataset.input.display().to_string(),
        config: &config,
        dashboard: &dashboard,
    };
    util::Output::save_json(&document, arg.output.clone())
}
