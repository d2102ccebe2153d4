use std::{num::NonZeroUsize, path::PathBuf};

use chemflow_analysis::{dashboard::DashboardConfig, record::Metric};
use clap::{Args, Parser, Subcommand};

use self::{
    report::ReportArg,
    summarize::SummarizeArg,
    views::{BoxPlotArg, HistogramArg},
};
use crate::util;

mod report;
mod summarize;
mod views;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute every chart view and write it as JSON
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Print a human-readable report of every chart view
    Report(#[clap(flatten)] ReportArg),
    /// Write the histogram of one metric as JSON
    Histogram(#[clap(flatten)] HistogramArg),
    /// Write the box plot summary of one metric as JSON
    BoxPlot(#[clap(flatten)] BoxPlotArg),
}

/// Dataset and metric selection shared by every command
#[derive(Debug, Clone, Args)]
pub(crate) struct DatasetArg {
    /// Path to the equipment dataset (.csv or .json)
    pub input: PathBuf,

    /// Metric driving the histogram, box plot and per-type views
    #[arg(long, short, default_value_t = Metric::Flowrate)]
    pub metric: Metric,
}

/// Dashboard settings for commands that build binned or sampled views
#[derive(Debug, Clone, Args)]
pub(crate) struct ConfigArg {
    /// Number of histogram bins (overrides the config file)
    #[arg(long)]
    pub bins: Option<NonZeroUsize>,

    /// Path to a JSON dashboard config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConfigArg {
    /// Loads the config file, if any, and applies command-line overrides.
    pub fn load_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = util::read_config_file(self.config.as_deref())?;
        if let Some(bins) = self.bins {
            config.histogram_bins = bins;
        }
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summarize(arg) => summarize::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Histogram(arg) => views::run_histogram(&arg)?,
        Mode::BoxPlot(arg) => views::run_box_plot(&arg)?,
    }
    Ok(())
}
