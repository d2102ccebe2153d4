//! Text report of every dashboard view

use std::fmt;

use chemflow_analysis::{
    dashboard::Dashboard,
    grouping::{GroupStats, TypeDistribution},
    sampling::{LabeledSeries, PairSample},
};
use chemflow_stats::{box_plot::BoxPlotSummary, histogram::Histogram};
use clap::Args;

use crate::{
    command::{ConfigArg, DatasetArg},
    util,
};

const MAX_BAR_WIDTH: usize = 50;

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    pub dataset: DatasetArg,

    #[clap(flatten)]
    pub settings: ConfigArg,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let config = arg.settings.load_config()?;
    let records = util::read_records_file(&arg.dataset.input)?;

    tracing::info!("Computing {} dashboard...", arg.dataset.metric);
    let dashboard = Dashboard::compute(&records, arg.dataset.metric, &config)?;
    tracing::info!("Dashboard computed");

    let metric = dashboard.summary.metric;
    println!(
        "Equipment Report: {metric} ({} records, {} with a finite value)",
        dashboard.record_count, dashboard.summary.sample_size
    );
    println!("==========================================\n");

    println!("{metric} Distribution (Histogram):");
    print_histogram(&dashboard.summary.histogram);
    println!();

    println!("{metric} Statistics:");
    print_box_plot(&dashboard.summary.box_plot);
    println!();

    println!("{metric} by Equipment Type:");
    print_group_stats(&dashboard.by_type);
    println!();

    println!("Equipment Type Distribution:");
    print_distribution(&dashboard.distribution);
    println!();

    println!("Flowrate vs Pressure (Top {}):", config.top_n);
    print_series_pair(&dashboard.top_flowrate, &dashboard.top_pressure);
    println!();

    println!("Temperature Trend:");
    print_series(&dashboard.temperature_trend);
    println!();

    println!("Correlation Analysis:");
    for sample in &dashboard.correlation {
        print_pair_sample(sample);
    }

    Ok(())
}

fn bar(count: usize, max_count: usize) -> String {
    "#".repeat((count * MAX_BAR_WIDTH) / max_count.max(1))
}

#[expect(clippy::cast_possible_truncation)]
fn print_histogram(histogram: &Histogram) {
    let max_count = histogram.bins.iter().map(|b| b.count).max().unwrap_or(1) as usize;
    for bin in &histogram.bins {
        let count = bin.count as usize;
        println!("  {:>15} | {:<5} {}", bin.label, count, bar(count, max_count));
    }
}

fn print_box_plot(summary: &BoxPlotSummary) {
    println!("  {:<8} {:>12.2}", "Min", summary.min);
    println!("  {:<8} {:>12.2}", "Q1", summary.q1);
    println!("  {:<8} {:>12.2}", "Median", summary.median);
    println!("  {:<8} {:>12.2}", "Q3", summary.q3);
    println!("  {:<8} {:>12.2}", "Max", summary.max);
    println!("  {:<8} {:>12.2}", "Mean", summary.mean);
    println!(
        "  {:<8} {:>12} (fences {:.2} .. {:.2})",
        "Outliers",
        summary.outliers,
        summary.lower_fence(),
        summary.upper_fence()
    );
}

fn print_group_stats(stats: &GroupStats) {
    println!(
        "  {:<20} {:>12} {:>12} {:>12}",
        "Type", "Min", "Mean", "Max"
    );
    println!("  {}", "-".repeat(59));
    for group in &stats.groups {
        println!(
            "  {:<20} {:>12.2} {:>12.2} {:>12.2}",
            group.category, group.stats.min, group.stats.mean, group.stats.max
        );
    }
}

#[expect(clippy::cast_precision_loss)]
fn print_distribution(distribution: &TypeDistribution) {
    let total = distribution.total();
    let max_count = distribution
        .counts
        .iter()
        .map(|c| c.count)
        .max()
        .unwrap_or(1);
    for entry in &distribution.counts {
        println!(
            "  {:>15} | {:<5} {:>5.1}% {}",
            entry.category,
            entry.count,
            100.0 * entry.count as f64 / total as f64,
            bar(entry.count, max_count)
        );
    }
}

struct Value(f64);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() {
            write!(f, "{:>10.2}", self.0)
        } else {
            write!(f, "{:>10}", "N/A")
        }
    }
}

fn print_series_pair(first: &LabeledSeries, second: &LabeledSeries) {
    println!("  {:<20} {:>10} {:>10}", "Equipment", first.metric, second.metric);
    for (a, b) in first.points.iter().zip(&second.points) {
        println!("  {:<20} {} {}", a.label, Value(a.value), Value(b.value));
    }
}

fn print_series(series: &LabeledSeries) {
    println!("  {:<20} {:>10}", "Equipment", series.metric);
    for point in &series.points {
        println!("  {:<20} {}", point.label, Value(point.value));
    }
}

fn print_pair_sample(sample: &PairSample) {
    let complete = sample
        .points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .count();
    println!(
        "  {:<28} {} points ({} complete)",
        sample.pair.to_string(),
        sample.points.len(),
        complete
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(10, 10).len(), MAX_BAR_WIDTH);
        assert_eq!(bar(5, 10).len(), MAX_BAR_WIDTH / 2);
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(0, 0), "");
    }

    #[test]
    fn test_value_marks_missing_readings() {
        assert_eq!(Value(12.3456).to_string(), "     12.35");
        assert_eq!(Value(f64::NAN).to_string(), "       N/A");
    }
}
