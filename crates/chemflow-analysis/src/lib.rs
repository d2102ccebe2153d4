//! Chart aggregation for chemical equipment datasets
//!
//! This crate turns an ordered set of [`record::EquipmentRecord`]s into the
//! data behind each chart of the equipment dashboard. Every operation is a
//! pure function of its inputs: nothing is cached and nothing is mutated.
//!
//! # Overview
//!
//! ```text
//! Records + Metric
//!     ├─ filter        finite values of the metric, in order
//!     │   ├─ Histogram       equal-width bins (chemflow-stats)
//!     │   └─ BoxPlotSummary  fence-clipped five-number summary (chemflow-stats)
//!     ├─ grouping      per-type min/mean/max and per-type counts
//!     └─ sampling      first-N (x, y) pairs and labeled series, unfiltered
//! ```
//!
//! [`dashboard::Dashboard`] runs all of the above under one
//! [`dashboard::DashboardConfig`].
//!
//! # Examples
//!
//! ```
//! use chemflow_analysis::{
//!     grouping::{GroupStats, TypeDistribution},
//!     record::{EquipmentRecord, Metric},
//! };
//!
//! let records = vec![
//!     EquipmentRecord::new("Pump-1", "Pump", 120.0, 5.2, 110.0),
//!     EquipmentRecord::new("Valve-1", "Valve", 60.0, 4.1, 95.0),
//!     EquipmentRecord::new("Pump-2", "Pump", 130.0, 5.6, 118.0),
//! ];
//!
//! let by_type = GroupStats::from_records(&records, Metric::Pressure);
//! assert_eq!(by_type.get("Valve").unwrap().max, 4.1);
//!
//! let distribution = TypeDistribution::from_records(&records);
//! assert_eq!(distribution.get("Pump"), 2);
//! ```

use chemflow_stats::StatsError;

use crate::record::Metric;

pub mod dashboard;
pub mod filter;
pub mod grouping;
pub mod record;
pub mod sampling;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("no finite {metric} values to summarize")]
    EmptyMetric { metric: Metric, source: StatsError },
}
