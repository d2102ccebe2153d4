//! Deterministic prefix samples for scatter and bar charts
//!
//! Charts that plot individual records only look at the head of the record
//! sequence. Taking a prefix instead of a random sample keeps the output
//! reproducible for the same input.
//!
//! These views do **not** drop non-finite values: a record with a missing
//! reading still occupies its slot, and the renderer leaves a gap.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{EquipmentRecord, Metric};

/// Number of records plotted in the correlation scatter chart.
pub const CORRELATION_SAMPLE_SIZE: usize = 50;

/// Number of records in the flowrate / pressure comparison bars.
pub const TOP_N: usize = 10;

/// Number of records in the temperature trend line.
pub const TREND_LEN: usize = 15;

/// Two metrics plotted against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricPair {
    pub x: Metric,
    pub y: Metric,
}

impl MetricPair {
    #[must_use]
    pub const fn new(x: Metric, y: Metric) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for MetricPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.x, self.y)
    }
}

/// Pairings shown in the correlation chart.
pub const DEFAULT_CORRELATION_PAIRS: [MetricPair; 2] = [
    MetricPair::new(Metric::Flowrate, Metric::Pressure),
    MetricPair::new(Metric::Flowrate, Metric::Temperature),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// `(x, y)` points of one metric pairing over a record prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSample {
    pub pair: MetricPair,
    pub points: Vec<Point>,
}

impl PairSample {
    /// Samples the first `sample_size` records, one point per record.
    ///
    /// # Examples
    ///
    /// ```
    /// use chemflow_analysis::{
    ///     record::{EquipmentRecord, Metric},
    ///     sampling::{MetricPair, PairSample},
    /// };
    ///
    /// let records = [
    ///     EquipmentRecord::new("P-1", "Pump", 1.0, 2.0, 3.0),
    ///     EquipmentRecord::new("P-2", "Pump", 4.0, f64::NAN, 6.0),
    /// ];
    /// let pair = MetricPair::new(Metric::Flowrate, Metric::Pressure);
    /// let sample = PairSample::from_records(&records, pair, 50);
    /// assert_eq!(sample.points.len(), 2);
    /// assert!(sample.points[1].y.is_nan());
    /// ```
    #[must_use]
    pub fn from_records(records: &[EquipmentRecord], pair: MetricPair, sample_size: usize) -> Self {
        let points = records
            .iter()
            .take(sample_size)
            .map(|record| Point {
                x: record.metric(pair.x),
                y: record.metric(pair.y),
            })
            .collect();
        Self { pair, points }
    }
}

/// Samples every pairing over the same record prefix.
#[must_use]
pub fn pair_samples(
    records: &[EquipmentRecord],
    pairs: &[MetricPair],
    sample_size: usize,
) -> Vec<PairSample> {
    pairs
        .iter()
        .map(|&pair| PairSample::from_records(records, pair, sample_size))
        .collect()
}

/// One bar or line point labeled with the equipment name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

/// A metric over the first records, labeled by equipment name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeries {
    pub metric: Metric,
    pub points: Vec<LabeledValue>,
}

impl LabeledSeries {
    /// Takes `metric` from the first `len` records.
    #[must_use]
    pub fn prefix(records: &[EquipmentRecord], metric: Metric, len: usize) -> Self {
        let points = records
            .iter()
            .take(len)
            .map(|record| LabeledValue {
                label: record.name.clone(),
                value: record.metric(metric),
            })
            .collect();
        Self { metric, points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: u32) -> Vec<EquipmentRecord> {
        (0..n)
            .map(|i| {
                let i = f64::from(i);
                EquipmentRecord::new(format!("E-{i}"), "Pump", i, i * 10.0, i * 100.0)
            })
            .collect()
    }

    #[test]
    fn test_short_input_keeps_every_record_in_order() {
        let mut records = records(5);
        records[2].pressure = f64::NAN;
        let sample = PairSample::from_records(
            &records,
            MetricPair::new(Metric::Flowrate, Metric::Pressure),
            CORRELATION_SAMPLE_SIZE,
        );
        assert_eq!(sample.points.len(), 5);
        let xs = sample.points.iter().map(|p| p.x).collect::<Vec<_>>();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(sample.points[2].x, 2.0);
        assert!(sample.points[2].y.is_nan());
    }

    #[test]
    fn test_long_input_is_capped_to_prefix() {
        let records = records(120);
        let samples = pair_samples(&records, &DEFAULT_CORRELATION_PAIRS, CORRELATION_SAMPLE_SIZE);
        assert_eq!(samples.len(), 2);
        for sample in &samples {
            assert_eq!(sample.points.len(), CORRELATION_SAMPLE_SIZE);
            assert_eq!(sample.points.last().unwrap().x, 49.0);
        }
        assert_eq!(samples[0].pair.y, Metric::Pressure);
        assert_eq!(samples[0].points[3].y, 30.0);
        assert_eq!(samples[1].pair.y, Metric::Temperature);
        assert_eq!(samples[1].points[3].y, 300.0);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let records = records(80);
        let first = pair_samples(&records, &DEFAULT_CORRELATION_PAIRS, CORRELATION_SAMPLE_SIZE);
        let second = pair_samples(&records, &DEFAULT_CORRELATION_PAIRS, CORRELATION_SAMPLE_SIZE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_labeled_prefix() {
        let records = records(20);
        let trend = LabeledSeries::prefix(&records, Metric::Temperature, TREND_LEN);
        assert_eq!(trend.points.len(), TREND_LEN);
        assert_eq!(trend.points[0].label, "E-0");
        assert_eq!(trend.points[14].value, 1400.0);

        let top = LabeledSeries::prefix(&records[..3], Metric::Flowrate, TOP_N);
        assert_eq!(top.points.len(), 3);
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(DEFAULT_CORRELATION_PAIRS[0].to_string(), "Flowrate vs Pressure");
    }
}
