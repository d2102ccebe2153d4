//! Per-type aggregation
//!
//! Both outputs here are keyed by the equipment type label and keep a stable
//! category order so chart axes and legends do not reshuffle between runs:
//!
//! - [`GroupStats`]: min / mean / max of one metric per type
//! - [`TypeDistribution`]: number of records per type
//!
//! Unless an explicit category list is given, categories appear in the order
//! they are first seen in the record sequence.
//!
//! Grouped statistics report the raw extremes of each group. This differs
//! from the box plot, whose whiskers are fence-clipped; both conventions are
//! kept as-is because the charts are read differently.

use std::collections::HashSet;

use chemflow_stats::descriptive::RangeStats;
use serde::Serialize;

use crate::{
    filter,
    record::{EquipmentRecord, Metric},
};

/// Returns the distinct equipment types in first-seen order.
///
/// # Examples
///
/// ```
/// use chemflow_analysis::{grouping::category_order, record::EquipmentRecord};
///
/// let records = ["A", "B", "A", "C", "B"]
///     .map(|ty| EquipmentRecord::new("x", ty, 0.0, 0.0, 0.0));
/// assert_eq!(category_order(&records), vec!["A", "B", "C"]);
/// ```
#[must_use]
pub fn category_order(records: &[EquipmentRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| record.equipment_type.as_str())
        .filter(|category| seen.insert(*category))
        .collect()
}

/// Statistics of one metric for a single equipment type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    #[serde(flatten)]
    pub stats: RangeStats,
}

/// Min / mean / max of one metric for each equipment type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub metric: Metric,
    pub groups: Vec<CategoryStats>,
}

impl GroupStats {
    /// Aggregates over every type present in `records`, in first-seen order.
    #[must_use]
    pub fn from_records(records: &[EquipmentRecord], metric: Metric) -> Self {
        let categories = category_order(records);
        Self::for_categories(records, metric, &categories)
    }

    /// Aggregates over an explicit list of categories, in the given order.
    ///
    /// A category without any finite value (including one that never occurs in
    /// `records`) reports [`RangeStats::ZERO`], so the result always has one
    /// entry per requested category.
    #[must_use]
    pub fn for_categories<S>(records: &[EquipmentRecord], metric: Metric, categories: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let groups = categories
            .iter()
            .map(|category| {
                let category = category.as_ref();
                let members = records
                    .iter()
                    .filter(|record| record.equipment_type == category);
                let stats = RangeStats::new(filter::finite_values(members, metric))
                    .unwrap_or(RangeStats::ZERO);
                CategoryStats {
                    category: category.to_owned(),
                    stats,
                }
            })
            .collect();
        Self { metric, groups }
    }

    /// Looks up the statistics of a category.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&RangeStats> {
        self.groups
            .iter()
            .find(|group| group.category == category)
            .map(|group| &group.stats)
    }
}

/// Number of records of one equipment type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Number of records per equipment type, independent of any metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDistribution {
    pub counts: Vec<CategoryCount>,
}

impl TypeDistribution {
    /// Counts records per type, in first-seen order.
    ///
    /// # Examples
    ///
    /// ```
    /// use chemflow_analysis::{grouping::TypeDistribution, record::EquipmentRecord};
    ///
    /// let records = ["A", "B", "A", "C", "B"]
    ///     .map(|ty| EquipmentRecord::new("x", ty, 0.0, 0.0, 0.0));
    /// let distribution = TypeDistribution::from_records(&records);
    /// let counts = distribution
    ///     .counts
    ///     .iter()
    ///     .map(|c| (c.category.as_str(), c.count))
    ///     .collect::<Vec<_>>();
    /// assert_eq!(counts, vec![("A", 2), ("B", 2), ("C", 1)]);
    /// ```
    #[must_use]
    pub fn from_records(records: &[EquipmentRecord]) -> Self {
        let mut counts = Vec::<CategoryCount>::new();
        for record in records {
            // Linear scan keeps first-seen order; type counts are small.
            match counts
                .iter_mut()
                .find(|entry| entry.category == record.equipment_type)
            {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    category: record.equipment_type.clone(),
                    count: 1,
                }),
            }
        }
        Self { counts }
    }

    /// Looks up the count of a category; unknown categories count zero.
    #[must_use]
    pub fn get(&self, category: &str) -> usize {
        self.counts
            .iter()
            .find(|entry| entry.category == category)
            .map_or(0, |entry| entry.count)
    }

    /// Total number of records counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    /// Category labels in order.
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.counts.iter().map(|entry| entry.category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ty: &str, flowrate: f64) -> EquipmentRecord {
        EquipmentRecord::new(format!("{ty}-unit"), ty, flowrate, 0.0, 0.0)
    }

    #[test]
    fn test_group_stats_use_raw_extremes() {
        let records = [
            record("Pump", 10.0),
            record("Valve", 1.0),
            record("Pump", 30.0),
            record("Pump", 1000.0),
            record("Valve", 3.0),
        ];
        let stats = GroupStats::from_records(&records, Metric::Flowrate);
        assert_eq!(stats.groups.len(), 2);
        assert_eq!(stats.groups[0].category, "Pump");
        assert_eq!(stats.groups[1].category, "Valve");

        let pump = stats.get("Pump").unwrap();
        assert_eq!(pump.min, 10.0);
        assert_eq!(pump.max, 1000.0);
        assert!((pump.mean - 346.666_666_666_666_7).abs() < 1e-9);

        let valve = stats.get("Valve").unwrap();
        assert_eq!(*valve, RangeStats { min: 1.0, mean: 2.0, max: 3.0 });
    }

    #[test]
    fn test_group_without_finite_values_is_zero() {
        let records = [record("Pump", 10.0), record("Mixer", f64::NAN)];
        let stats = GroupStats::from_records(&records, Metric::Flowrate);
        assert_eq!(stats.get("Mixer"), Some(&RangeStats::ZERO));
    }

    #[test]
    fn test_explicit_categories_keep_shape() {
        let records = [record("Pump", 10.0), record("Valve", 2.0)];
        let stats =
            GroupStats::for_categories(&records, Metric::Flowrate, &["Valve", "Reactor", "Pump"]);
        let order = stats
            .groups
            .iter()
            .map(|g| g.category.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["Valve", "Reactor", "Pump"]);
        assert_eq!(stats.get("Reactor"), Some(&RangeStats::ZERO));
        assert_eq!(stats.get("Pump").unwrap().mean, 10.0);
    }

    #[test]
    fn test_distribution_counts_ignore_metric_values() {
        let records = [
            record("A", f64::NAN),
            record("B", 1.0),
            record("A", 2.0),
            record("C", f64::NAN),
            record("B", 3.0),
        ];
        let distribution = TypeDistribution::from_records(&records);
        assert_eq!(distribution.categories().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(distribution.get("A"), 2);
        assert_eq!(distribution.get("B"), 2);
        assert_eq!(distribution.get("C"), 1);
        assert_eq!(distribution.get("D"), 0);
        assert_eq!(distribution.total(), records.len());
    }

    #[test]
    fn test_empty_records() {
        assert!(category_order(&[]).is_empty());
        assert!(GroupStats::from_records(&[], Metric::Pressure).groups.is_empty());
        assert!(TypeDistribution::from_records(&[]).counts.is_empty());
    }

    #[test]
    fn test_serialized_group_is_flat() {
        let stats = GroupStats::from_records(&[record("Pump", 4.0)], Metric::Flowrate);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["metric"], "Flowrate");
        assert_eq!(json["groups"][0]["category"], "Pump");
        assert_eq!(json["groups"][0]["mean"], 4.0);
    }
}
