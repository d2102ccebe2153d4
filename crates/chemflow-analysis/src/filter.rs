//! Metric column extraction
//!
//! Every statistical view starts by projecting the records onto one metric
//! and dropping values that are not finite. Input order is preserved.

use crate::record::{EquipmentRecord, Metric};

/// Iterates over the finite values of `metric`, in record order.
pub fn finite_values<'a, I>(records: I, metric: Metric) -> impl Iterator<Item = f64> + 'a
where
    I: IntoIterator<Item = &'a EquipmentRecord>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .map(move |record| record.metric(metric))
        .filter(|value| value.is_finite())
}

/// Collects the finite values of `metric`, in record order.
///
/// # Examples
///
/// ```
/// use chemflow_analysis::{
///     filter::metric_values,
///     record::{EquipmentRecord, Metric},
/// };
///
/// let records = [
///     EquipmentRecord::new("P-1", "Pump", 3.0, 1.0, 1.0),
///     EquipmentRecord::new("P-2", "Pump", f64::NAN, 1.0, 1.0),
///     EquipmentRecord::new("P-3", "Pump", 1.0, 1.0, 1.0),
/// ];
/// assert_eq!(metric_values(&records, Metric::Flowrate), vec![3.0, 1.0]);
/// ```
#[must_use]
pub fn metric_values(records: &[EquipmentRecord], metric: Metric) -> Vec<f64> {
    finite_values(records, metric).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let records = [
            EquipmentRecord::new("a", "X", 1.0, 30.0, 0.0),
            EquipmentRecord::new("b", "X", 1.0, 10.0, 0.0),
            EquipmentRecord::new("c", "X", 1.0, 20.0, 0.0),
        ];
        assert_eq!(
            metric_values(&records, Metric::Pressure),
            vec![30.0, 10.0, 20.0]
        );
    }

    #[test]
    fn test_drops_non_finite() {
        let records = [
            EquipmentRecord::new("a", "X", 0.0, 0.0, f64::NAN),
            EquipmentRecord::new("b", "X", 0.0, 0.0, f64::INFINITY),
            EquipmentRecord::new("c", "X", 0.0, 0.0, -5.0),
            EquipmentRecord::new("d", "X", 0.0, 0.0, f64::NEG_INFINITY),
        ];
        assert_eq!(metric_values(&records, Metric::Temperature), vec![-5.0]);
    }

    #[test]
    fn test_all_excluded_is_empty() {
        let records = [EquipmentRecord::new("a", "X", f64::NAN, 0.0, 0.0)];
        assert!(metric_values(&records, Metric::Flowrate).is_empty());
        assert!(metric_values(&[], Metric::Flowrate).is_empty());
    }
}
