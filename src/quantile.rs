//! Five-number summaries and 1.5×IQR outliers per group, for the box plot.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, error};

use crate::record::Record;

/// Fence multiplier applied to the interquartile range.
pub const FENCE_FACTOR: f64 = 1.5;

/// Quantile of an ascending slice using linear interpolation between order
/// statistics (R type 7): index `p·(n−1)`.
///
/// Returns `None` for an empty slice or a NaN `p`. `p` outside `[0, 1]`
/// clamps to the minimum or maximum.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || p.is_nan() {
        return None;
    }
    if p <= 0.0 || n < 2 {
        return Some(sorted[0]);
    }
    if p >= 1.0 {
        return Some(sorted[n - 1]);
    }

    let index = p * (n - 1) as f64;
    let lo = index.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let lower = sorted[lo];
    let upper = sorted[hi];

    Some(lower + (upper - lower) * (index - lo as f64))
}

/// Box-plot statistics for one group of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Values strictly outside the fences, ascending.
    pub outliers: Vec<f64>,
}

impl GroupSummary {
    /// Summarizes a group of values in any order.
    ///
    /// An empty group has no summary.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        values.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&values, 0.25)?;
        let median = quantile_sorted(&values, 0.5)?;
        let q3 = quantile_sorted(&values, 0.75)?;

        let iqr = q3 - q1;
        let lower_fence = q1 - FENCE_FACTOR * iqr;
        let upper_fence = q3 + FENCE_FACTOR * iqr;

        let outliers = values
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Some(GroupSummary {
            count: values.len(),
            min: values[0],
            max: values[values.len() - 1],
            q1,
            median,
            q3,
            iqr,
            lower_fence,
            upper_fence,
            outliers,
        })
    }

    /// Whether `value` lies inside `[lower_fence, upper_fence]`.
    pub fn within_fences(&self, value: f64) -> bool {
        value >= self.lower_fence && value <= self.upper_fence
    }
}

/// A group key paired with its summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedSummary<K> {
    pub key: K,
    #[serde(flatten)]
    pub summary: GroupSummary,
}

/// Summaries in first-occurrence order of their group keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupedSummaries<K> {
    groups: Vec<KeyedSummary<K>>,
}

/// Groups records by `group_key` and summarizes `value_of` within each group.
pub fn summarize<K, G, V>(records: &[Record], group_key: G, value_of: V) -> GroupedSummaries<K>
where
    K: Eq + Hash + Clone,
    G: Fn(&Record) -> K,
    V: Fn(&Record) -> f64,
{
    let mut order: Vec<K> = Vec::new();
    let mut buckets: HashMap<K, Vec<f64>> = HashMap::new();

    for record in records {
        let key = group_key(record);
        buckets
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(value_of(record));
    }

    let mut groups = Vec::with_capacity(order.len());
    for key in order {
        let values = buckets.remove(&key).unwrap_or_default();
        match GroupSummary::from_values(values) {
            Some(summary) => groups.push(KeyedSummary { key, summary }),
            None => error!("Observed group has no values; skipping summary"),
        }
    }

    debug!(
        records = records.len(),
        groups = groups.len(),
        "Summarized groups"
    );
    GroupedSummaries { groups }
}

impl<K> GroupedSummaries<K> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &GroupSummary)> {
        self.groups.iter().map(|g| (&g.key, &g.summary))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|g| &g.key)
    }

    pub fn get(&self, key: &K) -> Option<&GroupSummary>
    where
        K: PartialEq,
    {
        self.groups
            .iter()
            .find(|g| &g.key == key)
            .map(|g| &g.summary)
    }

    /// Reorders groups by ascending key.
    pub fn sorted_by_key(mut self) -> Self
    where
        K: Ord,
    {
        self.groups.sort_by(|a, b| a.key.cmp(&b.key));
        self
    }

    pub fn into_vec(self) -> Vec<KeyedSummary<K>> {
        self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(family_size: u32, purchase_amount: f64) -> Record {
        Record {
            chain: "A".into(),
            payment_method: "Card".into(),
            age: 40,
            income: 50000.0,
            purchase_amount,
            family_size,
        }
    }

    #[test]
    fn test_quantile_interpolates_between_order_statistics() {
        let values = [1.0, 2.0, 3.0, 4.0];

        assert_eq!(quantile_sorted(&values, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&values, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&values, 0.75), Some(3.25));
    }

    #[test]
    fn test_quantile_edges() {
        let values = [3.0, 7.0, 9.0];

        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&values, f64::NAN), None);
        assert_eq!(quantile_sorted(&values, 0.0), Some(3.0));
        assert_eq!(quantile_sorted(&values, 1.0), Some(9.0));
        assert_eq!(quantile_sorted(&values, -1.0), Some(3.0));
        assert_eq!(quantile_sorted(&values, 2.0), Some(9.0));
    }

    #[test]
    fn test_summary_with_one_outlier() {
        let summary = GroupSummary::from_values(vec![10.0, 20.0, 30.0, 40.0, 100.0]).unwrap();

        assert_eq!(summary.q1, 20.0);
        assert_eq!(summary.median, 30.0);
        assert_eq!(summary.q3, 40.0);
        assert_eq!(summary.iqr, 20.0);
        assert_eq!(summary.lower_fence, -10.0);
        assert_eq!(summary.upper_fence, 70.0);
        assert_eq!(summary.outliers, vec![100.0]);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 100.0);
    }

    #[test]
    fn test_summary_input_order_does_not_matter() {
        let shuffled = GroupSummary::from_values(vec![100.0, 30.0, 10.0, 40.0, 20.0]).unwrap();
        let sorted = GroupSummary::from_values(vec![10.0, 20.0, 30.0, 40.0, 100.0]).unwrap();

        assert_eq!(shuffled, sorted);
    }

    #[test]
    fn test_single_value_group_collapses() {
        let summary = GroupSummary::from_values(vec![42.0]).unwrap();

        assert_eq!(summary.q1, 42.0);
        assert_eq!(summary.median, 42.0);
        assert_eq!(summary.q3, 42.0);
        assert_eq!(summary.iqr, 0.0);
        assert_eq!(summary.lower_fence, 42.0);
        assert_eq!(summary.upper_fence, 42.0);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_empty_group_has_no_summary() {
        assert!(GroupSummary::from_values(Vec::new()).is_none());
    }

    #[test]
    fn test_outliers_on_both_sides_are_ascending() {
        let summary =
            GroupSummary::from_values(vec![50.0, 51.0, 52.0, 53.0, 54.0, -40.0, 200.0, 150.0])
                .unwrap();

        assert_eq!(summary.outliers, vec![-40.0, 150.0, 200.0]);
        for v in [50.0, 51.0, 52.0, 53.0, 54.0] {
            assert!(summary.within_fences(v));
        }
    }

    #[test]
    fn test_summarize_groups_in_first_occurrence_order() {
        let records = vec![
            record(3, 10.0),
            record(1, 5.0),
            record(3, 30.0),
            record(2, 7.0),
            record(1, 15.0),
        ];
        let groups = summarize(&records, |r| r.family_size, |r| r.purchase_amount);

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(groups.get(&3).unwrap().median, 20.0);
        assert_eq!(groups.get(&1).unwrap().median, 10.0);
        assert_eq!(groups.get(&2).unwrap().count, 1);
        assert!(groups.get(&9).is_none());
    }

    #[test]
    fn test_sorted_by_key() {
        let records = vec![record(4, 1.0), record(2, 1.0), record(3, 1.0)];
        let groups = summarize(&records, |r| r.family_size, |r| r.purchase_amount).sorted_by_key();

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_summarize_empty_records() {
        let groups = summarize(&[], |r| r.family_size, |r| r.purchase_amount);
        assert!(groups.is_empty());
    }
}
