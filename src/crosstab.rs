//! Two-way categorical counts feeding the grouped bar chart.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::record::Record;

/// Dense contingency table over two categorical dimensions.
///
/// Row and column values keep first-occurrence order from the input, and
/// every cell of the full cross product is present (zero when unobserved).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    rows: Vec<String>,
    columns: Vec<String>,
    counts: Vec<Vec<usize>>,
}

/// Counts records by `dim_a` (rows) and `dim_b` (columns).
pub fn tabulate<A, B>(records: &[Record], dim_a: A, dim_b: B) -> CrossTab
where
    A: Fn(&Record) -> &str,
    B: Fn(&Record) -> &str,
{
    let mut rows: Vec<String> = Vec::new();
    let mut columns: Vec<String> = Vec::new();
    let mut row_index: HashMap<&str, usize> = HashMap::new();
    let mut column_index: HashMap<&str, usize> = HashMap::new();
    let mut observed: HashMap<(usize, usize), usize> = HashMap::new();

    for record in records {
        let a = dim_a(record);
        let b = dim_b(record);

        let r = *row_index.entry(a).or_insert_with(|| {
            rows.push(a.to_string());
            rows.len() - 1
        });
        let c = *column_index.entry(b).or_insert_with(|| {
            columns.push(b.to_string());
            columns.len() - 1
        });

        *observed.entry((r, c)).or_default() += 1;
    }

    let mut counts = vec![vec![0; columns.len()]; rows.len()];
    for ((r, c), n) in observed {
        counts[r][c] = n;
    }

    debug!(
        records = records.len(),
        rows = rows.len(),
        columns = columns.len(),
        "Cross-tabulated records"
    );

    CrossTab {
        rows,
        columns,
        counts,
    }
}

impl CrossTab {
    /// Chain × payment method, the layout of the grouped bar chart.
    pub fn by_chain_and_payment(records: &[Record]) -> Self {
        tabulate(records, |r| r.chain.as_str(), |r| r.payment_method.as_str())
    }

    /// Distinct row-dimension values in first-occurrence order.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Distinct column-dimension values in first-occurrence order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Count for a cell, or `None` if either value was never observed.
    pub fn count(&self, row: &str, column: &str) -> Option<usize> {
        let r = self.rows.iter().position(|v| v == row)?;
        let c = self.columns.iter().position(|v| v == column)?;
        Some(self.counts[r][c])
    }

    /// Sum of a row across all columns.
    pub fn row_total(&self, row: &str) -> Option<usize> {
        let r = self.rows.iter().position(|v| v == row)?;
        Some(self.counts[r].iter().sum())
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Every `(row, column, count)` triple, rows outer, columns inner.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, usize)> + '_ {
        self.rows.iter().zip(&self.counts).flat_map(move |(row, counts)| {
            self.columns
                .iter()
                .zip(counts)
                .map(move |(column, &n)| (row.as_str(), column.as_str(), n))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
