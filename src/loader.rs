//! Survey dataset loading: raw rows or CSV text into typed [`Record`]s.

use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::ParseError;
use crate::record::{Record, columns};

/// A loosely-typed input row keyed by column name.
pub type RawRow = HashMap<String, String>;

/// Coerces raw rows into records, failing on the first bad row.
pub fn load(rows: &[RawRow]) -> Result<Vec<Record>, ParseError> {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| Record::from_fields(i + 1, |c| row.get(c).map(String::as_str)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(records = records.len(), "Coerced raw survey rows");
    Ok(records)
}

/// Parses a CSV byte stream with a header row.
///
/// Columns may appear in any order and extra columns are ignored. A missing
/// required column is reported before any data row is read.
pub fn load_csv<R: Read>(reader: R) -> Result<Vec<Record>, ParseError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let index: HashMap<&str, usize> = headers.iter().enumerate().map(|(i, h)| (h, i)).collect();

    if let Some(column) = columns::REQUIRED
        .into_iter()
        .find(|column| !index.contains_key(column))
    {
        return Err(ParseError::MissingColumn { column });
    }

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = result?;
        let record =
            Record::from_fields(i + 1, |c| index.get(c).and_then(|&idx| row.get(idx)))?;
        records.push(record);
    }

    debug!(
        records = records.len(),
        columns = headers.len(),
        "Parsed survey CSV"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Chain,PaymentMethod,FamilySize,PurchaseAmount,Age,Income
FreshMart,Card,3,84.50,34,52000
ValueGrocer,Cash,4,120,45,61000
";

    #[test]
    fn test_load_csv_reads_all_rows() {
        let records = load_csv(SAMPLE.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].chain, "ValueGrocer");
        assert_eq!(records[1].purchase_amount, 120.0);
    }

    #[test]
    fn test_load_csv_tolerates_column_order_and_extra_columns() {
        let csv = "\
Income,Gender,Age,PurchaseAmount,FamilySize,PaymentMethod,Chain
52000,F,34,84.5,3,Card,FreshMart
";
        let records = load_csv(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].chain, "FreshMart");
        assert_eq!(records[0].income, 52000.0);
    }

    #[test]
    fn test_load_csv_missing_column_fails_even_without_rows() {
        let csv = "Chain,PaymentMethod,FamilySize,PurchaseAmount,Age\n";

        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn { column: "Income" }));
    }

    #[test]
    fn test_load_csv_bad_row_aborts_whole_load() {
        let csv = format!("{SAMPLE}GreenBasket,Card,two,10,20,30000\n");

        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidNumber { row: 3, column: "FamilySize", .. }
        ));
    }

    #[test]
    fn test_load_csv_ragged_row_is_a_csv_error() {
        let csv = format!("{SAMPLE}GreenBasket,Card\n");

        assert!(matches!(
            load_csv(csv.as_bytes()).unwrap_err(),
            ParseError::Csv(_)
        ));
    }

    #[test]
    fn test_load_empty_rows() {
        assert!(load(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_load_reports_row_number() {
        let good: RawRow = [
            ("Chain", "A"),
            ("PaymentMethod", "Card"),
            ("FamilySize", "2"),
            ("PurchaseAmount", "10"),
            ("Age", "30"),
            ("Income", "1000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let mut bad = good.clone();
        bad.insert("PaymentMethod".into(), String::new());

        let err = load(&[good, bad]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingValue { row: 2, column: "PaymentMethod" }
        ));
    }
}
