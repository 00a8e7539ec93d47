//! The typed survey record and field coercion from raw text.

use serde::Serialize;

use crate::error::ParseError;

/// Household size, the grouping key shared by the box plot and the scatter
/// highlight.
pub type FamilySize = u32;

/// Header names recognized in the survey CSV.
pub mod columns {
    pub const CHAIN: &str = "Chain";
    pub const PAYMENT_METHOD: &str = "PaymentMethod";
    pub const FAMILY_SIZE: &str = "FamilySize";
    pub const PURCHASE_AMOUNT: &str = "PurchaseAmount";
    pub const AGE: &str = "Age";
    pub const INCOME: &str = "Income";

    pub const REQUIRED: [&str; 6] = [
        CHAIN,
        PAYMENT_METHOD,
        FAMILY_SIZE,
        PURCHASE_AMOUNT,
        AGE,
        INCOME,
    ];
}

/// One survey response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub chain: String,
    pub payment_method: String,
    pub age: u32,
    pub income: f64,
    pub purchase_amount: f64,
    pub family_size: FamilySize,
}

impl Record {
    /// Builds a record from a row accessor.
    ///
    /// `field` looks up the raw text of a column by header name; `row` is the
    /// 1-based data row number used in error messages.
    pub fn from_fields<'a, F>(row: usize, field: F) -> Result<Self, ParseError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let chain = required(row, columns::CHAIN, field(columns::CHAIN))?;
        let payment_method =
            required(row, columns::PAYMENT_METHOD, field(columns::PAYMENT_METHOD))?;

        let age = parse_count(row, columns::AGE, field(columns::AGE))?;
        let family_size = parse_count(row, columns::FAMILY_SIZE, field(columns::FAMILY_SIZE))?;
        if family_size == 0 {
            return Err(invalid(row, columns::FAMILY_SIZE, "0"));
        }

        let income = parse_amount(row, columns::INCOME, field(columns::INCOME))?;
        let purchase_amount =
            parse_amount(row, columns::PURCHASE_AMOUNT, field(columns::PURCHASE_AMOUNT))?;

        Ok(Record {
            chain: chain.to_string(),
            payment_method: payment_method.to_string(),
            age,
            income,
            purchase_amount,
            family_size,
        })
    }
}

fn required<'a>(
    row: usize,
    column: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ParseError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ParseError::MissingValue { row, column }),
    }
}

fn parse_count(row: usize, column: &'static str, value: Option<&str>) -> Result<u32, ParseError> {
    let raw = required(row, column, value)?;
    raw.parse::<u32>().map_err(|_| invalid(row, column, raw))
}

// Amounts must be finite and non-negative; "NaN" and "inf" parse as f64 but are rejected.
fn parse_amount(row: usize, column: &'static str, value: Option<&str>) -> Result<f64, ParseError> {
    let raw = required(row, column, value)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(invalid(row, column, raw)),
    }
}

fn invalid(row: usize, column: &'static str, raw: &str) -> ParseError {
    ParseError::InvalidNumber {
        row,
        column,
        value: raw.to_string(),
    }
}
