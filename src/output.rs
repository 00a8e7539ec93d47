//! Output formatting and persistence for chart views.
//!
//! Supports pretty-printing, JSON export with a generation timestamp, and a
//! CSV rendering of the cross-tabulation.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::crosstab::CrossTab;

/// Envelope written around every exported view.
#[derive(Debug, Serialize)]
pub struct Export<'a, T: Serialize> {
    pub chart: &'a str,
    pub generated_at: DateTime<Utc>,
    pub data: &'a T,
}

impl<'a, T: Serialize> Export<'a, T> {
    pub fn new(chart: &'a str, data: &'a T) -> Self {
        Export {
            chart,
            generated_at: Utc::now(),
            data,
        }
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let json = to_json(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("failed to write '{path}'"))?;
            info!(path, "JSON written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

/// Writes the table with one row per row value and one column per column
/// value, headed by `row_header`.
pub fn write_crosstab<W: Write>(writer: W, row_header: &str, crosstab: &CrossTab) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header = vec![row_header];
    header.extend(crosstab.columns().iter().map(String::as_str));
    writer.write_record(&header)?;

    for row in crosstab.rows() {
        let mut record = vec![row.clone()];
        for column in crosstab.columns() {
            record.push(crosstab.count(row, column).unwrap_or(0).to_string());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// [`write_crosstab`] to a file, or to stdout when `path` is `None`.
pub fn write_crosstab_csv(path: Option<&str>, row_header: &str, crosstab: &CrossTab) -> Result<()> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(Path::new(path))
                .with_context(|| format!("failed to create '{path}'"))?;
            write_crosstab(file, row_header, crosstab)?;
            info!(path, rows = crosstab.rows().len(), "Cross-tab CSV written");
        }
        None => write_crosstab(std::io::stdout().lock(), row_header, crosstab)?,
    }
    Ok(())
}
