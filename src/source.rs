//! Resolving a dataset source (local path or URL) into loaded records.

use std::io::Read;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::loader::load_csv;
use crate::record::Record;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads the survey dataset from a local file or an HTTP(S) URL.
///
/// Gzip-compressed input is detected by its magic bytes and decompressed
/// before parsing. Any failure aborts the load; no partial dataset is
/// returned.
#[tracing::instrument]
pub async fn load_source(source: &str) -> Result<Vec<Record>> {
    load_source_with(&BasicClient::new(), source).await
}

/// Same as [`load_source`], with URLs fetched through `client`.
pub async fn load_source_with<C: HttpClient>(client: &C, source: &str) -> Result<Vec<Record>> {
    let bytes = read_source(client, source).await?;
    let bytes = decompress_if_gzipped(bytes)?;

    let records = load_csv(bytes.as_slice())
        .with_context(|| format!("failed to parse survey data from '{source}'"))?;

    info!(records = records.len(), "Survey dataset loaded");
    Ok(records)
}

async fn read_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http") {
        fetch_bytes(client, source).await
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read '{source}'"))
    }
}

/// Returns `bytes` unchanged unless they start with the gzip header.
pub fn decompress_if_gzipped(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    let mut out = Vec::new();
    GzDecoder::new(bytes.as_slice())
        .read_to_end(&mut out)
        .context("failed to decompress gzip dataset")?;
    debug!(compressed = bytes.len(), decompressed = out.len(), "Gunzipped dataset");
    Ok(out)
}
