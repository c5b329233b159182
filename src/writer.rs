//! Chain document assembly and output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::chains::OptionChains;
use crate::constants::OUTPUT_TIMESTAMP_FORMAT;
use crate::error::Result;
use crate::normalize::strvals_to_real;
use crate::quote::Quote;
use crate::types::market::RawMap;

/// Location and size of a written chain document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

/// Build `{ "quote": .., "YYYY-MM-DD": [entry, ..], .. }` with every chain
/// entry normalized. Keys keep insertion order: `quote` first, then the
/// expirations as listed by the API.
pub fn build_chain_document(quote: &Quote, chains: &OptionChains) -> RawMap {
    let mut doc = RawMap::new();
    doc.insert("quote".to_owned(), Value::Object(quote.as_map().clone()));

    for chain in chains {
        let entries = chain
            .entries
            .iter()
            .map(|entry| Value::Object(strvals_to_real(entry)))
            .collect();
        doc.insert(chain.expiry.to_string(), Value::Array(entries));
    }
    doc
}

/// `<symbol>_chains_<YYYYmmdd-HHMMSS>.json`
pub fn chain_file_name(symbol: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_chains_{}.json",
        symbol,
        timestamp.format(OUTPUT_TIMESTAMP_FORMAT)
    )
}

/// Serialize `document` into `dir` under [`chain_file_name`].
pub fn write_chain_document(
    dir: &Path,
    symbol: &str,
    document: &RawMap,
    timestamp: NaiveDateTime,
) -> Result<WrittenDocument> {
    let path = dir.join(chain_file_name(symbol, timestamp));

    let mut out = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(&mut out, document)?;
    out.flush()?;
    drop(out);

    let size = fs::metadata(&path)?.len();
    tracing::debug!(path = %path.display(), size, "chain document written");
    Ok(WrittenDocument { path, size })
}
