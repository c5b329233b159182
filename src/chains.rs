//! Option chain aggregation.
//!
//! Fetching every chain for a symbol takes one call to list the expiration
//! dates, then one chain call per expiration. The first failure aborts the
//! whole run; there is no partial result.

use chrono::NaiveDate;
use serde_json::Value;

use crate::api::MarketData;
use crate::error::{EtradeError, Result};
use crate::types::market::RawMap;

/// All put and call entries for one expiration date.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiryChain {
    pub expiry: NaiveDate,
    /// Every put, then every call, in strike order as returned.
    pub entries: Vec<RawMap>,
}

/// Chains for every expiration, in the order the API listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionChains(Vec<ExpiryChain>);

impl OptionChains {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpiryChain> {
        self.0.iter()
    }

    /// Entries for `expiry`, if it was fetched.
    pub fn get(&self, expiry: NaiveDate) -> Option<&[RawMap]> {
        self.0
            .iter()
            .find(|c| c.expiry == expiry)
            .map(|c| c.entries.as_slice())
    }
}

impl From<Vec<ExpiryChain>> for OptionChains {
    fn from(chains: Vec<ExpiryChain>) -> Self {
        Self(chains)
    }
}

impl IntoIterator for OptionChains {
    type Item = ExpiryChain;
    type IntoIter = std::vec::IntoIter<ExpiryChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OptionChains {
    type Item = &'a ExpiryChain;
    type IntoIter = std::slice::Iter<'a, ExpiryChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Turn raw `{year, month, day}` records into calendar dates.
///
/// Components may be strings (`"2024"`) or numbers (`2024`).
pub fn option_expire_dates(raw: &[RawMap]) -> Result<Vec<NaiveDate>> {
    raw.iter()
        .map(|rec| {
            let year = date_component(rec, "year")?;
            let month = date_component(rec, "month")?;
            let day = date_component(rec, "day")?;
            i32::try_from(year)
                .ok()
                .zip(u32::try_from(month).ok())
                .zip(u32::try_from(day).ok())
                .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
                .ok_or_else(|| {
                    EtradeError::invalid_response(format!(
                        "invalid expiration date {year}-{month}-{day}"
                    ))
                })
        })
        .collect()
}

fn date_component(rec: &RawMap, field: &str) -> Result<i64> {
    let parsed = match rec.get(field) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        EtradeError::invalid_response(format!("expiration date lacks integer {field}: {rec:?}"))
    })
}

/// Fetch every option chain for `symbol`, keyed by expiration date.
pub async fn get_all_option_chains<M>(api: &M, symbol: &str) -> Result<OptionChains>
where
    M: MarketData + ?Sized,
{
    let raw_dates = api.get_option_expire_dates(symbol).await?;
    let expirations = option_expire_dates(&raw_dates)?;
    tracing::info!(symbol, count = expirations.len(), "option expirations listed");

    let mut chains = Vec::with_capacity(expirations.len());
    for expiry in expirations {
        let pairs = api.get_option_chains(symbol, expiry).await?;

        let mut entries = Vec::with_capacity(pairs.len() * 2);
        entries.extend(pairs.iter().map(|p| p.put.clone()));
        entries.extend(pairs.into_iter().map(|p| p.call));

        tracing::info!(symbol, %expiry, strikes = entries.len() / 2, "fetched option chain");
        chains.push(ExpiryChain { expiry, entries });
    }

    Ok(OptionChains(chains))
}
