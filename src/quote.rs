//! Quote flattening.
//!
//! The API returns a quote as
//! `{ "All": {...}, "Product": {"symbol", "securityType", ...}, "dateTimeUTC", "dateTime", ... }`.
//! [`alter_quote`] hoists the `All` fields to the top level, converts their
//! string values with [`strvals_to_real`], and attaches the handful of
//! top-level and `Product` fields callers care about.

use serde::Serialize;
use serde_json::Value;

use crate::error::{EtradeError, Result};
use crate::normalize::strvals_to_real;
use crate::types::market::RawMap;

/// Top-level fields copied as-is when present. The sandbox omits
/// `hasMiniOptions`.
const OPTIONAL_FIELDS: [&str; 4] = ["dateTime", "quoteStatus", "ahFlag", "hasMiniOptions"];

/// A flat quote: field name → value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Quote(RawMap);

impl Quote {
    /// Ticker symbol, as reported in `Product.symbol`.
    pub fn symbol(&self) -> Option<&str> {
        self.0.get("symbol").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_map(&self) -> &RawMap {
        &self.0
    }
}

/// Flatten one raw `QuoteData` entry into a [`Quote`].
///
/// Fails if `All`, `Product`, `Product.securityType`, `Product.symbol` or
/// `dateTimeUTC` is missing, or if `dateTimeUTC` is not an integer.
pub fn alter_quote(raw: &RawMap) -> Result<Quote> {
    let all = required_object(raw, "All")?;
    let mut quote = strvals_to_real(all);

    let date_time_utc = raw
        .get("dateTimeUTC")
        .ok_or_else(|| EtradeError::invalid_response("quote lacks dateTimeUTC"))?;
    quote.insert(
        "dateTimeUTC".to_owned(),
        Value::from(force_integer(date_time_utc)?),
    );

    for field in OPTIONAL_FIELDS {
        match raw.get(field) {
            Some(v) => {
                quote.insert(field.to_owned(), v.clone());
            }
            None => tracing::debug!(field, "quote field absent"),
        }
    }

    let product = required_object(raw, "Product")?;
    for field in ["securityType", "symbol"] {
        let v = product
            .get(field)
            .ok_or_else(|| EtradeError::invalid_response(format!("quote Product lacks {field}")))?;
        quote.insert(field.to_owned(), v.clone());
    }

    Ok(Quote(quote))
}

fn required_object<'a>(raw: &'a RawMap, key: &str) -> Result<&'a RawMap> {
    raw.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| EtradeError::invalid_response(format!("quote lacks object {key}")))
}

/// Integer from a JSON integer or an integer-valued string.
fn force_integer(v: &Value) -> Result<i64> {
    let parsed = match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| EtradeError::invalid_response(format!("dateTimeUTC is not an integer: {v}")))
}
