#![allow(missing_docs)]
//! Market types: quote, option expiration dates, option chains.
//!
//! The API nests every payload one level inside a `*Response` object. Leaf
//! records are kept as loosely-typed JSON mappings because their field sets
//! differ by environment and by security type; [`crate::normalize`] turns the
//! string-encoded numbers inside them into real numbers.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A raw JSON object as returned by the API.
pub type RawMap = Map<String, Value>;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A field that holds a list, or a bare object when the list has one element.
///
/// XML-derived payloads collapse single-element lists, so both shapes are
/// accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::One(t) => vec![t],
        }
    }
}

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

/// Response from `GET /v1/market/quote/{symbols}`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteEnvelope {
    #[serde(rename = "QuoteResponse")]
    pub quote_response: QuoteResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    /// One entry per requested symbol: `All`, `Product`, `dateTimeUTC`, ...
    #[serde(rename = "QuoteData")]
    pub quote_data: OneOrMany<RawMap>,
}

// ---------------------------------------------------------------------------
// Option expiration dates
// ---------------------------------------------------------------------------

/// Response from `GET /v1/market/optionexpiredate`.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionExpireDateEnvelope {
    #[serde(rename = "OptionExpireDateResponse")]
    pub response: OptionExpireDateResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionExpireDateResponse {
    /// Raw `{year, month, day, expiryType}` records.
    #[serde(rename = "ExpirationDate")]
    pub expiration_date: OneOrMany<RawMap>,
}

// ---------------------------------------------------------------------------
// Option chains
// ---------------------------------------------------------------------------

/// The put and call contracts at a single strike.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionPair {
    #[serde(rename = "Put")]
    pub put: RawMap,
    #[serde(rename = "Call")]
    pub call: RawMap,
}

/// Response from `GET /v1/market/optionchains`.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainEnvelope {
    #[serde(rename = "OptionChainResponse")]
    pub response: OptionChainResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainResponse {
    #[serde(rename = "OptionPair")]
    pub option_pair: OneOrMany<OptionPair>,
}
