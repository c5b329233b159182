//! Market endpoints: quote, option expiration dates, option chains.
//!
//! The [`MarketData`] trait is the seam the chain aggregator is written
//! against; [`EtradeClient`] is the production implementation.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use crate::client::EtradeClient;
use crate::error::{EtradeError, Result};
use crate::types::market::*;

/// Read-only market data calls used to build a chain document.
///
/// Implementations do no caching and no retries; transport and auth errors
/// propagate unmodified.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Raw quote structure for `symbol` (`All`, `Product`, `dateTimeUTC`, ...).
    async fn get_quote(&self, symbol: &str) -> Result<RawMap>;

    /// Raw `{year, month, day}` records for every listed expiration.
    async fn get_option_expire_dates(&self, symbol: &str) -> Result<Vec<RawMap>>;

    /// Put/call pairs for every strike at `expiration_date`.
    async fn get_option_chains(
        &self,
        symbol: &str,
        expiration_date: NaiveDate,
    ) -> Result<Vec<OptionPair>>;
}

#[async_trait]
impl MarketData for EtradeClient {
    /// **Endpoint:** `GET /v1/market/quote/{symbol}.json?requireEarningsDate=true`
    async fn get_quote(&self, symbol: &str) -> Result<RawMap> {
        let path = format!("/v1/market/quote/{}.json", urlencoding::encode(symbol));
        let envelope: QuoteEnvelope = self
            .get(&path, &[("requireEarningsDate", "true")])
            .await?;

        envelope
            .quote_response
            .quote_data
            .into_vec()
            .into_iter()
            .next()
            .ok_or_else(|| EtradeError::invalid_response(format!("no QuoteData for {symbol}")))
    }

    /// **Endpoint:** `GET /v1/market/optionexpiredate.json?symbol={symbol}`
    async fn get_option_expire_dates(&self, symbol: &str) -> Result<Vec<RawMap>> {
        let envelope: OptionExpireDateEnvelope = self
            .get("/v1/market/optionexpiredate.json", &[("symbol", symbol)])
            .await?;
        Ok(envelope.response.expiration_date.into_vec())
    }

    /// **Endpoint:** `GET /v1/market/optionchains.json?symbol=..&expiryYear=..&expiryMonth=..&expiryDay=..`
    async fn get_option_chains(
        &self,
        symbol: &str,
        expiration_date: NaiveDate,
    ) -> Result<Vec<OptionPair>> {
        let year = expiration_date.year().to_string();
        let month = expiration_date.month().to_string();
        let day = expiration_date.day().to_string();

        let envelope: OptionChainEnvelope = self
            .get(
                "/v1/market/optionchains.json",
                &[
                    ("symbol", symbol),
                    ("expiryYear", year.as_str()),
                    ("expiryMonth", month.as_str()),
                    ("expiryDay", day.as_str()),
                ],
            )
            .await?;
        Ok(envelope.response.option_pair.into_vec())
    }
}
