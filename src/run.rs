//! One complete invocation: authenticate, fetch the quote and every option
//! chain, and write the chain document.

use chrono::NaiveDateTime;

use crate::api::MarketData;
use crate::authenticator::{Authenticator, VerificationCodeProvider};
use crate::chains::get_all_option_chains;
use crate::client::EtradeClient;
use crate::config::Config;
use crate::error::{EtradeError, Result};
use crate::quote::alter_quote;
use crate::token_store::TokenStore;
use crate::writer::{WrittenDocument, build_chain_document, write_chain_document};

/// Exit status for a finished run: `0` on success, `1` on any error.
pub fn exit_status<T>(result: &Result<T>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Fetch everything for `symbol` and write it under `config.output_dir`,
/// stamped with `now`.
///
/// The chains are fetched for the symbol the quote reports, which may differ
/// in case or form from the one requested. A failed chain fetch is wrapped
/// in [`EtradeError::Aggregation`] and nothing is written.
pub async fn run(
    config: &Config,
    symbol: &str,
    store: &mut dyn TokenStore,
    verifier: &dyn VerificationCodeProvider,
    now: NaiveDateTime,
) -> Result<WrittenDocument> {
    let auth = Authenticator::new(config.consumer.clone(), config.environment)
        .with_base_urls(config.api_base_url.as_str(), config.auth_base_url.as_str())
        .authenticate(store, verifier)
        .await?;

    let client = EtradeClient::with_base_url(
        config.consumer.clone(),
        auth.credential,
        config.api_base_url.as_str(),
        config.auth_base_url.as_str(),
    )?;

    let quote = alter_quote(&client.get_quote(symbol).await?)?;
    let symbol = quote.symbol().unwrap_or(symbol).to_owned();

    let chains = get_all_option_chains(&client, &symbol)
        .await
        .map_err(|e| EtradeError::Aggregation {
            symbol: symbol.clone(),
            source: Box::new(e),
        })?;

    let document = build_chain_document(&quote, &chains);
    write_chain_document(&config.output_dir, &symbol, &document, now)
}
