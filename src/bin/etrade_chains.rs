//! Grab the option expiration dates and option chains for a symbol and save
//! them, together with the current quote, as a JSON file.
//!
//! # Usage
//!
//! ```sh
//! export ETRADE_SANDBOX_CONSUMER_KEY="your-consumer-key"
//! export ETRADE_SANDBOX_CONSUMER_SECRET="your-consumer-secret"
//! cargo run --bin etrade-chains -- --sandbox IBM
//! ```
//!
//! The first run (and any run after the cached token has expired) prints an
//! authorization URL and asks for the code shown on that page.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;

use etrade_chains::authenticator::StdinVerifier;
use etrade_chains::config::Config;
use etrade_chains::constants::DEFAULT_TOKEN_FILE;
use etrade_chains::token_store::FileTokenStore;
use etrade_chains::types::enums::Environment;
use etrade_chains::writer::WrittenDocument;
use etrade_chains::{exit_status, run};

#[derive(Parser)]
#[command(name = "etrade-chains")]
#[command(about = "Grab all the option chains for the specified symbol", long_about = None)]
struct Cli {
    /// Use the sandbox environment instead of live
    #[arg(long)]
    sandbox: bool,

    /// File caching OAuth tokens between runs
    #[arg(long, default_value = DEFAULT_TOKEN_FILE)]
    token_file: PathBuf,

    /// Directory the chain document is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Symbol name
    symbol: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // keys may live in a local .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let result = execute(cli).await;
    match &result {
        Ok(written) => println!(
            "Wrote results to '{}' (size {})",
            written.path.display(),
            written.size
        ),
        Err(e) => eprintln!("{e}"),
    }
    ExitCode::from(exit_status(&result))
}

async fn execute(cli: Cli) -> etrade_chains::Result<WrittenDocument> {
    let config = Config::from_env(Environment::from_sandbox_flag(cli.sandbox))?
        .with_token_file(cli.token_file)
        .with_output_dir(cli.output_dir);

    let mut store = FileTokenStore::new(&config.token_file);
    run(
        &config,
        &cli.symbol,
        &mut store,
        &StdinVerifier,
        Local::now().naive_local(),
    )
    .await
}
