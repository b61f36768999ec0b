use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use fetch_core::config::{DEFAULT_BASE_URL, FetcherConfig};
use fetch_core::{Context, Fetcher, RecordSource, ReqwestTransport};
use tracing_subscriber::EnvFilter;

/// Fetch the records for one id and print them.
#[derive(Debug, Parser)]
#[command(name = "fetch-demo", version)]
struct Args {
    /// Identifier substituted into the `id` query parameter.
    #[arg(default_value = "1")]
    id: String,

    /// Base URL of the resource.
    #[arg(long, env = "FETCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-call timeout in milliseconds.
    #[arg(long, env = "FETCH_TIMEOUT_MS", default_value_t = 1000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = FetcherConfig {
        base_url: args.base_url,
        timeout: Duration::from_millis(args.timeout_ms),
    };

    let client = reqwest::Client::new();
    let fetcher = Fetcher::from_config(&config, Arc::new(ReqwestTransport::new(client)));
    let source: &dyn RecordSource = &fetcher;

    match source.fetch(&Context::background(), &args.id).await {
        Ok(records) => match serde_json::to_string_pretty(&records) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("cannot render records: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            println!("[] {err}");
            ExitCode::FAILURE
        }
    }
}
