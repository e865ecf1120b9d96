//! wait-api - Block until a Feddit API answers its version endpoint
//!
//! Exits 0 once `GET {base_url}/api/v1/version` succeeds, 1 after the
//! configured number of failed attempts or on invalid arguments. An
//! unsupported version is logged but still counts as up.

use clap::Parser;
use tracing::error;

use feddit_analyzer::services::readiness::{seconds, wait_for_api, WaitOptions};

#[derive(Parser, Debug)]
#[command(name = "wait-api")]
#[command(about = "Wait for the Feddit API to be up and running")]
struct Args {
    /// Base URL of the API
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10.0)]
    timeout: f64,

    /// Wait between attempts in seconds
    #[arg(long, default_value_t = 10.0)]
    wait: f64,

    /// Number of attempts
    #[arg(long, default_value_t = 3)]
    retries: u32,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let options = match (seconds("timeout", args.timeout), seconds("wait", args.wait)) {
        (Ok(timeout), Ok(wait)) => WaitOptions {
            timeout,
            wait,
            retries: args.retries,
        },
        (Err(e), _) | (_, Err(e)) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let up = wait_for_api(&args.base_url, &options).await;
    std::process::exit(if up { 0 } else { 1 });
}
