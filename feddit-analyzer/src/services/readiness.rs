//! Feddit API readiness polling
//!
//! Used by the `wait-api` binary to block until a Feddit API answers its
//! version endpoint.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::services::feddit_client::SUPPORTED_VERSIONS;
use crate::services::FedditClient;

/// Polling parameters
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Pause between failed attempts
    pub wait: Duration,
    /// Number of attempts
    pub retries: u32,
}

/// Convert a seconds value from the command line into a `Duration`
///
/// Fails for negative, NaN, infinite and out-of-range values.
pub fn seconds(name: &str, value: f64) -> Result<Duration, String> {
    Duration::try_from_secs_f64(value)
        .map_err(|e| format!("Invalid --{} value {}: {}", name, value, e))
}

/// Poll `{base_url}/api/v1/version` until it answers
///
/// Returns true on the first successful answer, even when the reported
/// version is unsupported, and false once every attempt has failed.
pub async fn wait_for_api(base_url: &str, options: &WaitOptions) -> bool {
    let client = match FedditClient::new(base_url, options.timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return false;
        }
    };

    info!("Checking if the API is up and running on {}", base_url);
    for attempt in 1..=options.retries {
        info!("Attempt {} of {}", attempt, options.retries);

        match client.get_version().await {
            Ok(version) => {
                if SUPPORTED_VERSIONS.contains(&version.as_str()) {
                    info!("API has a supported version: {}", version);
                } else {
                    warn!("API version {} is not supported", version);
                }
                info!("API is up and running at {}", base_url);
                return true;
            }
            Err(e) => {
                info!("API is not up and running: {}", e);
                if attempt < options.retries {
                    tokio::time::sleep(options.wait).await;
                }
            }
        }
    }

    error!("API is not up and running after {} attempts", options.retries);
    false
}
