//! feddit-analyzer - Feddit comment sentiment service
//!
//! Serves the sentiment analysis API. Requires the Feddit API base URL and
//! a Hugging Face API key (see `config` for the resolution order).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feddit_analyzer::config::{resolve_config, resolve_log_level, CliOverrides};
use feddit_analyzer::services::{
    CommentAnalyzer, FedditClient, SentimentClient, TitleCache, TitleResolver,
};
use feddit_analyzer::{build_router, AppState};

/// Command-line arguments for feddit-analyzer
#[derive(Parser, Debug)]
#[command(name = "feddit-analyzer")]
#[command(about = "Sentiment analysis of Feddit comments")]
#[command(version)]
struct Args {
    /// Host to serve the API on
    #[arg(long, env = "FEDDIT_ANALYZER_HOST")]
    host: Option<String>,

    /// Port to serve the API on
    #[arg(short, long, env = "FEDDIT_ANALYZER_PORT")]
    port: Option<u16>,

    /// Base URL of the Feddit API
    #[arg(long, env = "FEDDIT_API_BASE_URL")]
    feddit_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, env = "FEDDIT_ANALYZER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is loaded before tracing so the configured level applies;
    // problems loading it are reported once the subscriber exists.
    let toml_config = feddit_common::config::load_or_default(args.config.as_deref());
    let default_level = match &toml_config {
        Ok(toml) => resolve_log_level(args.log_level.as_deref(), toml),
        Err(_) => resolve_log_level(args.log_level.as_deref(), &Default::default()),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting feddit-analyzer v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let toml_config = toml_config.context("Failed to load configuration")?;
    let cli = CliOverrides {
        host: args.host,
        port: args.port,
        feddit_api_base_url: args.feddit_url,
    };
    let config = resolve_config(&cli, &toml_config).context("Invalid configuration")?;
    info!("Feddit API: {}", config.feddit_api_base_url);
    info!("Model API: {}", config.model_api_url);

    let feddit = Arc::new(
        FedditClient::new(config.feddit_api_base_url.clone(), config.feddit_timeout)
            .context("Failed to create Feddit API client")?,
    );
    let scorer = Arc::new(
        SentimentClient::with_url(
            config.model_api_url.clone(),
            config.huggingface_api_key.clone(),
            config.model_timeout,
        )
        .context("Failed to create sentiment model client")?,
    );

    match feddit.check_version().await {
        Ok(version) => info!("Feddit API version {} supported", version),
        Err(e) => warn!("Feddit API version check failed: {}", e),
    }

    let cache = TitleCache::new(config.cache_max_entries, config.cache_ttl);
    info!(
        "Title cache: {} entries, TTL {}s",
        config.cache_max_entries,
        config.cache_ttl.as_secs()
    );

    let analyzer = CommentAnalyzer::new(feddit.clone(), scorer)
        .with_page_size(config.comment_page_size)
        .with_model_timeout(Some(config.model_timeout));
    let title_resolver =
        TitleResolver::new(feddit, cache).with_page_size(config.subfeddit_page_size);

    let app = build_router(AppState::new(analyzer, title_resolver));

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Listening on http://{}", bind_address);
    info!("Health check: http://{}/health", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("feddit-analyzer stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
