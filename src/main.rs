use anyhow::{Context, Result};
use relay_mcp::registry::{load_sources_from_dir, ToolRegistry};
use relay_mcp::tools::RandomIds;
use relay_mcp::{http, RelayConfig, RelayServer};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env for local dev (if present)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = match std::env::var("RELAY_CONFIG") {
        Ok(path) => RelayConfig::from_file(&path)?,
        Err(_) => RelayConfig::from_env()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("relay_mcp={}", config.server.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenv_loaded {
        tracing::info!("Loaded .env");
    }
    tracing::info!("Starting Relay MCP gateway");
    tracing::info!(
        "Configuration loaded: port={}, auth={}",
        config.server.port,
        if config.auth.shared_secret.is_some() {
            "shared-secret"
        } else {
            "disabled"
        }
    );

    let sources = load_sources_from_dir(&config.registry.connectors_dir)
        .context("failed to load connector tool documents")?;
    let registry = ToolRegistry::load(sources).with_builtin_handlers(Arc::new(RandomIds));

    let server = RelayServer::new(config, registry);
    tracing::info!("Available tools: {}", server.get_tools().len());
    for tool in server.get_tools() {
        tracing::info!("  - {}: {}", tool.name, tool.description);
    }

    http::run_http_server(server).await?;
    tracing::info!("Relay MCP gateway shutting down");
    Ok(())
}
