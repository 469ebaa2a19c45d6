use anyhow::{Context, Result};
use relay_mcp::chat::{self, ChatBridge};
use relay_mcp::RelayConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = match std::env::var("RELAY_CONFIG") {
        Ok(path) => RelayConfig::from_file(&path)?,
        Err(_) => RelayConfig::from_env()?,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("relay_mcp={0},relay_chat={0}", config.server.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenv_loaded {
        tracing::info!("Loaded .env");
    }
    if config.chat.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; completion calls will be rejected upstream");
    }
    match &config.chat.mcp_server_url {
        Some(url) => tracing::info!("Advertising MCP gateway at {}", url),
        None => tracing::warn!("MCP_SERVER_URL is not set; no tool source will be advertised"),
    }

    let bridge = Arc::new(ChatBridge::new(&config).context("failed to build completion API client")?);
    let app = chat::router(bridge).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.chat.port));
    tracing::info!("Chat bridge listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
