use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use serpkit::api::{AppState, create_router};
use serpkit::config::Config;
use serpkit::search::SearchClient;

/// SERP research service: search proxy, outline drafts and text quality scores.
#[derive(Parser)]
#[command(name = "serpkit", version, about)]
struct Cli {
    /// Address to bind (overrides BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let search = SearchClient::new(&config).context("failed to build search client")?;

    let bind = cli.bind.unwrap_or_else(|| config.bind_addr.clone());
    let port = cli.port.unwrap_or(config.port);
    let addr = format!("{bind}:{port}");

    let timeout_secs = search.timeout().as_secs();
    let app = create_router(Arc::new(AppState::new(search)));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr} (search timeout {timeout_secs}s)");
    axum::serve(listener, app).await?;
    Ok(())
}
