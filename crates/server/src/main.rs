use anyhow::Context;
use clap::Parser;
use db::DBService;
use server::{AppState, app};
use services::services::config::Config;
use tracing::info;
use utils::logging::{DEFAULT_FILTER, init_tracing};

#[derive(Debug, Parser)]
#[command(name = "flora-server", about = "Flora Lenz plant care API", version)]
struct Args {
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(DEFAULT_FILTER);

    let args = Args::parse();
    let config = Config::from_env().context("reading configuration")?;
    let state = AppState::new(&config, DBService::new()).context("building assistant")?;

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        %addr,
        assistant_live = state.assistant().is_live(),
        model = %config.gemini_model,
        "Flora server listening"
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
