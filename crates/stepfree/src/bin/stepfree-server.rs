//! Step Free planning server.
//!
//! ```bash
//! ANTHROPIC_API_KEY=sk-... cargo run -p stepfree --features server --bin stepfree-server
//!
//! curl -X POST http://127.0.0.1:3000/api/plan \
//!   -H "Content-Type: application/json" \
//!   -d '{"start": "King'"'"'s Cross Station", "destination": "London Bridge", "needs": "no escalators"}'
//!
//! curl http://127.0.0.1:3000/api/plan/example
//! curl http://127.0.0.1:3000/api/health
//! ```
//!
//! A missing `ANTHROPIC_API_KEY` does not stop the server; plan requests
//! answer with a `ConfigurationError` envelope until it is set.
use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use stepfree::{Planner, PlannerConfig, anthropic::AnthropicAdapterBuilder, server::router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stepfree-server", version, about = "Accessibility-first journey planning API")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "STEPFREE_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = PlannerConfig::from_env().context("invalid planner configuration")?;

    let backend = AnthropicAdapterBuilder::new_from_env()
        .build()
        .context("failed to build the Anthropic client")?;
    if !backend.is_configured() {
        warn!("ANTHROPIC_API_KEY is not set; plan requests will fail until it is");
    }

    info!(
        model = %config.model,
        max_tokens = config.max_tokens,
        deadline_secs = config.deadline.as_secs(),
        repair = config.repair,
        "planner configured"
    );
    let planner = Planner::new(backend, config).context("failed to build the planner")?;

    let app = router(planner)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(addr = %cli.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
