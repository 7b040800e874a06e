//! HTTP server for question generation.
//!
//! Exposes `POST /api/generate-questions` and a health check, and can serve
//! a static front end from a directory.

mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::source::QuestionSource;

pub use routes::{AppState, router};

const GENERATION_DISABLED_MESSAGE: &str = "No API key configured, serving curated and generic \
     questions only. Set OPENAI_API_KEY or pass --api-key to enable generation";

/// Run the server until Ctrl-C.
pub async fn run(
    port: u16,
    source: QuestionSource,
    question_count: usize,
    static_dir: Option<PathBuf>,
) -> std::io::Result<()> {
    if source.has_remote() {
        info!(strategies = ?source.strategy_names(), "Remote question generation enabled");
    } else {
        warn!("{}", GENERATION_DISABLED_MESSAGE);
    }
    if let Some(dir) = &static_dir {
        info!(dir = %dir.display(), "Serving static files");
    }

    let app = router(AppState::new(source, question_count), static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("duel-trivia server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
