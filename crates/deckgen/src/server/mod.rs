mod cli;
mod routes;

pub use cli::ServeOptions;
pub use routes::router;

use crate::invoker::ModelInvoker;
use crate::prelude::{eprintln, *};
use std::sync::Arc;

/// Shared, read-only state for every request handler.
#[derive(Debug)]
pub struct AppState {
    pub invoker: ModelInvoker,
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);

    if global.model.require_api_key().is_err() {
        log::warn!("DECKGEN_API_KEY is not set; generation requests will fail until it is");
    }

    let state = Arc::new(AppState {
        invoker: ModelInvoker::new(global.model.clone()),
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    if global.verbose {
        eprintln!("deckgen listening on http://{}", addr);
        eprintln!("  POST http://{}/generate-ppt-content", addr);
        eprintln!("  POST http://{}/regenerate-slide", addr);
        eprintln!("  POST http://{}/generate-slide-image", addr);
    }
    log::info!("Listening on {addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}
