use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Bind the configured `host:port`; hostnames such as `localhost` are resolved.
async fn bind_listener(cfg: &AppConfig) -> Result<(TcpListener, SocketAddr), StartupError> {
    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    let local = listener
        .local_addr()
        .map_err(|source| StartupError::Bind { addr, source })?;
    Ok((listener, local))
}

/// Build the application router over the given state
pub fn app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Serve `app` on an already-bound listener until `shutdown` resolves,
/// draining in-flight requests before returning.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, draining in-flight requests");
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = ServerState::in_memory(cfg.catalog.validate);
    let app = app(state);

    let (listener, addr) = bind_listener(&cfg).await?;
    info!(%addr, validate = cfg.catalog.validate, "product catalog listening");
    serve(listener, app, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
