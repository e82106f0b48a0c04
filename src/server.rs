use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::response::Response;
use axum::{middleware, Router};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::middleware::logging_middleware;
use crate::registry::QueryParams;

#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
}

/// Assemble the router. Routing itself belongs to the dispatcher's registry,
/// so every path funnels through the fallback.
pub fn create_app(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .fallback(gateway)
        .with_state(AppState { dispatcher })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(logging_middleware)),
        )
}

async fn gateway(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
    request: Request,
) -> Response {
    let (parts, _body) = request.into_parts();
    state.dispatcher.dispatch(&parts, &params).await
}

pub struct Server {
    app: Router,
    config: Config,
}

impl Server {
    pub fn new(config: Config, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            app: create_app(dispatcher),
            config,
        }
    }

    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.hostname, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!("Lavacake gateway listening at http://{}/", addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}
