use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseManager, DocumentStore, InMemoryStore, MongoStore};
use crate::handlers::{comments, movies, service, theaters};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    /// Upper bound on documents returned by list endpoints
    pub list_limit: i64,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, list_limit: i64) -> Self {
        Self { store, list_limit }
    }

    /// State backed by whichever store the configuration selects
    pub fn from_config(config: &AppConfig) -> Self {
        let store: Arc<dyn DocumentStore> = match config.database.backend {
            StoreBackend::Mongo => Arc::new(MongoStore::new()),
            StoreBackend::Memory => {
                warn!("Using in-memory store; data is lost on restart");
                Arc::new(InMemoryStore::new())
            }
        };
        Self::new(store, config.api.list_limit)
    }
}

/// Full router with the configured cross-cutting layers
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = routes(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// Resource routes without middleware
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(service::root))
        .route("/health", get(service::health))
        .merge(movie_routes())
        .merge(theater_routes())
        .merge(comment_routes())
        .with_state(state)
}

fn movie_routes() -> Router<AppState> {
    Router::new()
        // Collection: list only
        .route(
            "/movies",
            get(movies::list)
                .post(movies::collection_not_supported)
                .put(movies::collection_not_supported)
                .delete(movies::collection_not_supported),
        )
        .route(
            "/movies/:id",
            get(movies::get)
                .post(movies::post)
                .put(movies::put)
                .delete(movies::delete),
        )
}

fn theater_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/theaters",
            get(theaters::list)
                .post(theaters::collection_not_supported)
                .put(theaters::collection_not_supported)
                .delete(theaters::collection_not_supported),
        )
        .route(
            "/theaters/:id",
            get(theaters::get)
                .post(theaters::post)
                .put(theaters::put)
                .delete(theaters::delete),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movies/:id/comments",
            get(comments::list)
                .post(comments::collection_not_supported)
                .put(comments::collection_not_supported)
                .delete(comments::collection_not_supported),
        )
        .route(
            "/movies/:id/comments/:comment_id",
            get(comments::get)
                .post(comments::post)
                .put(comments::put)
                .delete(comments::delete),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Serve until Ctrl-C / SIGTERM, then release the shared database client
pub async fn serve(listener: tokio::net::TcpListener, router: Router) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    DatabaseManager::close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
