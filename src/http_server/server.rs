//! # HTTP Server
//!
//! Combines the book routes with request tracing, panic recovery and CORS,
//! then serves them until shutdown is signalled.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::book_routes::{book_routes, BooksState, BOOK_ROUTES};
use super::config::HttpServerConfig;

/// HTTP server for the bookstore API
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<BooksState>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration and a seeded store
    pub fn with_config(config: HttpServerConfig) -> Self {
        Self::with_state(config, Arc::new(BooksState::new()))
    }

    /// Create a server around an existing state
    pub fn with_state(config: HttpServerConfig, state: Arc<BooksState>) -> Self {
        let router = Self::build_router(&config, state.clone());
        Self {
            config,
            state,
            router,
        }
    }

    /// Build the combined router with all endpoints and middleware
    fn build_router(config: &HttpServerConfig, state: Arc<BooksState>) -> Router {
        book_routes(state)
            .layer(Self::cors_layer(config))
            .layer(CatchPanicLayer::new())
            .layer(TraceLayer::new_for_http())
    }

    fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
        if config.cors_origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared state, for inspecting the store
    pub fn state(&self) -> Arc<BooksState> {
        self.state.clone()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener, std::io::Error> {
        TcpListener::bind(self.socket_addr()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!(%addr, "bookstore listening");
        for (method, path) in BOOK_ROUTES {
            info!(method = *method, path = *path, "route registered");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("bookstore stopped");
        Ok(())
    }

    /// Start the HTTP server, stopping on Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
    }
}
