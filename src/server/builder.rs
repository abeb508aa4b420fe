//! ServerBuilder for serving the quotes API

use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::handlers::AppState;
use super::router::build_quote_routes;
use crate::config::QuotesConfig;
use crate::core::service::QuoteService;
use crate::storage::InMemoryQuoteService;

/// Builder for the quotes HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(QuotesConfig::default())
///     .serve("127.0.0.1:3000")
///     .await?;
/// ```
pub struct ServerBuilder {
    service: Option<Arc<dyn QuoteService>>,
    config: QuotesConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            service: None,
            config: QuotesConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Serve an existing access layer instead of an in-memory one
    pub fn with_service(mut self, service: Arc<dyn QuoteService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Configuration of the in-memory access layer built when no service is set
    pub fn with_config(mut self, config: QuotesConfig) -> Self {
        self.config = config;
        self
    }

    /// Merge additional routes into the app
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the router
    pub fn build(self) -> Result<Router> {
        let service: Arc<dyn QuoteService> = match self.service {
            Some(service) => service,
            None => Arc::new(
                InMemoryQuoteService::from_config(&self.config)
                    .map_err(|e| anyhow!("Failed to build quote service: {}", e))?,
            ),
        };

        let mut app = build_quote_routes(AppState::new(service));
        for routes in self.custom_routes {
            app = app.merge(routes);
        }

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        },
    }
}
