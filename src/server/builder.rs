//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::InvoiceAppState;
use super::router::{build_invoice_routes, health_routes};
use crate::actions::InvoiceActions;
use crate::config::AppConfig;
use crate::core::cache::{BroadcastViewCache, ViewCache};
use crate::core::clock::Clock;
use crate::core::service::InvoiceStore;
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for the invoice HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryInvoiceStore::new())
///     .with_config(AppConfig::default())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    cache: Option<Arc<dyn ViewCache>>,
    clock: Option<Arc<dyn Clock>>,
    config: AppConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            cache: None,
            clock: None,
            config: AppConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the view cache notified after every write
    ///
    /// Defaults to a fresh [`BroadcastViewCache`].
    pub fn with_view_cache(mut self, cache: impl ViewCache + 'static) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Override the clock used to date new invoices
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for the pages that render the forms and the listing.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Assemble the actions from the registered collaborators
    pub fn build_actions(&mut self) -> Result<InvoiceActions> {
        self.config.validate()?;

        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow!("InvoiceStore is required. Call .with_store()"))?;
        let cache = self
            .cache
            .take()
            .unwrap_or_else(|| Arc::new(BroadcastViewCache::default()));

        let mut actions = InvoiceActions::new(store, cache)
            .with_listing_path(self.config.routes.listing_path.clone());
        if let Some(clock) = self.clock.take() {
            actions = actions.with_clock(clock);
        }

        Ok(actions)
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health routes
    /// - Invoice form routes
    /// - Custom routes
    pub fn build(mut self) -> Result<Router> {
        let actions = self.build_actions()?;

        let mut app = health_routes().merge(build_invoice_routes(InvoiceAppState { actions }));
        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind_addr` from the configuration and handles
    /// SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_addr.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

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
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
