//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::Settings;
use crate::firestore::{FirestoreClient, TokenProvider};
use crate::push::{FcmProvider, PushProvider};
use crate::repositories::Repositories;
use crate::services::Services;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Constructs the store client, repositories, and push provider
    /// 3. Creates application state
    /// 4. Binds to configured address
    /// 5. Starts the HTTP server with graceful shutdown
    ///
    /// # Errors
    /// - Service-account key parsing errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            "Server configuration loaded"
        );

        tracing::info!(
            project_id = %self.settings.service_account.project_id,
            client_email = %self.settings.service_account.client_email,
            "Service account configured"
        );

        tracing::info!(
            allowed_origins = ?self.settings.cors.allowed_origins,
            webhook_configured = %(!self.settings.webhook.url.is_empty()),
            "Relay configuration loaded"
        );

        // Construct dependencies explicitly; the same token provider backs
        // both the store client and the push provider.
        let auth = Arc::new(TokenProvider::new(&self.settings.service_account)?);
        let store = Arc::new(FirestoreClient::new(
            self.settings.service_account.project_id.clone(),
            auth.clone(),
        ));
        let repos = Repositories::new(store);
        let push: Arc<dyn PushProvider> = Arc::new(FcmProvider::new(
            self.settings.service_account.project_id.clone(),
            auth,
        ));

        let services = Services::new(repos, push, self.settings.webhook.clone());
        let state = AppState::new(services);
        tracing::info!("Application state created");

        let router = create_router(state, &self.settings.cors);
        tracing::info!("Router configured");

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// This function returns when either signal is received, allowing
/// the server to perform graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
