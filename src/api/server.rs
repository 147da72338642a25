//! HTTP server assembly and lifecycle

use crate::api::handlers::AppState;
use crate::api::routes::create_routes;
use crate::auth::AuthGateway;
use crate::auth::SessionStore;
use crate::core::config::Config;
use crate::core::error::{AdminError, Result};
use crate::db::manager::DatabaseManager;
use crate::db::repository::{AccountRepository, RecordRepository};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Interval between sweeps of expired sessions
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

pub struct ApiServer {
    config: Config,
    router: Router,
}

impl ApiServer {
    pub fn new(config: Config, db: Arc<DatabaseManager>) -> Self {
        let accounts = Arc::new(AccountRepository::new(db.clone()));
        let records = Arc::new(RecordRepository::new(db));
        let sessions = SessionStore::new(config.session.ttl_secs);
        let gateway = Arc::new(AuthGateway::new(accounts, sessions.clone()));

        spawn_session_sweeper(sessions);

        let state = AppState {
            records,
            gateway,
            session: config.session.clone(),
        };

        let router = create_routes(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        Self { config, router }
    }

    /// Bind and serve until a shutdown signal arrives
    pub async fn serve(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AdminError::InitializationError(format!("Failed to bind {}: {}", addr, e)))?;

        tracing::info!("Listening on http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AdminError::InitializationError(format!("Server error: {}", e)))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

fn spawn_session_sweeper(sessions: SessionStore) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sessions.sweep_expired().await;
            if removed > 0 {
                tracing::debug!(removed, "Swept expired sessions");
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
