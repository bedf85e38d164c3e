use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StoreBackend};
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth};
use service::audit::{AuditEmitter, HttpAuditEmitter};
use service::auth::repo::{InMemoryCredentialStore, SeaOrmCredentialStore};
use service::auth::repository::CredentialStore;
use service::auth::AuthService;

/// Wire the credential store and audit emitter selected by `cfg`.
pub async fn build_state(cfg: &AppConfig) -> Result<auth::ServerState, StartupError> {
    let store: Arc<dyn CredentialStore> = match cfg.store.backend {
        StoreBackend::Memory => {
            warn!("using in-memory credential store; registrations are lost on restart");
            Arc::new(InMemoryCredentialStore::new())
        }
        StoreBackend::Postgres => {
            let db = models::db::connect_and_migrate(&cfg.database).await?;
            Arc::new(SeaOrmCredentialStore { db })
        }
    };
    let audit: Arc<dyn AuditEmitter> = Arc::new(
        HttpAuditEmitter::new(&cfg.audit).map_err(|e| StartupError::InvalidConfig(e.to_string()))?,
    );
    info!(endpoint = %cfg.audit.endpoint, timeout_ms = cfg.audit.timeout_ms, strict_status = cfg.audit.require_success_status, "audit emitter configured");
    Ok(auth::ServerState { auth: AuthService::new(store, audit) })
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, draining connections");
}

/// Build the app from an already validated config and serve until Ctrl+C.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(routes::build_cors(), state);

    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = ?cfg.store.backend, "starting authentication service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
