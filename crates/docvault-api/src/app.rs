//! Application builder: wires stores, services, the audit worker and the
//! HTTP server together.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_database::repositories::{DocumentRepository, JobRepository, UserRepository};
use docvault_service::{AuditSink, LogAuditSink};
use docvault_storage::LocalStorageProvider;
use docvault_worker::{DOCUMENTS_QUEUE, JobQueue, WorkerRunner, audit_executor};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the docvault server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting docvault server...");

    // ── Step 1: Storage ──────────────────────────────────────────
    let storage = Arc::new(LocalStorageProvider::new(&config.storage.root_path).await?);
    let upload_dir = storage.root().join(&config.storage.upload_dir);
    tokio::fs::create_dir_all(&upload_dir).await.map_err(|e| {
        AppError::internal(format!(
            "Failed to create upload dir '{}': {}",
            upload_dir.display(),
            e
        ))
    })?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));
    let job_repo = Arc::new(JobRepository::new(db_pool.clone()));

    // ── Step 3: Audit sink & worker ──────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let (audit, worker_handle) = if config.worker.enabled {
        let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
        let job_queue = Arc::new(JobQueue::new(
            Arc::clone(&job_repo),
            worker_id,
            DOCUMENTS_QUEUE,
            config.worker.max_attempts,
        ));

        let worker_runner = WorkerRunner::new(
            Arc::clone(&job_queue),
            Arc::new(audit_executor()),
            config.worker.clone(),
        );
        let worker_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            worker_runner.run(worker_cancel).await;
        });

        (job_queue as Arc<dyn AuditSink>, Some(handle))
    } else {
        tracing::info!("Audit worker disabled; audit events go to the log only");
        (Arc::new(LogAuditSink) as Arc<dyn AuditSink>, None)
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, user_repo, document_repo, audit, storage);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("docvault server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(handle) = worker_handle {
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Worker did not stop within the shutdown grace period");
        }
    }

    tracing::info!("docvault server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
