//! Student Registry API
//!
//! REST service over a PostgreSQL-backed student roster:
//! - create, list, fetch, update and delete students
//! - list queries support `page`, `limit`, `sort` and `populate=courses`
//! - courses can be created and students enrolled in them

mod config;
mod db;
mod error;
mod models;
mod query;
mod routes;
mod state;

use crate::config::Settings;
use crate::db::PgStudentRepository;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Student Registry API...");

    let settings = Settings::load()?;
    info!("Configuration loaded successfully");

    let pool = db::create_pool(&settings.database).await?;
    db::bootstrap_schema(&pool).await?;

    let repository = Arc::new(PgStudentRepository::new(pool));
    let state = Arc::new(AppState::new(repository, settings.pagination));

    let app = create_router(state, &settings);

    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("Server listening on http://{}", addr);
    info!("   POST   /students                          - Create student");
    info!("   GET    /students?page&limit&sort&populate - List students");
    info!("   GET    /students/{{id}}?populate            - Get student");
    info!("   PUT    /students/{{id}}                     - Update student");
    info!("   DELETE /students/{{id}}                     - Delete student");
    info!("   POST   /students/{{id}}/courses/{{courseId}}  - Enroll student");
    info!("   POST   /courses                           - Create course");
    info!("   GET    /courses                           - List courses");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,student_registry=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}
