//! Database connection management
//!
//! Handles connection pooling, schema bootstrap and the student repository.

#[cfg(test)]
pub mod memory;
pub mod queries;
pub mod repository;
pub mod service;

pub use repository::StudentRepository;
pub use service::PgStudentRepository;

use crate::config::DatabaseConfig;
use anyhow::Context;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;
use tracing::info;

/// Create the connection pool and verify it with a round trip
pub async fn create_pool(config: &DatabaseConfig) -> anyhow::Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(config.host.clone());
    cfg.port = Some(config.port);
    cfg.user = Some(config.user.clone());
    cfg.password = Some(config.password.clone());
    cfg.dbname = Some(config.database.clone());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    cfg.pool = Some(PoolConfig::new(config.max_pool_size));

    let pool = if config.require_tls {
        let certs = rustls_native_certs::load_native_certs();
        let mut root_store = rustls::RootCertStore::empty();
        for cert in certs.certs {
            root_store.add(cert).ok();
        }

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

        cfg.create_pool(Some(Runtime::Tokio1), tls)
            .context("Failed to create TLS pool")?
    } else {
        cfg.create_pool(Some(Runtime::Tokio1), NoTls)
            .context("Failed to create pool")?
    };

    let client = pool
        .get()
        .await
        .context("Failed to get pool connection")?;
    client
        .query_one("SELECT 1", &[])
        .await
        .context("Failed to verify database connection")?;

    info!(
        "Database connection successful ({}:{}/{}, TLS: {})",
        config.host, config.port, config.database, config.require_tls
    );
    Ok(pool)
}

/// Create tables and indexes if they don't exist
pub async fn bootstrap_schema(pool: &Pool) -> anyhow::Result<()> {
    let client = pool.get().await?;

    for statement in queries::SCHEMA {
        client
            .batch_execute(statement)
            .await
            .with_context(|| format!("Failed to run schema statement: {}", statement.trim()))?;
    }

    info!("Database tables initialized");
    Ok(())
}
