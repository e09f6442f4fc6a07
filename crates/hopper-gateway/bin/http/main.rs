mod cli;

use crate::cli::{Cli, StorageBackendArg};
use anyhow::Context;
use clap::Parser;
use hopper_core::Repository;
use hopper_gateway::{App, AppState};
use hopper_generator::{RandomGenerator, RandomGeneratorSettings};
use hopper_shortener::{MappingStore, StoreSettings};
use hopper_storage::{InMemoryRepository, MySqlRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    let _telemetry = hopper_telemetry::init(config.telemetry_config())?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting hopper"
    );

    let generator = RandomGenerator::new(
        RandomGeneratorSettings::builder()
            .length(config.code_length)
            .build(),
    )?;
    let settings = StoreSettings::builder()
        .max_attempts(config.max_attempts)
        .build();

    match config.storage {
        StorageBackendArg::InMemory => {
            let store = MappingStore::with_settings(InMemoryRepository::new(), generator, settings);
            run_server(config.listen_addr, store, config.public_base_url).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = match connect_mysql(&mysql_dsn).await {
                Ok(repository) => repository,
                Err(e) => {
                    error!(error = %e, "durable store unreachable, aborting");
                    return Err(e);
                }
            };
            let store = MappingStore::with_settings(repository, generator, settings);
            run_server(config.listen_addr, store, config.public_base_url).await?;
        }
    }

    Ok(())
}

async fn connect_mysql(dsn: &str) -> anyhow::Result<MySqlRepository> {
    let repository = MySqlRepository::connect(dsn)
        .await
        .context("failed to connect to mysql")?;
    repository
        .ensure_schema()
        .await
        .context("failed to create url_mappings table")?;
    Ok(repository)
}

async fn run_server<R: Repository>(
    listen_addr: SocketAddr,
    store: MappingStore<R, RandomGenerator>,
    public_base_url: String,
) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(store), public_base_url);
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
