use crate::{Result, TestInfraError};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_PORT: u16 = 3306;

#[derive(Debug, TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "8.4".to_string())]
    tag: String,
    #[builder(default = "hopper".to_string())]
    database: String,
    #[builder(default = "hopper".to_string())]
    username: String,
    #[builder(default = "hopper".to_string())]
    password: String,
    /// How many times [`MySqlServer::pool`] tries to connect before giving up.
    #[builder(default = 20)]
    connect_attempts: u32,
    #[builder(default = Duration::from_millis(500))]
    connect_backoff: Duration,
}

/// Test fixture for a disposable MySQL server.
///
/// The container is stopped when the fixture is dropped.
pub struct MySqlServer {
    container: ContainerAsync<GenericImage>,
    config: MysqlConfig,
}

impl MySqlServer {
    /// Starts a MySQL container suitable for integration tests.
    pub async fn new(config: MysqlConfig) -> Result<Self> {
        let container = GenericImage::new("mysql", config.tag.as_str())
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root")
            .start()
            .await?;

        Ok(Self { container, config })
    }

    pub async fn database_url(&self) -> Result<String> {
        let host = self.container.get_host().await?;
        let port = self.container.get_host_port_ipv4(MYSQL_PORT).await?;
        Ok(format!(
            "mysql://{}:{}@{}:{}/{}",
            self.config.username, self.config.password, host, port, self.config.database
        ))
    }

    /// Opens a small pool, retrying while the server finishes booting.
    ///
    /// MySQL logs "ready for connections" once for the init pass and again
    /// for the real server, so the first attempts can still be refused.
    pub async fn pool(&self) -> Result<MySqlPool> {
        let url = self.database_url().await?;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match MySqlPoolOptions::new()
                .max_connections(5)
                .connect(&url)
                .await
            {
                Ok(pool) => return Ok(pool),
                Err(source) if attempt >= self.config.connect_attempts => {
                    return Err(TestInfraError::MySqlNotReady {
                        attempts: attempt,
                        source,
                    });
                }
                Err(_) => tokio::time::sleep(self.config.connect_backoff).await,
            }
        }
    }
}
