// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redis-backed short-term store.
//!
//! The connection is opened on first use, not at construction, so a Redis
//! server that is down at startup only degrades short-term memory. A failed
//! connect is retried on the next operation, and a connection that drops
//! (server restart, idle timeout) is discarded so the next operation
//! reconnects.

use std::time::Duration;

use async_trait::async_trait;
use banter_config::model::ShortTermConfig;
use banter_core::{AdapterType, BanterError, HealthStatus, PluginAdapter, ShortTermStore};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, IntoConnectionInfo};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Short-term store speaking to a Redis server.
pub struct RedisStore {
    client: redis::Client,
    conn: Mutex<Option<MultiplexedConnection>>,
    address: String,
}

impl RedisStore {
    /// Builds the client from `[memory.short_term]`. Does not connect.
    pub fn new(config: &ShortTermConfig) -> Result<Self, BanterError> {
        let address = format!("{}:{}", config.host, config.port);
        let mut info = format!("redis://{address}/")
            .as_str()
            .into_connection_info()
            .map_err(BanterError::storage)?;
        info.redis.password = config.password.clone();

        let client = redis::Client::open(info).map_err(BanterError::storage)?;

        Ok(Self {
            client,
            conn: Mutex::new(None),
            address,
        })
    }

    /// Returns a handle to the shared connection, connecting if needed.
    async fn connection(&self) -> Result<MultiplexedConnection, BanterError> {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(BanterError::storage)?;
        info!(address = %self.address, "connected to redis");
        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Maps a command error, forgetting the cached connection when it is dead.
    async fn command_failed(&self, err: redis::RedisError) -> BanterError {
        let dead = err.is_io_error() || err.is_connection_dropped() || err.is_unrecoverable_error();
        if dead && self.conn.lock().await.take().is_some() {
            warn!(
                address = %self.address,
                error = %err,
                "redis connection lost; reconnecting on next use"
            );
        }
        BanterError::storage(err)
    }
}

#[async_trait]
impl PluginAdapter for RedisStore {
    fn name(&self) -> &str {
        "redis"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ShortTermStore
    }

    async fn health_check(&self) -> Result<HealthStatus, BanterError> {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => return Ok(HealthStatus::Unhealthy(e.to_string())),
        };
        let pong: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        Ok(match pong {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => {
                let err = self.command_failed(e).await;
                HealthStatus::Unhealthy(format!("PING failed: {err}"))
            }
        })
    }

    async fn shutdown(&self) -> Result<(), BanterError> {
        // Dropping the last handle closes the multiplexed connection.
        if self.conn.lock().await.take().is_some() {
            debug!(address = %self.address, "redis connection released");
        }
        Ok(())
    }
}

#[async_trait]
impl ShortTermStore for RedisStore {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), BanterError> {
        let mut conn = self.connection().await?;
        // Redis rejects EX 0.
        let seconds = ttl.as_secs().max(1);
        match conn.set_ex::<_, _, ()>(key, value, seconds).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.command_failed(e).await),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BanterError> {
        let mut conn = self.connection().await?;
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.command_failed(e).await),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), BanterError> {
        let mut conn = self.connection().await?;
        match conn.del::<_, usize>(key).await {
            Ok(_) => Ok(()),
            Err(e) => Err(self.command_failed(e).await),
        }
    }
}
