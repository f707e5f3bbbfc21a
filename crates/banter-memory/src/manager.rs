// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The memory façade used by the orchestrator and the shells.
//!
//! [`MemoryManager`] hides the two stores behind session-level operations.
//! None of its operations return an error: every store failure or timeout is
//! logged and reported as [`Recall::Degraded`] with a fallback value.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use banter_config::model::{MemoryConfig, ShortTermBackend};
use banter_core::{
    BanterError, HealthStatus, Intent, LongTermEntry, LongTermStore, PluginAdapter, Role,
    SessionId, ShortTermStore,
};
use tracing::{debug, info, warn};

use crate::in_memory::InMemoryStore;
use crate::recall::Recall;
use crate::redis_store::RedisStore;
use crate::sqlite_log::SqliteLogStore;

/// Health of both stores.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryHealth {
    pub short_term: HealthStatus,
    pub long_term: HealthStatus,
}

impl MemoryHealth {
    pub fn is_healthy(&self) -> bool {
        self.short_term == HealthStatus::Healthy && self.long_term == HealthStatus::Healthy
    }
}

/// Session memory over a key-value store and a document store.
pub struct MemoryManager {
    short_term: Arc<dyn ShortTermStore>,
    long_term: Arc<dyn LongTermStore>,
    config: MemoryConfig,
}

impl MemoryManager {
    pub fn new(
        short_term: Arc<dyn ShortTermStore>,
        long_term: Arc<dyn LongTermStore>,
        config: MemoryConfig,
    ) -> Self {
        Self {
            short_term,
            long_term,
            config,
        }
    }

    /// Builds both stores from `[memory]` config.
    ///
    /// Redis is not contacted here; the log database is opened (and created).
    pub async fn from_config(config: &MemoryConfig) -> Result<Self, BanterError> {
        let short_term: Arc<dyn ShortTermStore> = match config.short_term.backend {
            ShortTermBackend::Redis => Arc::new(RedisStore::new(&config.short_term)?),
            ShortTermBackend::Memory => Arc::new(InMemoryStore::new()),
        };
        let long_term = Arc::new(
            SqliteLogStore::open(&config.long_term.path, &config.long_term.collection).await?,
        );

        info!(
            short_term = short_term.name(),
            long_term = long_term.name(),
            ttl_secs = config.short_term.ttl_secs,
            max_results = config.long_term.max_results,
            "memory initialized"
        );

        Ok(Self::new(short_term, long_term, config.clone()))
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Records `intent` as the session's current intent, expiring after `ttl_secs`.
    pub async fn set_short_term(&self, session: &SessionId, intent: Intent) -> Recall<()> {
        let ttl = Duration::from_secs(self.config.short_term.ttl_secs);
        let result = self
            .short_term_op("set_short_term", |store| async move {
                store
                    .set_with_expiry(session.as_str(), intent.as_label(), ttl)
                    .await
            })
            .await;

        match result {
            Ok(()) => {
                debug!(session = %session, intent = %intent, "short-term memory set");
                Recall::Fresh(())
            }
            Err(reason) => Recall::degraded((), reason),
        }
    }

    /// The session's last intent; `None` when never set or expired.
    pub async fn get_short_term(&self, session: &SessionId) -> Recall<Option<Intent>> {
        let result = self
            .short_term_op("get_short_term", |store| async move {
                store.get(session.as_str()).await
            })
            .await;

        match result {
            Ok(value) => Recall::Fresh(value.map(|label| Intent::from_label(&label))),
            Err(reason) => Recall::degraded(None, reason),
        }
    }

    /// Forgets the session's intent. Clearing an absent entry is not an error.
    pub async fn clear_short_term(&self, session: &SessionId) -> Recall<()> {
        let result = self
            .short_term_op("clear_short_term", |store| async move {
                store.delete(session.as_str()).await
            })
            .await;

        match result {
            Ok(()) => {
                info!(session = %session, "short-term memory cleared");
                Recall::Fresh(())
            }
            Err(reason) => Recall::degraded((), reason),
        }
    }

    /// Appends a message to the session's log and returns the new entry's id.
    pub async fn store_long_term(
        &self,
        session: &SessionId,
        role: Role,
        message: &str,
    ) -> Recall<Option<String>> {
        let entry = LongTermEntry {
            id: format!("{}-{}", session, uuid::Uuid::new_v4()),
            session_id: session.as_str().to_string(),
            role,
            message: message.to_string(),
            timestamp: chrono::Utc::now()
                .format("%Y-%m-%dT%H:%M:%S%.6fZ")
                .to_string(),
        };

        let entry_ref = &entry;
        let result = self
            .long_term_op("store_long_term", |store| async move {
                store.add(entry_ref).await
            })
            .await;

        match result {
            Ok(()) => {
                debug!(session = %session, role = %role, id = %entry.id, "long-term memory stored");
                Recall::Fresh(Some(entry.id))
            }
            Err(reason) => Recall::degraded(None, reason),
        }
    }

    /// Log entries in ascending timestamp order.
    ///
    /// With a session: its `max_results` most recent entries. Without: every
    /// entry in the collection.
    pub async fn retrieve_long_term(
        &self,
        session: Option<&SessionId>,
    ) -> Recall<Vec<LongTermEntry>> {
        let session_key = session.map(SessionId::as_str);
        let limit = session.map(|_| self.config.long_term.max_results);

        let result = self
            .long_term_op("retrieve_long_term", |store| async move {
                store.query(session_key, limit).await
            })
            .await;

        let entries = match result {
            Ok(entries) => entries,
            Err(reason) => return Recall::degraded(Vec::new(), reason),
        };

        let mut entries: Vec<LongTermEntry> = entries
            .into_iter()
            .filter(|entry| {
                let ok = entry.is_well_formed();
                if !ok {
                    warn!(id = %entry.id, "dropping malformed long-term entry");
                }
                ok
            })
            .collect();
        // Stable sort: entries with equal timestamps keep store order.
        entries.sort_by_key(|entry| entry.parsed_timestamp());

        Recall::Fresh(entries)
    }

    /// Deletes the session's entries, or every entry when `session` is `None`.
    pub async fn clear_long_term(&self, session: Option<&SessionId>) -> Recall<()> {
        let session_key = session.map(SessionId::as_str);
        let result = self
            .long_term_op("clear_long_term", |store| async move {
                let ids = store.ids(session_key).await?;
                store.delete(&ids).await
            })
            .await;

        match result {
            Ok(removed) => {
                match session {
                    Some(s) => info!(session = %s, removed, "long-term memory cleared"),
                    None => info!(removed, "long-term memory cleared for all sessions"),
                }
                Recall::Fresh(())
            }
            Err(reason) => Recall::degraded((), reason),
        }
    }

    /// Probes both stores.
    pub async fn health(&self) -> MemoryHealth {
        MemoryHealth {
            short_term: probe(self.short_term.health_check(), self.short_term_timeout()).await,
            long_term: probe(self.long_term.health_check(), self.long_term_timeout()).await,
        }
    }

    /// Releases both stores. Both are attempted even if the first fails.
    pub async fn shutdown(&self) -> Result<(), BanterError> {
        let short = self.short_term.shutdown().await;
        let long = self.long_term.shutdown().await;
        info!("memory shut down");
        short.and(long)
    }

    fn short_term_timeout(&self) -> Duration {
        Duration::from_secs(self.config.short_term.timeout_secs)
    }

    fn long_term_timeout(&self) -> Duration {
        Duration::from_secs(self.config.long_term.timeout_secs)
    }

    async fn short_term_op<'a, T, F, Fut>(&'a self, op: &'static str, f: F) -> Result<T, String>
    where
        F: FnOnce(&'a dyn ShortTermStore) -> Fut,
        Fut: Future<Output = Result<T, BanterError>> + 'a,
    {
        let limit = self.short_term_timeout();
        self.guarded(op, limit, f(self.short_term.as_ref())).await
    }

    async fn long_term_op<'a, T, F, Fut>(&'a self, op: &'static str, f: F) -> Result<T, String>
    where
        F: FnOnce(&'a dyn LongTermStore) -> Fut,
        Fut: Future<Output = Result<T, BanterError>> + 'a,
    {
        let limit = self.long_term_timeout();
        self.guarded(op, limit, f(self.long_term.as_ref())).await
    }

    /// Bounds `fut` by `limit`; failures are logged and counted, then returned as text.
    async fn guarded<T>(
        &self,
        op: &'static str,
        limit: Duration,
        fut: impl Future<Output = Result<T, BanterError>>,
    ) -> Result<T, String> {
        let started = Instant::now();
        let outcome = match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(BanterError::Timeout { duration: limit }),
        };

        if self.config.telemetry {
            banter_prometheus::record_memory_latency(op, started.elapsed().as_secs_f64());
        }

        outcome.map_err(|e| {
            warn!(op, error = %e, "memory operation degraded");
            if self.config.telemetry {
                banter_prometheus::record_memory_degraded(op);
            }
            e.to_string()
        })
    }
}

async fn probe(
    check: impl Future<Output = Result<HealthStatus, BanterError>>,
    limit: Duration,
) -> HealthStatus {
    match tokio::time::timeout(limit, check).await {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => HealthStatus::Unhealthy(e.to_string()),
        Err(_) => HealthStatus::Unhealthy(format!("health check timed out after {limit:?}")),
    }
}
