// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local short-term store.

use std::time::Duration;

use async_trait::async_trait;
use banter_core::{AdapterType, BanterError, HealthStatus, PluginAdapter, ShortTermStore};
use dashmap::DashMap;
use tokio::time::Instant;

/// Key-value store kept in a `DashMap`, with a deadline per entry.
///
/// Expired entries are dropped when read and swept on every write, so keys
/// that are never read again do not accumulate. Contents do not survive the
/// process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, (String, Instant)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PluginAdapter for InMemoryStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ShortTermStore
    }

    async fn health_check(&self) -> Result<HealthStatus, BanterError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), BanterError> {
        self.entries.clear();
        Ok(())
    }
}

#[async_trait]
impl ShortTermStore for InMemoryStore {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), BanterError> {
        let now = Instant::now();
        self.entries.retain(|_, (_, deadline)| *deadline > now);
        self.entries.insert(key.to_string(), (value.to_string(), now + ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BanterError> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if entry.1 > now => return Ok(Some(entry.0.clone())),
            Some(_) => true,
            None => false,
        };
        // The read guard is gone here; removing under it would deadlock.
        if expired {
            self.entries.remove_if(key, |_, (_, deadline)| *deadline <= now);
        }
        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<(), BanterError> {
        self.entries.remove(key);
        Ok(())
    }
}
