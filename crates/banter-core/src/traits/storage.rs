// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter traits for the two memory backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BanterError;
use crate::traits::adapter::PluginAdapter;
use crate::types::LongTermEntry;

/// Key-value store with native expiry, backing short-term memory.
#[async_trait]
pub trait ShortTermStore: PluginAdapter {
    /// Stores `value` under `key`, replacing any previous value, expiring after `ttl`.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration)
    -> Result<(), BanterError>;

    /// Returns the live value for `key`, `None` if missing or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, BanterError>;

    /// Deletes `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), BanterError>;
}

/// Document store holding the append-only conversation log.
///
/// The store does not promise any ordering; callers sort by timestamp.
#[async_trait]
pub trait LongTermStore: PluginAdapter {
    /// Adds one document with its session metadata.
    async fn add(&self, entry: &LongTermEntry) -> Result<(), BanterError>;

    /// Returns documents filtered by session (all sessions when `None`).
    ///
    /// With a `limit`, only the `limit` most recent documents are returned.
    async fn query(
        &self,
        session_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<LongTermEntry>, BanterError>;

    /// Returns the ids of the documents matching the session filter.
    async fn ids(&self, session_id: Option<&str>) -> Result<Vec<String>, BanterError>;

    /// Deletes documents by id, returning how many were removed.
    async fn delete(&self, ids: &[String]) -> Result<usize, BanterError>;
}
