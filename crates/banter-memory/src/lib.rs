// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation memory for Banter.
//!
//! Two tiers:
//! - short-term: the last classified intent per session, with a TTL, kept in
//!   Redis ([`RedisStore`]) or in process ([`InMemoryStore`]).
//! - long-term: an append-only log of every user and assistant message,
//!   kept in SQLite ([`SqliteLogStore`]).
//!
//! [`MemoryManager`] is the only type most callers need.

pub mod in_memory;
pub mod manager;
pub mod recall;
pub mod redis_store;
pub mod sqlite_log;

pub use in_memory::InMemoryStore;
pub use manager::{MemoryHealth, MemoryManager};
pub use recall::Recall;
pub use redis_store::RedisStore;
pub use sqlite_log::{IN_MEMORY_PATH, SqliteLogStore};
