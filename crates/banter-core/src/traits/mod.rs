// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod classifier;
pub mod extractor;
pub mod provider;
pub mod storage;

pub use adapter::PluginAdapter;
pub use classifier::IntentClassifier;
pub use extractor::EntityExtractor;
pub use provider::CompletionProvider;
pub use storage::{LongTermStore, ShortTermStore};
