// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classifier adapter trait.

use async_trait::async_trait;

use crate::error::BanterError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Classification, Intent};

/// Adapter that picks the best-matching label for a message.
///
/// Implementations receive the full candidate label set and return the
/// single highest-scoring label with its score.
#[async_trait]
pub trait IntentClassifier: PluginAdapter {
    /// Classifies `text` against `labels`.
    async fn classify(&self, text: &str, labels: &[Intent])
    -> Result<Classification, BanterError>;
}
