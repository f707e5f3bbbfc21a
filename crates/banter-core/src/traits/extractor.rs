// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named-entity extractor adapter trait.

use async_trait::async_trait;

use crate::error::BanterError;
use crate::traits::adapter::PluginAdapter;
use crate::types::EntityMap;

/// Adapter that extracts named entities from free text.
#[async_trait]
pub trait EntityExtractor: PluginAdapter {
    /// Returns entity tag -> span. When a tag occurs more than once the last span wins.
    async fn extract(&self, text: &str) -> Result<EntityMap, BanterError>;
}
