// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Banter integration tests.
//!
//! Provides mock adapters and a test harness for fast, deterministic tests
//! without a model endpoint, a completion API or a Redis server.
//!
//! # Components
//!
//! - [`MockClassifier`] - intent classifier with scripted intents
//! - [`MockExtractor`] - entity extractor with scripted entity maps
//! - [`MockProvider`] - completion provider with scripted replies that records requests
//! - [`TestHarness`] - a real [`Orchestrator`](banter_agent::Orchestrator) over in-process stores

pub mod harness;
pub mod mock_nlu;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_nlu::{MockClassifier, MockExtractor};
pub use mock_provider::MockProvider;
