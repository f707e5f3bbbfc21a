// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a hosted model inference API.
//!
//! Models are addressed as `{base_url}/{model_id}`; the request body is the
//! task-specific JSON payload and the response is parsed into the caller's type.

use std::time::Duration;

use banter_core::BanterError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Which adapter a failure belongs to, so it surfaces as the right error variant.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Stage {
    Classifier,
    Extractor,
}

impl Stage {
    pub(crate) fn error(
        self,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> BanterError {
        match self {
            Stage::Classifier => BanterError::Classifier { message, source },
            Stage::Extractor => BanterError::Extractor { message, source },
        }
    }
}

/// Error body returned by the inference API (e.g. while a model is loading).
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Shared client for hosted classification and NER models.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: reqwest::Client,
    base_url: String,
}

impl InferenceClient {
    /// Builds a client. The token, when present, is sent as a bearer credential.
    pub fn new(
        base_url: &str,
        api_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, BanterError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = api_token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    BanterError::Config(format!("invalid inference API token header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| BanterError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Posts `body` to the given model and parses the JSON response.
    pub(crate) async fn infer<B, T>(
        &self,
        stage: Stage,
        model: &str,
        body: &B,
    ) -> Result<T, BanterError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| stage.error(format!("HTTP request failed: {e}"), Some(Box::new(e))))?;

        let status = response.status();
        debug!(status = %status, model, "inference response received");

        let text = response.text().await.map_err(|e| {
            stage.error(
                format!("failed to read response body: {e}"),
                Some(Box::new(e)),
            )
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(api_err) => format!("inference API error ({status}): {}", api_err.error),
                Err(_) => format!("inference API returned {status}: {text}"),
            };
            return Err(stage.error(message, None));
        }

        serde_json::from_str(&text).map_err(|e| {
            stage.error(
                format!("failed to parse inference response: {e}"),
                Some(Box::new(e)),
            )
        })
    }
}
