//! Remote HTTP implementation of the spam classifier.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::github::ModerationError;

use super::SpamClassifier;

/// Endpoint used when no classifier URL is configured.
pub const DEFAULT_CLASSIFIER_URL: &str = "http://127.0.0.1:8000/predict";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpSpamClassifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSpamClassifierConfig {
    /// Prediction endpoint receiving `POST {"text": ...}`.
    pub endpoint: String,
    /// Optional bearer token for the endpoint.
    pub api_key: Option<String>,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl Default for HttpSpamClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CLASSIFIER_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HttpSpamClassifierConfig {
    /// Constructs configuration for an endpoint and timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout,
        }
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Classifier backed by a remote prediction endpoint.
///
/// The endpoint answers either `{"is_spam": bool}` or the scikit-learn style
/// `{"prediction": 0 | 1}`.
#[derive(Debug, Clone)]
pub struct HttpSpamClassifier {
    config: HttpSpamClassifierConfig,
    client: Client,
}

impl HttpSpamClassifier {
    /// Creates a classifier from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ModerationError::Configuration`] when the endpoint URL is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: HttpSpamClassifierConfig) -> Result<Self, ModerationError> {
        url::Url::parse(&config.endpoint).map_err(|error| ModerationError::Configuration {
            message: format!("classifier URL '{}' is invalid: {error}", config.endpoint),
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| ModerationError::Configuration {
                message: format!("failed to configure classifier HTTP client: {error}"),
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl SpamClassifier for HttpSpamClassifier {
    async fn is_spam(&self, text: &str) -> Result<bool, ModerationError> {
        let mut request = self
            .client
            .post(self.config.endpoint.as_str())
            .json(&PredictionRequest { text });
        if let Some(api_key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|error| ModerationError::Network {
            message: format!("classifier request transport failed: {error}"),
        })?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), 160),
            );
            return Err(ModerationError::Classifier {
                message: format!("request failed with status {}: {body}", status.as_u16()),
            });
        }

        let prediction: PredictionResponse =
            response
                .json()
                .await
                .map_err(|error| ModerationError::Classifier {
                    message: format!("response JSON decoding failed: {error}"),
                })?;

        prediction.into_verdict()
    }
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionResponse {
    Verdict { is_spam: bool },
    Label { prediction: i64 },
}

impl PredictionResponse {
    fn into_verdict(self) -> Result<bool, ModerationError> {
        match self {
            Self::Verdict { is_spam } => Ok(is_spam),
            Self::Label { prediction: 0 } => Ok(false),
            Self::Label { prediction: 1 } => Ok(true),
            Self::Label { prediction } => Err(ModerationError::Classifier {
                message: format!("unexpected prediction label {prediction}"),
            }),
        }
    }
}

fn truncate_for_message(content: &str, limit: usize) -> String {
    let mut truncated: String = content.chars().take(limit).collect();
    if content.chars().nth(limit).is_some() {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
