//! Zero-shot text classification against a fixed label set.
//!
//! The model is a black box reached over HTTP. It scores the input text
//! against each candidate label and the top-ranked label is accepted as-is,
//! with no confidence threshold.
//!
//! # Architecture
//!
//! - [`Classify`]: Core trait mapping text to one [`Category`]
//! - [`ZeroShotClient`]: Hugging Face style inference endpoint
//! - [`FixedLabel`]: Always answers the same label (offline runs, tests)
//! - [`categorize`]: Entry point used by the scrapers, one call per article

use crate::error::{Error, Result};
use crate::models::Category;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, instrument};
use url::Url;

/// Default zero-shot model endpoint.
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

/// Trait for zero-shot classification.
///
/// Implementors return exactly one label out of `labels`.
pub trait Classify {
    async fn classify(&self, text: &str, labels: &[Category]) -> Result<Category>;
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters,
}

#[derive(Serialize)]
struct ZeroShotParameters {
    candidate_labels: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The two answer shapes served by inference endpoints, plus their error body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Ranked { labels: Vec<String>, scores: Vec<f64> },
    Scored(Vec<LabelScore>),
    Failed { error: String },
}

impl ZeroShotResponse {
    /// Highest-scoring label, whatever the score.
    fn top_label(self) -> Result<String> {
        let best = match self {
            ZeroShotResponse::Ranked { labels, scores } => labels
                .into_iter()
                .zip(scores)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(label, _)| label),
            ZeroShotResponse::Scored(scored) => scored
                .into_iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
                .map(|s| s.label),
            ZeroShotResponse::Failed { error } => return Err(Error::Classification(error)),
        };
        best.ok_or_else(|| Error::Classification("model returned no labels".to_string()))
    }
}

/// Client for a zero-shot classification endpoint.
pub struct ZeroShotClient {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl ZeroShotClient {
    pub fn new(client: Client, endpoint: Url, token: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            token,
        }
    }
}

impl fmt::Debug for ZeroShotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZeroShotClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Classify for ZeroShotClient {
    #[instrument(level = "debug", skip_all)]
    async fn classify(&self, text: &str, labels: &[Category]) -> Result<Category> {
        let body = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels.iter().map(Category::as_str).collect(),
            },
        };

        let mut request = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Classification(e.to_string()))?;
        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| Error::Classification(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Classification(format!(
                "HTTP {status}: {}",
                truncate_for_log(&raw, 200)
            )));
        }

        let parsed: ZeroShotResponse = serde_json::from_str(&raw).map_err(|e| {
            Error::Classification(format!(
                "unexpected response ({e}): {}",
                truncate_for_log(&raw, 200)
            ))
        })?;
        let label = parsed.top_label()?;

        label
            .parse::<Category>()
            .ok()
            .filter(|c| labels.contains(c))
            .ok_or_else(|| Error::Classification(format!("label '{label}' is not a candidate")))
    }
}

/// Classifier that answers the same label for every input.
#[derive(Debug, Clone, Copy)]
pub struct FixedLabel(pub Category);

impl Classify for FixedLabel {
    async fn classify(&self, _text: &str, _labels: &[Category]) -> Result<Category> {
        Ok(self.0)
    }
}

/// The configured classifier, picked once at startup.
#[derive(Debug)]
pub enum Classifier {
    ZeroShot(ZeroShotClient),
    Fixed(FixedLabel),
}

impl Classify for Classifier {
    async fn classify(&self, text: &str, labels: &[Category]) -> Result<Category> {
        match self {
            Classifier::ZeroShot(c) => c.classify(text, labels).await,
            Classifier::Fixed(c) => c.classify(text, labels).await,
        }
    }
}

/// Map free text to one label out of the full [`Category`] set.
///
/// One inference call per invocation, no batching.
#[instrument(level = "info", skip_all, fields(text = %truncate_for_log(text, 60)))]
pub async fn categorize<C: Classify>(classifier: &C, text: &str) -> Result<Category> {
    let t0 = Instant::now();
    let res = classifier.classify(text, &Category::ALL).await;
    let elapsed_ms = t0.elapsed().as_millis() as u64;

    match &res {
        Ok(category) => debug!(elapsed_ms, %category, "Classified"),
        Err(e) => error!(elapsed_ms, error = %e, "Classification failed"),
    }
    res
}
