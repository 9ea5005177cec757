use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::IntentRecognizer;
use crate::models::{Entity, Intent, RecognizedIntent};

#[derive(Debug, Deserialize)]
struct ScoredIntent {
    intent: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisResponse {
    top_scoring_intent: Option<ScoredIntent>,
    #[serde(default)]
    entities: Vec<Entity>,
}

/// Client for a published LUIS (v2) application endpoint. The model URL is
/// the full endpoint including the subscription key; the query text is
/// appended as the `q` parameter.
pub struct LuisRecognizer {
    model_url: String,
    client: reqwest::Client,
}

impl LuisRecognizer {
    pub fn new(model_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build LUIS HTTP client")?;
        Ok(Self { model_url, client })
    }

    fn query_url(&self, text: &str) -> String {
        let base = self.model_url.trim_end();
        let encoded = urlencoding::encode(text);
        if base.ends_with("q=") {
            format!("{base}{encoded}")
        } else if base.contains('?') {
            format!("{base}&q={encoded}")
        } else {
            format!("{base}?q={encoded}")
        }
    }
}

#[async_trait]
impl IntentRecognizer for LuisRecognizer {
    async fn recognize(&self, text: &str) -> anyhow::Result<RecognizedIntent> {
        if self.model_url.is_empty() {
            anyhow::bail!("LUIS_MODEL_URL is not configured");
        }

        let resp = self
            .client
            .get(self.query_url(text))
            .send()
            .await
            .context("failed to call LUIS")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("LUIS error ({}): {}", status, body);
        }

        let data: LuisResponse = resp.json().await.context("failed to parse LUIS response")?;
        Ok(into_recognized(data))
    }
}

fn into_recognized(data: LuisResponse) -> RecognizedIntent {
    match data.top_scoring_intent {
        Some(top) => RecognizedIntent {
            intent: Intent::parse(&top.intent),
            score: top.score,
            entities: data.entities,
        },
        None => RecognizedIntent {
            entities: data.entities,
            ..RecognizedIntent::unknown()
        },
    }
}
