use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

const API_VERSION: &str = "2016-09-01";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Article {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchResult {
    #[serde(default)]
    pub value: Vec<Article>,
}

#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Runs a query string (already percent-encoded where needed) against the
    /// index and returns the matching documents.
    async fn search(&self, query: &str) -> anyhow::Result<SearchResult>;
}

/// Builds the query string for an exact-category lookup.
pub fn category_filter(category: &str) -> String {
    format!("$filter={}", urlencoding::encode(&format!("category eq '{category}'")))
}

pub struct AzureSearchClient {
    account: String,
    index: String,
    key: String,
    client: reqwest::Client,
}

impl AzureSearchClient {
    pub fn new(account: String, index: String, key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build search HTTP client")?;
        Ok(Self {
            account,
            index,
            key,
            client,
        })
    }

    fn docs_url(&self, query: &str) -> String {
        format!(
            "https://{}.search.windows.net/indexes/{}/docs?api-version={API_VERSION}&{query}",
            self.account, self.index
        )
    }
}

#[async_trait]
impl KnowledgeBase for AzureSearchClient {
    async fn search(&self, query: &str) -> anyhow::Result<SearchResult> {
        if self.account.is_empty() || self.index.is_empty() {
            anyhow::bail!("AZURE_SEARCH_ACCOUNT and AZURE_SEARCH_INDEX must be set");
        }

        let resp = self
            .client
            .get(self.docs_url(query))
            .header("api-key", &self.key)
            .send()
            .await
            .context("failed to call Azure Search")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Azure Search error ({}): {}", status, body);
        }

        resp.json().await.context("failed to parse Azure Search response")
    }
}
