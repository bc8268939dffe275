use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProviderError, ProviderResult};

/// What kind of generated insight the caller wants. Wire names match the
/// proxy contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InsightKind {
    #[serde(rename = "strategicInsight")]
    StrategicInsight,
    #[serde(rename = "nextSteps")]
    NextSteps,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRequest {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub data: Value,
}

/// A strategic insight comes back as one paragraph; next steps as a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsightResult {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct InsightResponse {
    result: InsightResult,
}

/// Client for the insight proxy endpoint. The LLM credential stays on
/// the proxy; this client only ever sees generated text.
#[derive(Debug, Clone)]
pub struct InsightClient {
    client: Client,
    base_url: String,
}

impl InsightClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn generate(&self, kind: InsightKind, data: Value) -> ProviderResult<InsightResult> {
        let url = format!("{}/api/insight", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .json(&InsightRequest { kind, data })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, message });
        }

        let body: InsightResponse = response.json().await?;
        Ok(body.result)
    }
}
