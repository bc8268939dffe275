use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use atelier_provider::{InsightKind, InsightResult};

/// Server-side text generation for the insight endpoint. The API key
/// lives here and only here; clients of the proxy never see it.
#[derive(Debug, Clone)]
pub struct InsightGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl InsightGenerator {
    pub fn new(api_key: Option<String>, model: String, max_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            max_tokens,
        }
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn generate(&self, kind: InsightKind, data: &Value) -> Result<InsightResult, String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| "Insight API key not configured".to_string())?;

        let prompt = match kind {
            InsightKind::StrategicInsight => format!(
                concat!(
                    "You are a strategist for an artist management agency. ",
                    "Given this project snapshot as JSON:\n{}\n",
                    "Write one concise paragraph of strategic insight. ",
                    "Return plain text only, no markdown."
                ),
                data
            ),
            InsightKind::NextSteps => format!(
                concat!(
                    "You are a strategist for an artist management agency. ",
                    "Given this project snapshot as JSON:\n{}\n",
                    "List 3 to 5 concrete next steps, one per line. ",
                    "Return plain lines only, no numbering and no markdown."
                ),
                data
            ),
        };

        let request = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Insight API request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Insight API error {}: {}", status, body));
        }

        let claude_resp: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse insight response: {}", e))?;

        let text = claude_resp
            .content
            .first()
            .and_then(|c| c.text.as_ref())
            .ok_or_else(|| "No text in insight response".to_string())?;

        Ok(shape_result(kind, text))
    }
}

/// A strategic insight stays one paragraph; next steps become a list,
/// with any stray bullet or numbering prefixes stripped.
fn shape_result(kind: InsightKind, text: &str) -> InsightResult {
    match kind {
        InsightKind::StrategicInsight => InsightResult::Text(text.trim().to_string()),
        InsightKind::NextSteps => {
            let steps = text
                .lines()
                .map(|line| {
                    line.trim()
                        .trim_start_matches(['-', '*', '•'])
                        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
                        .trim()
                        .to_string()
                })
                .filter(|line| !line.is_empty())
                .collect();
            InsightResult::List(steps)
        }
    }
}
