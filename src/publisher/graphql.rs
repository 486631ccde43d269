use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use crate::app::{MigrateError, Result};
use crate::config::HttpConfig;
use crate::publisher::{Publisher, SaveInput, ARCHIVED_STATE};

pub const SAVE_PAGE_MUTATION: &str = "mutation SavePage($input: SavePageInput!) { savePage(input: $input) { ... on SaveSuccess { url clientRequestId } ... on SaveError { errorCodes message } } }";

pub const SAVE_URL_MUTATION: &str = "mutation SaveUrl($input: SaveUrlInput!) { saveUrl(input: $input) { ... on SaveSuccess { url clientRequestId } ... on SaveError { errorCodes message } } }";

pub struct GraphqlPublisher {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GraphqlPublisher {
    pub fn new(endpoint: &str, api_key: &str, config: &HttpConfig) -> Result<Self> {
        url::Url::parse(endpoint)?;

        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// POST `body` and return the raw response text on success.
    async fn send(&self, operation: &str, body: &Value) -> Result<String> {
        let payload = body.to_string();

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.api_key.as_str())
            .body(payload.clone())
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        if status != StatusCode::OK {
            tracing::error!(
                operation,
                status = %status,
                headers = ?headers,
                body = %text,
                request = %payload,
                "publish request rejected"
            );
            return Err(MigrateError::PublishRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::debug!(operation, body = %text, "publish response");
        check_save_response(operation, &text)?;
        Ok(text)
    }
}

fn base_input(input: &SaveInput) -> serde_json::Map<String, Value> {
    let labels: Vec<Value> = input
        .labels
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();

    let mut fields = serde_json::Map::new();
    if let Some(saved_at) = &input.saved_at {
        fields.insert("savedAt".into(), json!(saved_at));
    }
    fields.insert("labels".into(), Value::Array(labels));
    fields.insert("clientRequestId".into(), json!(input.client_request_id));
    fields.insert("source".into(), json!(input.source));
    fields.insert("url".into(), json!(input.url));
    fields.insert("state".into(), json!(ARCHIVED_STATE));
    fields
}

/// Request body for the `savePage` mutation (full captured content).
pub fn save_page_body(input: &SaveInput, title: &str, content: &str) -> Value {
    let mut fields = base_input(input);
    fields.insert("originalContent".into(), json!(content));
    fields.insert("title".into(), json!(title));

    json!({
        "query": SAVE_PAGE_MUTATION,
        "variables": { "input": fields },
    })
}

/// Request body for the `saveUrl` mutation (link only).
pub fn save_url_body(input: &SaveInput) -> Value {
    json!({
        "query": SAVE_URL_MUTATION,
        "variables": { "input": base_input(input) },
    })
}

/// Inspect a 200 response for GraphQL-level failures.
///
/// Bodies that are not JSON are accepted as success.
fn check_save_response(operation: &str, body: &str) -> Result<()> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Ok(());
    };

    if let Some(errors) = value
        .get("errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty())
    {
        let message = errors
            .iter()
            .filter_map(|e| e.get("message").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(MigrateError::SaveError {
            codes: Vec::new(),
            message,
        });
    }

    let result = value.get("data").and_then(|data| data.get(operation));
    if let Some(codes) = result
        .and_then(|r| r.get("errorCodes"))
        .and_then(Value::as_array)
    {
        let message = result
            .and_then(|r| r.get("message"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(MigrateError::SaveError {
            codes: codes
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
            message,
        });
    }

    Ok(())
}

#[async_trait]
impl Publisher for GraphqlPublisher {
    async fn publish_article(
        &self,
        input: &SaveInput,
        title: &str,
        content: &str,
    ) -> Result<String> {
        self.send("savePage", &save_page_body(input, title, content))
            .await
    }

    async fn publish_url(&self, input: &SaveInput) -> Result<String> {
        self.send("saveUrl", &save_url_body(input)).await
    }
}
