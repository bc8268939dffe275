use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use atelier_config::ProviderSettings;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{AuthSession, Provider};

/// REST client for the hosted provider: PostgREST-style row endpoints
/// under `/rest/v1`, token auth under `/auth/v1`, object storage under
/// `/storage/v1`.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl HttpProvider {
    /// Fails with `Unconfigured` when the URL or anon key is absent; the
    /// caller is expected to fall back to degraded mode instead of
    /// aborting startup.
    pub fn from_settings(settings: &ProviderSettings) -> ProviderResult<Self> {
        let (Some(url), Some(key)) = (settings.url.as_ref(), settings.anon_key.as_ref()) else {
            return Err(ProviderError::Unconfigured);
        };
        Ok(Self {
            client: Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            anon_key: key.clone(),
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn with_keys(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn check(&self, response: Response) -> ProviderResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(ProviderError::Api { status, message })
    }

    async fn rows_from(&self, response: Response) -> ProviderResult<Vec<Value>> {
        let body: Value = self.check(response).await?.json().await?;
        match body {
            Value::Array(rows) => Ok(rows),
            other => Ok(vec![other]),
        }
    }

    /// Returned-representation calls come back as a one-element array.
    async fn single_row_from(&self, response: Response) -> ProviderResult<Value> {
        self.rows_from(response)
            .await?
            .into_iter()
            .next()
            .ok_or(ProviderError::NotFound)
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn select_rows(&self, table: &str) -> ProviderResult<Vec<Value>> {
        let response = self
            .with_keys(self.client.get(self.rest_url(table)))
            .query(&[("select", "*")])
            .send()
            .await?;
        self.rows_from(response).await
    }

    async fn select_rows_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> ProviderResult<Vec<Value>> {
        let url = format!(
            "{}?select=*&{}=eq.{}",
            self.rest_url(table),
            column,
            urlencoding::encode(value)
        );
        let response = self.with_keys(self.client.get(url)).send().await?;
        self.rows_from(response).await
    }

    async fn insert_row(&self, table: &str, row: Value) -> ProviderResult<Value> {
        debug!(table, "inserting row");
        let response = self
            .with_keys(self.client.post(self.rest_url(table)))
            .header("Prefer", "return=representation")
            .json(&json!([row]))
            .send()
            .await?;
        self.single_row_from(response).await
    }

    async fn update_row(&self, table: &str, id: Uuid, patch: Value) -> ProviderResult<Value> {
        debug!(table, %id, "updating row");
        let url = format!("{}?id=eq.{}", self.rest_url(table), id);
        let response = self
            .with_keys(self.client.patch(url))
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        self.single_row_from(response).await
    }

    async fn delete_row(&self, table: &str, id: Uuid) -> ProviderResult<()> {
        debug!(table, %id, "deleting row");
        let url = format!("{}?id=eq.{}", self.rest_url(table), id);
        let response = self.with_keys(self.client.delete(url)).send().await?;
        self.check(response).await?;
        Ok(())
    }

    async fn upsert_row(
        &self,
        table: &str,
        key_column: &str,
        row: Value,
    ) -> ProviderResult<Value> {
        debug!(table, key_column, "upserting row");
        let url = format!("{}?on_conflict={}", self.rest_url(table), key_column);
        let response = self
            .with_keys(self.client.post(url))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&json!([row]))
            .send()
            .await?;
        self.single_row_from(response).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<AuthSession> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .with_keys(self.client.post(url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: Value = self.check(response).await?.json().await?;
        session_from_auth_body(&body)
    }

    async fn sign_up(&self, email: &str, password: &str) -> ProviderResult<AuthSession> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let response = self
            .with_keys(self.client.post(url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: Value = self.check(response).await?.json().await?;
        session_from_auth_body(&body)
    }

    async fn sign_out(&self, access_token: &str) -> ProviderResult<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ProviderResult<String> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let response = self
            .with_keys(self.client.post(url))
            .header("content-type", content_type.to_string())
            .body(bytes)
            .send()
            .await?;
        self.check(response).await?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        ))
    }

    async fn remove_object(&self, bucket: &str, path: &str) -> ProviderResult<()> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let response = self.with_keys(self.client.delete(url)).send().await?;
        self.check(response).await?;
        Ok(())
    }
}

fn session_from_auth_body(body: &Value) -> ProviderResult<AuthSession> {
    let access_token = body["access_token"]
        .as_str()
        .ok_or_else(|| ProviderError::Auth("missing access_token".to_string()))?;
    let user_id = body["user"]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ProviderError::Auth("missing user id".to_string()))?;
    Ok(AuthSession {
        user_id,
        access_token: access_token.to_string(),
    })
}
