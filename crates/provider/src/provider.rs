use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ProviderResult;

/// Authenticated provider session: the profile row is fetched separately
/// from the `profiles` table, keyed by `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub access_token: String,
}

/// The persistence provider seam: row CRUD against named tables, account
/// auth, and object storage. Rows travel as JSON values; the typed
/// [`Table`](crate::Table) wrapper sits on top.
///
/// A single-row read that matches nothing is a valid empty result, never
/// an error; only malformed requests and transport failures error.
#[async_trait]
pub trait Provider: Send + Sync {
    // Rows

    async fn select_rows(&self, table: &str) -> ProviderResult<Vec<Value>>;

    async fn select_rows_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> ProviderResult<Vec<Value>>;

    /// Insert one row; the returned value carries any server-assigned
    /// fields (id included).
    async fn insert_row(&self, table: &str, row: Value) -> ProviderResult<Value>;

    /// Patch the row with the given id and return the updated row.
    async fn update_row(&self, table: &str, id: Uuid, patch: Value) -> ProviderResult<Value>;

    async fn delete_row(&self, table: &str, id: Uuid) -> ProviderResult<()>;

    /// Update-if-exists-else-insert, keyed by `key_column`.
    async fn upsert_row(
        &self,
        table: &str,
        key_column: &str,
        row: Value,
    ) -> ProviderResult<Value>;

    // Auth

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<AuthSession>;

    async fn sign_up(&self, email: &str, password: &str) -> ProviderResult<AuthSession>;

    async fn sign_out(&self, access_token: &str) -> ProviderResult<()>;

    // Object storage

    /// Upload a binary object and return its public URL.
    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ProviderResult<String>;

    async fn remove_object(&self, bucket: &str, path: &str) -> ProviderResult<()>;
}
