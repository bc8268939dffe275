use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{AuthSession, Provider};

#[derive(Debug, Clone)]
struct Account {
    user_id: Uuid,
    password: String,
}

/// In-memory provider used in degraded mode (no configured backend) and
/// in tests. Keeps a call log so tests can assert that a denied command
/// never reached the provider.
#[derive(Default)]
pub struct MockProvider {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    objects: RwLock<HashMap<String, Vec<u8>>>,
    accounts: RwLock<HashMap<String, Account>>,
    calls: RwLock<Vec<String>>,
    fail_next_write: RwLock<bool>,
    fail_table: RwLock<Option<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with already-shaped entities. Replaces nothing;
    /// rows append in order.
    pub fn seed_rows<T: Serialize>(&self, table: &str, entities: &[T]) {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_string()).or_default();
        for entity in entities {
            if let Ok(row) = serde_json::to_value(entity) {
                rows.push(row);
            }
        }
    }

    pub fn register_account(&self, email: &str, password: &str, user_id: Uuid) {
        self.accounts.write().insert(
            email.to_string(),
            Account {
                user_id,
                password: password.to_string(),
            },
        );
    }

    /// Make the next mutating row call fail, for failure-path tests.
    pub fn fail_next_write(&self) {
        *self.fail_next_write.write() = true;
    }

    /// Like [`fail_next_write`](Self::fail_next_write), but only for the
    /// named table, so earlier calls in the same operation go through.
    pub fn fail_next_write_on(&self, table: &str) {
        *self.fail_table.write() = Some(table.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().clone()
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables.read().get(table).map_or(0, Vec::len)
    }

    fn record(&self, call: String) {
        self.calls.write().push(call);
    }

    fn take_injected_failure(&self) -> ProviderResult<()> {
        let mut flag = self.fail_next_write.write();
        if *flag {
            *flag = false;
            return Err(injected_failure());
        }
        Ok(())
    }

    fn take_injected_failure_for(&self, table: &str) -> ProviderResult<()> {
        {
            let mut slot = self.fail_table.write();
            if slot.as_deref() == Some(table) {
                *slot = None;
                return Err(injected_failure());
            }
        }
        self.take_injected_failure()
    }
}

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

fn injected_failure() -> ProviderError {
    ProviderError::Api {
        status: 500,
        message: "injected failure".to_string(),
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn select_rows(&self, table: &str) -> ProviderResult<Vec<Value>> {
        self.record(format!("select:{table}"));
        Ok(self.tables.read().get(table).cloned().unwrap_or_default())
    }

    async fn select_rows_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> ProviderResult<Vec<Value>> {
        self.record(format!("select:{table}:{column}"));
        let tables = self.tables.read();
        let rows = tables.get(table).cloned().unwrap_or_default();
        Ok(rows
            .into_iter()
            .filter(|row| row.get(column).and_then(Value::as_str) == Some(value))
            .collect())
    }

    async fn insert_row(&self, table: &str, mut row: Value) -> ProviderResult<Value> {
        self.record(format!("insert:{table}"));
        self.take_injected_failure_for(table)?;
        // Server-assigned id when the caller left it out.
        let needs_id = row.get("id").is_none_or(Value::is_null);
        if needs_id {
            row["id"] = Value::String(Uuid::new_v4().to_string());
        }
        self.tables
            .write()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update_row(&self, table: &str, id: Uuid, patch: Value) -> ProviderResult<Value> {
        self.record(format!("update:{table}"));
        self.take_injected_failure_for(table)?;
        let id = id.to_string();
        let mut tables = self.tables.write();
        let rows = tables.get_mut(table).ok_or(ProviderError::NotFound)?;
        let row = rows
            .iter_mut()
            .find(|row| row_id(row) == Some(id.as_str()))
            .ok_or(ProviderError::NotFound)?;
        if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(row.clone())
    }

    async fn delete_row(&self, table: &str, id: Uuid) -> ProviderResult<()> {
        self.record(format!("delete:{table}"));
        self.take_injected_failure_for(table)?;
        let id = id.to_string();
        if let Some(rows) = self.tables.write().get_mut(table) {
            rows.retain(|row| row_id(row) != Some(id.as_str()));
        }
        Ok(())
    }

    async fn upsert_row(
        &self,
        table: &str,
        key_column: &str,
        row: Value,
    ) -> ProviderResult<Value> {
        self.record(format!("upsert:{table}"));
        self.take_injected_failure_for(table)?;
        let key = row.get(key_column).cloned();
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_string()).or_default();
        let existing = rows
            .iter_mut()
            .find(|r| key.is_some() && r.get(key_column) == key.as_ref());
        match existing {
            Some(slot) => *slot = row.clone(),
            None => rows.push(row.clone()),
        }
        Ok(row)
    }

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<AuthSession> {
        self.record("sign_in".to_string());
        let accounts = self.accounts.read();
        let account = accounts
            .get(email)
            .filter(|a| a.password == password)
            .ok_or_else(|| ProviderError::Auth("invalid credentials".to_string()))?;
        Ok(AuthSession {
            user_id: account.user_id,
            access_token: format!("mock-token-{}", account.user_id),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> ProviderResult<AuthSession> {
        self.record("sign_up".to_string());
        let user_id = Uuid::new_v4();
        self.register_account(email, password, user_id);
        Ok(AuthSession {
            user_id,
            access_token: format!("mock-token-{user_id}"),
        })
    }

    async fn sign_out(&self, _access_token: &str) -> ProviderResult<()> {
        self.record("sign_out".to_string());
        Ok(())
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> ProviderResult<String> {
        self.record(format!("upload:{bucket}"));
        self.take_injected_failure()?;
        let key = format!("{bucket}/{path}");
        self.objects.write().insert(key.clone(), bytes);
        Ok(format!("mock://{key}"))
    }

    async fn remove_object(&self, bucket: &str, path: &str) -> ProviderResult<()> {
        self.record(format!("remove:{bucket}"));
        self.objects.write().remove(&format!("{bucket}/{path}"));
        Ok(())
    }
}
