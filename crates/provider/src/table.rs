use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ProviderResult;
use crate::provider::Provider;

/// Typed view over one provider table. Serializes entities to rows on
/// the way out and decodes rows on the way in.
pub struct Table<T> {
    provider: Arc<dyn Provider>,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            name: self.name,
            _marker: PhantomData,
        }
    }
}

impl<T> Table<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(provider: Arc<dyn Provider>, name: &'static str) -> Self {
        Self {
            provider,
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn find_all(&self) -> ProviderResult<Vec<T>> {
        let rows = self.provider.select_rows(self.name).await?;
        rows.into_iter()
            .map(|row| Ok(serde_json::from_value(row)?))
            .collect()
    }

    pub async fn find_eq(&self, column: &str, value: &str) -> ProviderResult<Vec<T>> {
        let rows = self.provider.select_rows_eq(self.name, column, value).await?;
        rows.into_iter()
            .map(|row| Ok(serde_json::from_value(row)?))
            .collect()
    }

    /// Single-row lookup; no match is a valid `None`, not an error.
    pub async fn find_one_eq(&self, column: &str, value: &str) -> ProviderResult<Option<T>> {
        let mut rows = self.find_eq(column, value).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    pub async fn insert(&self, entity: &T) -> ProviderResult<T> {
        let row = serde_json::to_value(entity)?;
        let returned = self.provider.insert_row(self.name, row).await?;
        Ok(serde_json::from_value(returned)?)
    }

    pub async fn update(&self, id: Uuid, patch: Value) -> ProviderResult<T> {
        let returned = self.provider.update_row(self.name, id, patch).await?;
        Ok(serde_json::from_value(returned)?)
    }

    pub async fn delete(&self, id: Uuid) -> ProviderResult<()> {
        self.provider.delete_row(self.name, id).await
    }

    pub async fn upsert(&self, key_column: &str, entity: &T) -> ProviderResult<T> {
        let row = serde_json::to_value(entity)?;
        let returned = self.provider.upsert_row(self.name, key_column, row).await?;
        Ok(serde_json::from_value(returned)?)
    }
}
