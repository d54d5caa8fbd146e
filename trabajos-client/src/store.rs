//! Item store interface
//!
//! [`ItemStore`] is the seam between the sync controller and the durable
//! store. [`HttpItemStore`] talks to `trabajos-server`; tests substitute an
//! in-memory double.

use async_trait::async_trait;
use shared::models::{Item, ItemCreate, ItemListResponse, ItemUpdate, OrderEntry, ReorderResponse};

use crate::{ClientConfig, ClientResult, HttpClient};

/// Ordered item store
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items; callers must not rely on the order of the returned list
    async fn list(&self) -> ClientResult<Vec<Item>>;

    async fn get(&self, id: i64) -> ClientResult<Item>;

    /// Create an item; the store assigns id and `order = N + 1`
    async fn create(&self, data: &ItemCreate) -> ClientResult<Item>;

    async fn update(&self, id: i64, data: &ItemUpdate) -> ClientResult<Item>;

    async fn delete(&self, id: i64) -> ClientResult<()>;

    /// Persist the full `{id, order}` mapping; returns rows written
    async fn reorder(&self, entries: &[OrderEntry]) -> ClientResult<usize>;
}

/// [`ItemStore`] over the `/items` HTTP API
#[derive(Debug, Clone)]
pub struct HttpItemStore {
    http: HttpClient,
}

impl HttpItemStore {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.build_http_client()?))
    }
}

#[async_trait]
impl ItemStore for HttpItemStore {
    async fn list(&self) -> ClientResult<Vec<Item>> {
        let resp: ItemListResponse = self.http.get("items").await?;
        Ok(resp.items)
    }

    async fn get(&self, id: i64) -> ClientResult<Item> {
        self.http.get(&format!("items/{id}")).await
    }

    async fn create(&self, data: &ItemCreate) -> ClientResult<Item> {
        self.http.post("items", data).await
    }

    async fn update(&self, id: i64, data: &ItemUpdate) -> ClientResult<Item> {
        self.http.put(&format!("items/{id}"), data).await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("items/{id}")).await
    }

    async fn reorder(&self, entries: &[OrderEntry]) -> ClientResult<usize> {
        let resp: ReorderResponse = self.http.post("items/reorder", entries).await?;
        Ok(resp.updated)
    }
}
