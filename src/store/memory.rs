//! # Memory Store
//!
//! An in-process stand-in for the backend, used by tests.
//!
//! Every connection shares one collection, so products survive across the
//! per-operation connect/disconnect cycle just as they do in MongoDB. Each
//! backend call is recorded in order, which lets tests assert that a call was
//! *not* made (e.g. no delete on an empty collection).

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::{Product, ProductCreate};
use crate::error::ProductError;
use crate::store::{Connector, ProductStore};

/// A backend call as seen by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Count,
    List,
    Insert(ProductCreate),
    Update(ObjectId, ProductCreate),
    Delete(ObjectId),
}

#[derive(Debug, Default)]
struct State {
    products: Vec<Product>,
    calls: Vec<StoreCall>,
    connects: usize,
    disconnects: usize,
    failure: Option<String>,
}

/// Hands out [`MemoryStore`]s over one shared collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    state: Arc<Mutex<State>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given products already stored.
    pub fn with_products(products: Vec<Product>) -> Self {
        let connector = Self::new();
        connector.lock().products = products;
        connector
    }

    /// Makes every following backend call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Connections opened and closed so far.
    pub fn connection_counts(&self) -> (usize, usize) {
        let state = self.lock();
        (state.connects, state.disconnects)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("memory store poisoned")
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Store = MemoryStore;

    async fn connect(&self) -> Result<MemoryStore, ProductError> {
        self.lock().connects += 1;
        Ok(MemoryStore { state: Arc::clone(&self.state) })
    }

    async fn disconnect(&self, _store: MemoryStore) {
        self.lock().disconnects += 1;
    }
}

pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Records the call, then fails it if a failure was configured.
    fn begin(&self, call: StoreCall) -> Result<MutexGuard<'_, State>, ProductError> {
        let mut state = self.state.lock().expect("memory store poisoned");
        state.calls.push(call);
        if let Some(message) = state.failure.clone() {
            return Err(ProductError::DatabaseError(message));
        }
        Ok(state)
    }
}

/// Overwrites every field. `true` only if some value differed, matching the
/// backend's notion of a modified document.
fn replace_fields(product: &mut Product, fields: ProductCreate) -> bool {
    let changed = product.name != fields.name
        || product.price != fields.price
        || product.stock != fields.stock;
    product.name = fields.name;
    product.price = fields.price;
    product.stock = fields.stock;
    changed
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn count(&self) -> Result<u64, ProductError> {
        let state = self.begin(StoreCall::Count)?;
        Ok(state.products.len() as u64)
    }

    async fn list(&self) -> Result<Vec<Product>, ProductError> {
        let state = self.begin(StoreCall::List)?;
        Ok(state.products.clone())
    }

    async fn insert(&self, payload: ProductCreate) -> Result<Product, ProductError> {
        let mut state = self.begin(StoreCall::Insert(payload.clone()))?;
        let product = Product::from_create(ObjectId::new(), payload);
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: ObjectId, replacement: ProductCreate) -> Result<u64, ProductError> {
        let mut state = self.begin(StoreCall::Update(id, replacement.clone()))?;
        let modified = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .map(|p| replace_fields(p, replacement))
            .unwrap_or(false);
        Ok(u64::from(modified))
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, ProductError> {
        let mut state = self.begin(StoreCall::Delete(id))?;
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok((before - state.products.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_products_survive_reconnect() {
        let connector = MemoryConnector::new();

        let store = connector.connect().await.unwrap();
        let id = store.insert(ProductCreate::new("Widget", 9.99, 10)).await.unwrap().id;
        connector.disconnect(store).await;

        let store = connector.connect().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.list().await.unwrap()[0].id, id);
        connector.disconnect(store).await;

        assert_eq!(connector.connection_counts(), (2, 2));
    }

    #[tokio::test]
    async fn test_update_counts_only_real_changes() {
        let connector = MemoryConnector::new();
        let store = connector.connect().await.unwrap();
        let id = store.insert(ProductCreate::new("Widget", 9.99, 10)).await.unwrap().id;

        assert_eq!(store.update(id, ProductCreate::new("Widget", 9.99, 10)).await.unwrap(), 0);
        assert_eq!(store.update(id, ProductCreate::new("Gadget", 9.99, 10)).await.unwrap(), 1);
        assert_eq!(store.update(ObjectId::new(), ProductCreate::new("X", 1.0, 1)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_and_returned() {
        let connector = MemoryConnector::new();
        connector.fail_with("connection refused");
        let store = connector.connect().await.unwrap();

        let result = store.count().await;
        assert!(matches!(result, Err(ProductError::DatabaseError(ref m)) if m == "connection refused"));
        assert_eq!(connector.calls(), vec![StoreCall::Count]);
    }
}
