//! Storage seam for the products collection.
//!
//! A [`Connector`] opens one [`ProductStore`] per operation and closes it
//! afterwards. Each store method is exactly one backend call.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::{Product, ProductCreate};
use crate::error::ProductError;

pub mod mongo;
#[cfg(test)]
pub mod memory;

pub use mongo::MongoConnector;

// =============================================================================
// 1. THE BACKEND CALLS
// =============================================================================

/// The single-call operations the record operations need from the backend.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Number of documents in the collection.
    async fn count(&self) -> Result<u64, ProductError>;

    /// All documents, in storage order.
    async fn list(&self) -> Result<Vec<Product>, ProductError>;

    /// Inserts a new document and returns it with the id the backend assigned.
    async fn insert(&self, payload: ProductCreate) -> Result<Product, ProductError>;

    /// Replaces the fields of the document with `id`. Returns the modified count.
    async fn update(&self, id: ObjectId, replacement: ProductCreate) -> Result<u64, ProductError>;

    /// Removes the document with `id`. Returns the deleted count.
    async fn delete(&self, id: ObjectId) -> Result<u64, ProductError>;
}

// =============================================================================
// 2. THE CONNECTION HELPER
// =============================================================================

/// Opens and closes connections to the backend.
#[async_trait]
pub trait Connector: Send + Sync {
    type Store: ProductStore;

    async fn connect(&self) -> Result<Self::Store, ProductError>;

    /// Closes the connection. Consumes the store so it cannot be closed twice.
    async fn disconnect(&self, store: Self::Store);
}
