use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::domain::{Product, ProductCreate};
use crate::error::ProductError;
use crate::store::{Connector, ProductStore};

/// Opens a fresh MongoDB client for every operation.
#[derive(Debug, Clone)]
pub struct MongoConnector {
    config: Config,
}

impl MongoConnector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

/// A live client bound to the products collection.
pub struct MongoStore {
    client: Client,
    products: Collection<Product>,
}

#[async_trait]
impl Connector for MongoConnector {
    type Store = MongoStore;

    /// The driver connects lazily: an unreachable server shows up on the first call.
    #[instrument(skip(self))]
    async fn connect(&self) -> Result<MongoStore, ProductError> {
        debug!(uri = %self.config.uri, "Opening connection");
        let options = ClientOptions::parse(&self.config.uri).await?;
        let client = Client::with_options(options)?;
        let products = client
            .database(&self.config.database)
            .collection::<Product>(&self.config.collection);
        Ok(MongoStore { client, products })
    }

    #[instrument(skip(self, store))]
    async fn disconnect(&self, store: MongoStore) {
        debug!("Closing connection");
        store.client.shutdown().await;
    }
}

#[async_trait]
impl ProductStore for MongoStore {
    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64, ProductError> {
        Ok(self.products.count_documents(doc! {}).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, ProductError> {
        let cursor = self.products.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, payload), fields(product_name = %payload.name))]
    async fn insert(&self, payload: ProductCreate) -> Result<Product, ProductError> {
        let result = self
            .products
            .clone_with_type::<ProductCreate>()
            .insert_one(&payload)
            .await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            ProductError::DatabaseError(format!("unexpected inserted id: {}", result.inserted_id))
        })?;
        Ok(Product::from_create(id, payload))
    }

    #[instrument(skip(self, replacement), fields(product_id = %id))]
    async fn update(&self, id: ObjectId, replacement: ProductCreate) -> Result<u64, ProductError> {
        let result = self
            .products
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "nome": replacement.name,
                        "preco": replacement.price,
                        "estoque": replacement.stock,
                    }
                },
            )
            .await?;
        debug!(matched = result.matched_count, modified = result.modified_count, "Update applied");
        Ok(result.modified_count)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete(&self, id: ObjectId) -> Result<u64, ProductError> {
        let result = self.products.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}
