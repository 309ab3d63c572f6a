use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Represents a product in the inventory.
///
/// Field names on the wire follow the existing `produtos` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "estoque")]
    pub stock: i64,
}

/// Payload for creating a product, also used as the full replacement on update.
///
/// Carries no id: the storage layer assigns one on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "estoque")]
    pub stock: i64,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}

impl Product {
    /// Builds the stored record from an assigned id and its creation payload.
    pub fn from_create(id: ObjectId, payload: ProductCreate) -> Self {
        Self {
            id,
            name: payload.name,
            price: payload.price,
            stock: payload.stock,
        }
    }
}
