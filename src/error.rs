use thiserror::Error;

/// Errors that can occur while managing products.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product database error: {0}")]
    DatabaseError(String),
    #[error("Invalid product id: {0}")]
    InvalidId(String),
    #[error("Invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },
    #[error("Console input closed")]
    InputClosed,
    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),
}

impl From<mongodb::error::Error> for ProductError {
    fn from(e: mongodb::error::Error) -> Self {
        ProductError::DatabaseError(e.to_string())
    }
}
