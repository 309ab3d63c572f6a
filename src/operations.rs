//! The four record operations.
//!
//! Each one gathers its input, opens its own connection, makes the backend
//! call, prints the outcome and closes the connection again. Backend failures
//! and malformed ids are reported and swallowed; unparsable numbers in the
//! input propagate to the caller before any connection is opened.

use std::io::{BufRead, Write};

use mongodb::bson::oid::ObjectId;
use tracing::{debug, error, info, instrument, warn};

use crate::console::Console;
use crate::domain::{Product, ProductCreate};
use crate::error::ProductError;
use crate::store::{Connector, ProductStore};

const DIVIDER: &str = "---------------------";

/// How a write operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Applied,
    NoEffect,
    EmptyCollection,
}

/// Converts user text to an id the backend understands.
pub fn parse_id(text: &str) -> Result<ObjectId, ProductError> {
    ObjectId::parse_str(text).map_err(|e| ProductError::InvalidId(e.to_string()))
}

/// The part of an error worth showing to the user.
fn cause(e: &ProductError) -> String {
    match e {
        ProductError::DatabaseError(msg) | ProductError::InvalidId(msg) => msg.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// LIST
// =============================================================================

#[instrument(name = "list_products", skip_all)]
pub async fn list<C, R, W>(console: &mut Console<R, W>, connector: &C) -> Result<(), ProductError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let result = match connector.connect().await {
        Ok(store) => {
            let result = fetch_all(&store).await;
            connector.disconnect(store).await;
            result
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(products) if products.is_empty() => {
            debug!("Collection is empty");
            console.say("Não existem produtos a serem listados!")?;
        }
        Ok(products) => {
            info!(count = products.len(), "Listing products");
            console.say("Listando produtos ...")?;
            console.say(DIVIDER)?;
            for product in &products {
                print_product(console, product)?;
            }
        }
        Err(e) => {
            error!(error = %e, "List failed");
            console.say(format!("Erro ao acessar o banco de dados: {}", cause(&e)))?;
        }
    }
    Ok(())
}

async fn fetch_all(store: &impl ProductStore) -> Result<Vec<Product>, ProductError> {
    if store.count().await? == 0 {
        return Ok(Vec::new());
    }
    store.list().await
}

fn print_product<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    product: &Product,
) -> Result<(), ProductError> {
    console.say(format!("ID: {}", product.id))?;
    console.say(format!("Produto: {}", product.name))?;
    // Debug keeps the fractional part on whole prices ("10.0", not "10")
    console.say(format!("Preço: {:?}", product.price))?;
    console.say(format!("Estoque: {}", product.stock))?;
    console.say(DIVIDER)
}

// =============================================================================
// INSERT
// =============================================================================

#[instrument(name = "insert_product", skip_all)]
pub async fn insert<C, R, W>(console: &mut Console<R, W>, connector: &C) -> Result<(), ProductError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let name = console.prompt("Informe o nome do produto: ")?;
    let price = console.prompt_parsed("Informe o preço do produto: ", "price")?;
    let stock = console.prompt_parsed("Informe a quantidade de produtos em estoque: ", "stock")?;
    let payload = ProductCreate::new(name.clone(), price, stock);

    let result = match connector.connect().await {
        Ok(store) => {
            let result = store.insert(payload).await;
            connector.disconnect(store).await;
            result
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(product) => {
            info!(product_id = %product.id, product_name = %product.name, "Product inserted");
            console.say(format!("O produto {} foi adicionado na coleção com sucesso.", name))?;
        }
        Err(e) => {
            error!(error = %e, "Insert failed");
            console.say(format!("Não foi possível inserir o produto. Erro: {}", cause(&e)))?;
        }
    }
    Ok(())
}

// =============================================================================
// UPDATE
// =============================================================================

#[instrument(name = "update_product", skip_all)]
pub async fn update<C, R, W>(console: &mut Console<R, W>, connector: &C) -> Result<(), ProductError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let id_text = console.prompt("Informe o ID do produto: ")?;
    let name = console.prompt("Informe o nome atualizado do produto: ")?;
    let price = console.prompt_parsed("Informe o preço atualizado do produto: ", "price")?;
    let stock = console.prompt_parsed(
        "Informe a quantidade atualizada de produtos em estoque: ",
        "stock",
    )?;
    let replacement = ProductCreate::new(name.clone(), price, stock);

    let result = match connector.connect().await {
        Ok(store) => {
            let result = replace(&store, &id_text, replacement).await;
            connector.disconnect(store).await;
            result
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(Outcome::Applied) => {
            info!(product_id = %id_text, product_name = %name, "Product updated");
            console.say(format!("O produto {} foi atualizado com sucesso", name))?;
        }
        Ok(Outcome::NoEffect) => {
            warn!(product_id = %id_text, "Update modified nothing");
            console.say("Não foi possível atualizar o produto")?;
        }
        Ok(Outcome::EmptyCollection) => {
            console.say("Não existem produtos a serem atualizados")?;
        }
        Err(e @ ProductError::InvalidId(_)) => {
            warn!(product_id = %id_text, error = %e, "Rejected product id");
            console.say(format!("ObjectId inválido. Erro: {}", cause(&e)))?;
        }
        Err(e) => {
            error!(error = %e, "Update failed");
            console.say(format!("Não foi possível acessar o banco de dados. Erro: {}", cause(&e)))?;
        }
    }
    Ok(())
}

/// Success means exactly one document changed: rewriting identical values is a no-op.
async fn replace(
    store: &impl ProductStore,
    id_text: &str,
    replacement: ProductCreate,
) -> Result<Outcome, ProductError> {
    if store.count().await? == 0 {
        return Ok(Outcome::EmptyCollection);
    }
    let id = parse_id(id_text)?;
    let modified = store.update(id, replacement).await?;
    Ok(if modified == 1 { Outcome::Applied } else { Outcome::NoEffect })
}

// =============================================================================
// DELETE
// =============================================================================

#[instrument(name = "delete_product", skip_all)]
pub async fn delete<C, R, W>(console: &mut Console<R, W>, connector: &C) -> Result<(), ProductError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let id_text = console.prompt("Informe o ID do produto a ser deletado: ")?;

    let result = match connector.connect().await {
        Ok(store) => {
            let result = remove(&store, &id_text).await;
            connector.disconnect(store).await;
            result
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(Outcome::Applied) => {
            info!(product_id = %id_text, "Product deleted");
            console.say("O produto foi deletado com sucesso")?;
        }
        Ok(Outcome::NoEffect) => {
            warn!(product_id = %id_text, "Delete removed nothing");
            console.say("O produto não foi deletado")?;
        }
        Ok(Outcome::EmptyCollection) => {
            console.say("Não existem produtos a serem deletados")?;
        }
        Err(e @ ProductError::InvalidId(_)) => {
            warn!(product_id = %id_text, error = %e, "Rejected product id");
            console.say(format!("ObjectId inválido. Erro: {}", cause(&e)))?;
        }
        Err(e) => {
            error!(error = %e, "Delete failed");
            console.say(format!("Não foi possível acessar o banco de dados. Erro: {}", cause(&e)))?;
        }
    }
    Ok(())
}

async fn remove(store: &impl ProductStore, id_text: &str) -> Result<Outcome, ProductError> {
    if store.count().await? == 0 {
        return Ok(Outcome::EmptyCollection);
    }
    let id = parse_id(id_text)?;
    let deleted = store.delete(id).await?;
    Ok(if deleted > 0 { Outcome::Applied } else { Outcome::NoEffect })
}
