//! # Product Console
//!
//! Text-menu manager for the `produtos` collection: list, insert, update and
//! delete products stored in MongoDB.
//!
//! ```text
//! =========Gerenciamento de Produtos==============
//! Selecione uma opção:
//! 1 - Listar produtos.
//! 2 - Inserir produtos.
//! 3 - Atualizar produto.
//! 4 - Deletar produto.
//! 5 - Sair do sistema.
//! ```
//!
//! Diagnostics go to stderr through `tracing`; the dialogue stays on stdout.
//!
//! ```bash
//! cargo run                              # warnings and errors only
//! RUST_LOG=debug cargo run               # every connection and backend call
//! MONGODB_URI=mongodb://db:27017 cargo run
//! ```

mod config;
mod console;
mod domain;
mod error;
mod menu;
mod operations;
mod store;


use std::io;

use anyhow::Context;
use tracing::info;

use crate::config::Config;
use crate::console::Console;
use crate::store::MongoConnector;

/// Structured logging on stderr, filtered by `RUST_LOG` (default `warn`).
fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = Config::from_env();
    info!(uri = %config.uri, database = %config.database, collection = %config.collection, "Starting product console");

    let connector = MongoConnector::new(config);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());

    menu::run(&mut console, &connector)
        .await
        .context("product console aborted")?;

    Ok(())
}
