//! Numbered text menu driving the record operations.
//!
//! Labels come from the order of [`Operation::ALL`]; the label after the last
//! operation exits.

use std::io::{BufRead, Write};

use tracing::{debug, info, instrument};

use crate::console::{parse_field, Console};
use crate::error::ProductError;
use crate::operations;
use crate::store::Connector;

/// A menu entry that runs a record operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Insert,
    Update,
    Delete,
}

impl Operation {
    /// Menu order. Position `i` is shown as label `i + 1`.
    pub const ALL: [Operation; 4] = [
        Operation::List,
        Operation::Insert,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Operation::List => "Listar produtos.",
            Operation::Insert => "Inserir produtos.",
            Operation::Update => "Atualizar produto.",
            Operation::Delete => "Deletar produto.",
        }
    }

    async fn run<C, R, W>(self, console: &mut Console<R, W>, connector: &C) -> Result<(), ProductError>
    where
        C: Connector,
        R: BufRead,
        W: Write,
    {
        match self {
            Operation::List => operations::list(console, connector).await,
            Operation::Insert => operations::insert(console, connector).await,
            Operation::Update => operations::update(console, connector).await,
            Operation::Delete => operations::delete(console, connector).await,
        }
    }
}

/// What a typed menu number means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Run(Operation),
    Exit,
    Invalid,
}

/// Label reserved for leaving the menu.
pub const EXIT_LABEL: i64 = Operation::ALL.len() as i64 + 1;

pub fn select(choice: i64) -> Selection {
    if choice == EXIT_LABEL {
        return Selection::Exit;
    }
    let index = choice.checked_sub(1).and_then(|i| usize::try_from(i).ok());
    match index.and_then(|i| Operation::ALL.get(i)) {
        Some(&op) => Selection::Run(op),
        None => Selection::Invalid,
    }
}

fn show_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<(), ProductError> {
    console.say("=========Gerenciamento de Produtos==============")?;
    console.say("Selecione uma opção: ")?;
    for (i, op) in Operation::ALL.iter().enumerate() {
        console.say(format!("{} - {}", i + 1, op.description()))?;
    }
    console.say(format!("{} - Sair do sistema.", EXIT_LABEL))
}

/// Runs the menu until the exit label is chosen or input ends.
///
/// # Errors
/// A selection or numeric field that does not parse ends the loop with
/// [`ProductError::InvalidInput`]; backend failures never do.
#[instrument(name = "menu", skip_all)]
pub async fn run<C, R, W>(console: &mut Console<R, W>, connector: &C) -> Result<(), ProductError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    info!("Menu starting");
    loop {
        show_menu(console)?;
        let Some(line) = console.read_line()? else {
            debug!("Input closed");
            break;
        };
        let choice: i64 = parse_field(&line, "menu option")?;

        match select(choice) {
            Selection::Run(op) => {
                debug!(operation = ?op, "Dispatching");
                op.run(console, connector).await?;
            }
            Selection::Exit => {
                console.say("Saindo do sistema...")?;
                break;
            }
            Selection::Invalid => {
                debug!(choice, "Invalid option");
                console.say("Opção inválida")?;
            }
        }
    }
    info!("Menu stopped");
    Ok(())
}
