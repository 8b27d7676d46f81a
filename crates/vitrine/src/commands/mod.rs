//! Command dispatch: bridges CLI args -> catalog store -> output formatting.

pub mod browse;
pub mod categories;
pub mod config_cmd;
pub mod products;
pub mod util;

use vitrine_core::{ProductSource, ProductStore};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch<S: ProductSource>(
    cmd: Command,
    store: &ProductStore<S>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(store, args, global).await,
        Command::Categories => categories::handle(store, global).await,
        Command::Browse(args) => browse::handle(store, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
