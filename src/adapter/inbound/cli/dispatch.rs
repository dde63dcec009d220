//! Subcommand dispatch.

use super::command::Commands;
use super::{contexts, describe, exec, list, versions, watch};
use crate::error::Result;
use crate::infrastructure::Session;

/// Run one parsed subcommand against a ready session.
pub async fn run(session: &Session, command: Commands) -> Result<()> {
    match command {
        Commands::List(args) => list::execute(session, args).await,
        Commands::Versions(args) => versions::execute(session, args).await,
        Commands::Exec(args) => exec::execute(session, args).await,
        Commands::Describe(args) => describe::execute(session, args).await,
        Commands::Contexts(command) => contexts::execute(session, command),
        Commands::Watch(args) => watch::execute(session, args).await,
    }
}
