// src/cli/mod.rs
use crate::cli::args::{Cli, Commands, ImportSource, TagAction};
use crate::cli::error::CliResult;
use crate::infrastructure::di::ServiceContainer;

pub mod args;
pub mod db_commands;
pub mod error;
pub mod import_commands;
pub mod item_commands;
pub mod tag_commands;

/// Dispatch a parsed command against the wired services. `create-db` is
/// normally routed in main before the container exists and only falls
/// through to its arm here when a database is already present.
pub fn execute_command(services: ServiceContainer, cli: Cli) -> CliResult<()> {
    match cli.command {
        Some(Commands::Import { source }) => match source {
            ImportSource::Html { file } => import_commands::import_html(&services, &file),
            ImportSource::Pocket { archive } => {
                import_commands::import_pocket(&services, &archive)
            }
        },
        Some(Commands::Refresh { ids }) => item_commands::refresh(&services, ids),
        Some(Commands::Image {
            url,
            item_id,
            output,
        }) => item_commands::image(&services, url, item_id, output),
        Some(Commands::Tag { action }) => match action {
            TagAction::Add { title } => tag_commands::add_tag(&services, title),
        },
        Some(Commands::Tags) => tag_commands::show_tags(&services),
        Some(Commands::CreateDb { path }) => db_commands::create_db(&path),
        None => Ok(()),
    }
}
