// src/cli/tag_commands.rs
use std::fmt::Write;

use crossterm::style::Stylize;
use tracing::instrument;

use crate::cli::error::CliResult;
use crate::infrastructure::di::ServiceContainer;

#[instrument(skip(services), level = "debug")]
pub fn add_tag(services: &ServiceContainer, title: String) -> CliResult<()> {
    let leaf_id = services.tag_service.create_tag_path(&title)?;
    println!("{}", leaf_id);
    Ok(())
}

#[instrument(skip(services), level = "debug")]
pub fn show_tags(services: &ServiceContainer) -> CliResult<()> {
    let tags = services.tag_service.list_tags()?;

    if tags.is_empty() {
        eprintln!("No tags found");
        return Ok(());
    }

    eprintln!("All tags:");
    let mut output = String::new();
    for tag in tags {
        writeln!(
            &mut output,
            "  {} (id: {}, parent: {})",
            tag.title.as_str().green(),
            tag.id,
            tag.parent
        )
        .unwrap();
    }
    print!("{}", output);

    Ok(())
}
