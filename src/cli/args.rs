// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// A personal bookmark manager for the terminal
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import bookmarks from a browser or Pocket export
    Import {
        #[command(subcommand)]
        source: ImportSource,
    },
    /// Refetch title, description and image for stored bookmarks
    Refresh {
        /// list of ids, separated by comma, no blanks
        ids: String,
    },
    /// Fetch a bookmark image through the cache
    Image {
        /// image URL to fetch
        url: String,

        #[arg(long = "item-id", help = "bookmark id owning the cache entry")]
        item_id: Option<i32>,

        #[arg(
            short = 'o',
            long = "output",
            value_name = "FILE",
            help = "write the image to FILE instead of stdout"
        )]
        output: Option<PathBuf>,
    },
    /// Tag maintenance
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// List stored tags
    Tags,
    /// Initialize bookmark database
    CreateDb {
        /// pathname to database file
        path: String,
    },
}

#[derive(Subcommand)]
pub enum ImportSource {
    /// Netscape bookmark file exported by a browser
    Html {
        /// pathname to the exported HTML file
        file: PathBuf,
    },
    /// Pocket export, as a ZIP archive or an already extracted directory
    Pocket {
        /// pathname to the archive or directory
        archive: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum TagAction {
    /// Create a tag path and print the leaf tag id
    Add {
        /// tag title; `/` nests levels, `\/` is a literal slash
        title: String,
    },
}
