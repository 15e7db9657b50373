use clap::{Parser, Subcommand};
use introgate_common::{ItemId, UserId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "introgate")]
#[command(author, version, about = "Library-scoped intro provider for media servers")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// List movie libraries in a catalog and whether intros apply to them
    Libraries {
        /// JSON catalog describing libraries and items
        #[arg(long, required = true)]
        catalog: PathBuf,
    },

    /// Decide which intros an item would get
    Decide {
        /// JSON catalog describing libraries and items
        #[arg(long, required = true)]
        catalog: PathBuf,

        /// ID of the item to play
        #[arg(long, required = true)]
        item: ItemId,

        /// ID of the requesting user (random if not specified)
        #[arg(long)]
        user: Option<UserId>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}
