use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apidemo")]
#[command(author, version, about = "In-memory event and image resource services")]
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
    /// Record a sample usage event and list every stored event
    Demo {
        /// Additional numbered events to create before listing
        #[arg(long, default_value = "0")]
        extra: usize,

        /// Page size used while listing
        #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
        page_size: i32,
    },

    /// Upload an image and write its generated preview
    Preview {
        /// Source image (JPEG, PNG, or GIF)
        #[arg(required = true)]
        input: PathBuf,

        /// Where to write the PNG preview
        #[arg(required = true)]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
