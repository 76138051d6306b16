//! CLI parse: clap types for postcraft. No behavior; definitions only.

use crate::sheets::StoreBackend;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// postcraft CLI - LLM-drafted social media posts
#[derive(Parser)]
#[command(name = "postcraft")]
#[command(about = "Generate, review and store social media post drafts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/ is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
        /// Post store backend: google or memory
        #[arg(long)]
        store: Option<StoreBackend>,
    },
    /// Generate one batch of posts and print it
    Generate {
        /// Number of posts (truncated to the batch maximum)
        #[arg(long)]
        count: Option<usize>,
        /// Pin every post to one pillar
        #[arg(long)]
        focus: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Append the batch to the post store
        #[arg(long)]
        save: bool,
        /// Skip the confirmation prompt when saving
        #[arg(long)]
        yes: bool,
    },
    /// List stored posts
    Posts {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the content pillars
    Pillars,
}

impl Commands {
    /// Stable command name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Serve { .. } => "serve",
            Commands::Generate { .. } => "generate",
            Commands::Posts { .. } => "posts",
            Commands::Pillars => "pillars",
        }
    }
}
