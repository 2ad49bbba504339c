//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use registry_sync::util::ColorChoice;

/// Keep component registry manifests in sync with the component source
#[derive(Parser)]
#[command(name = "registry-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Registry root that configured paths are relative to
    #[arg(long, env = "REGISTRY_SYNC_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (defaults to registry-sync.toml in the root)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for messages
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}
