//! CLI definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Promptwire CLI.
#[derive(Parser)]
#[command(name = "promptwire")]
#[command(about = "Command-template driven LLM relay")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a request described by a command template or preset
    Send(SendArgs),
    /// List available presets
    Presets {
        /// Preset file path (defaults to the user config dir)
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[derive(Args)]
pub struct SendArgs {
    /// Curl-style command template
    #[arg(long, conflicts_with = "preset")]
    pub curl: Option<String>,

    /// Named preset from the preset file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Message substituted for the $message$ placeholder
    #[arg(short, long)]
    pub message: Option<String>,

    /// Pre-built JSON payload for deferred-schema templates
    #[arg(long, conflicts_with = "message")]
    pub data: Option<String>,

    /// Read the pre-built JSON payload from a file
    #[arg(long, conflicts_with_all = ["message", "data"])]
    pub data_file: Option<PathBuf>,

    /// Consume the response as a stream
    #[arg(long)]
    pub stream: bool,

    /// Path expression projecting displayable content,
    /// e.g. choices[0].message.content
    #[arg(long)]
    pub path: Option<String>,

    /// Print raw response/event JSON instead of projecting
    #[arg(long)]
    pub raw: bool,

    /// Preset file path (defaults to the user config dir)
    #[arg(short, long)]
    pub config: Option<String>,
}
