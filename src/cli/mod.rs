//! CLI module for Tekst.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tekst - Video Captioning
///
/// Generates timed captions for video files with Whisper and burns them in
/// with ffmpeg. The name "Tekst" comes from the Norwegian word for subtitles
/// ("teksting").
#[derive(Parser, Debug)]
#[command(name = "tekst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe a video and generate caption files
    Caption {
        /// Path to the video file
        video: String,

        /// Style token for a styled subtitle track (also enables ASS output)
        #[arg(short, long)]
        style: Option<String>,

        /// Burn the captions into the video
        #[arg(short, long)]
        burn: bool,

        /// Merge adjacent segments separated by at most this many seconds
        #[arg(long)]
        merge_gap: Option<f64>,

        /// Keep whole segments instead of splitting into sentence phrases
        #[arg(long)]
        no_split: bool,
    },

    /// Burn a caption phrase list into a previously uploaded video
    Burn {
        /// Media ID of a stored upload, or a path to a video file
        video: String,

        /// JSON file containing the phrase list ([{start, end, text}, ...])
        phrases: String,

        /// Style token for the subtitle track
        #[arg(short, long)]
        style: String,
    },

    /// Convert a caption file to the ASS dialect
    Convert {
        /// Path to the input caption file
        input: String,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides configuration)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
