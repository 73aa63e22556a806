//! Tekst - Video Captioning
//!
//! A CLI tool and HTTP service for generating and burning video subtitles.
//!
//! The name "Tekst" comes from the Norwegian word for subtitling ("teksting").
//!
//! # Overview
//!
//! Tekst allows you to:
//! - Extract the audio track from a video and transcribe it with Whisper
//! - Turn transcript segments into well-timed caption cues
//! - Render captions as WebVTT and styled ASS subtitle tracks
//! - Burn subtitles into the video with ffmpeg, with custom fonts
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management and the style catalog settings
//! - `styles` - Resolved subtitle style catalog
//! - `transcription` - Speech-to-text transcription
//! - `captions` - Cue derivation and WebVTT/ASS rendering
//! - `media` - ffmpeg invocations (extract, burn, convert)
//! - `pipeline` - Per-request pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tekst::config::Settings;
//! use tekst::pipeline::{CaptionOptions, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     let options = CaptionOptions::default();
//!     let result = pipeline
//!         .caption_video(Path::new("talk.mp4"), "talk", &options)
//!         .await?;
//!     println!("Wrote {}", result.vtt_path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod styles;
pub mod transcription;

pub use error::{Result, TekstError};
