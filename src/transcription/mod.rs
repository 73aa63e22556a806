//! Transcription module for Tekst.
//!
//! Speech-to-text via the OpenAI Whisper API. The transcriber is behind a
//! trait so the pipeline can be exercised with fakes in tests.

mod models;
mod whisper;

pub use models::{Segment, Transcript};
pub use whisper::{is_api_key_configured, WhisperTranscriber};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file and return segments with timestamps.
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript>;
}
