//! Caption command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{CaptionOptions, Pipeline};
use anyhow::Result;
use std::path::Path;

/// Run the caption command.
pub async fn run_caption(
    video: &str,
    style: Option<String>,
    burn: bool,
    merge_gap: Option<f64>,
    no_split: bool,
    mut settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Caption) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tekst doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let video_path = Path::new(video);
    if !video_path.exists() {
        Output::error(&format!("Video file not found: {}", video));
        return Err(anyhow::anyhow!("Video file not found: {}", video));
    }

    // Command-line flags override the configured cue derivation
    if let Some(gap) = merge_gap {
        settings.captions.merge_segments = true;
        settings.captions.merge_gap_seconds = gap;
    }
    if no_split {
        settings.captions.split_words = false;
    }

    let media_id = video_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("video")
        .to_string();

    Output::info(&format!("Captioning: {}", video));

    let pipeline = Pipeline::new(settings)?;
    let options = CaptionOptions { style, burn };

    let spinner = Output::spinner("Processing...");
    let result = pipeline.caption_video(video_path, &media_id, &options).await;
    spinner.finish_and_clear();

    match result {
        Ok(result) => {
            Output::success(&format!(
                "Generated {} caption phrases from {:.1}s of audio",
                result.phrase_count, result.duration_seconds
            ));
            Output::kv("Transcript", &result.transcript_path.display().to_string());
            Output::kv("Captions", &result.vtt_path.display().to_string());
            if let Some(ass) = &result.ass_path {
                Output::kv("Styled track", &ass.display().to_string());
            }
            if let Some(video) = &result.video_path {
                Output::kv("Burned video", &video.display().to_string());
            }
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to caption video: {}", e));
            Err(e.into())
        }
    }
}
