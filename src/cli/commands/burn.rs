//! Burn command implementation.

use crate::captions::Phrase;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Run the burn command.
pub async fn run_burn(video: &str, phrases_file: &str, style: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Burn) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tekst doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let content = std::fs::read_to_string(phrases_file)?;
    let phrases: Vec<Phrase> = serde_json::from_str(&content)?;

    if phrases.is_empty() {
        Output::warning("Phrase list is empty; the output will carry no visible subtitles");
    }

    let pipeline = Pipeline::new(settings)?;

    // Accept either a stored media ID or a direct path
    let video_path: PathBuf = if Path::new(video).exists() {
        PathBuf::from(video)
    } else {
        pipeline.find_upload(video)?
    };

    let media_id = video_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("video")
        .to_string();

    Output::info(&format!(
        "Burning {} phrases into {}",
        phrases.len(),
        video_path.display()
    ));

    let spinner = Output::spinner("Re-encoding...");
    let result = pipeline
        .burn_phrases(&video_path, &phrases, style, &media_id)
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(output) => {
            Output::success("Subtitles burned successfully");
            Output::kv("Output", &output.display().to_string());
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to burn subtitles: {}", e));
            Err(e.into())
        }
    }
}
