//! Doctor command: system and configuration diagnostics.

use crate::cli::Output;
use crate::config::Settings;
use crate::styles::StyleCatalog;
use crate::transcription::is_api_key_configured;
use anyhow::Result;
use std::process::Command;

/// Run the doctor command.
pub fn run_doctor(settings: &Settings) -> Result<()> {
    Output::header("Tekst Doctor");

    let mut all_ok = true;

    // External tools
    Output::header("External tools");
    for tool in &["ffmpeg", "ffprobe"] {
        if tool_available(tool) {
            Output::success(&format!("{} found", tool));
        } else {
            Output::error(&format!("{} not found in PATH", tool));
            all_ok = false;
        }
    }

    // API key
    Output::header("Transcription");
    if is_api_key_configured() {
        Output::success("OPENAI_API_KEY is set");
    } else {
        Output::error("OPENAI_API_KEY not set (required for captioning)");
        all_ok = false;
    }
    Output::kv("Model", &settings.transcription.model);

    // Style catalog
    Output::header("Styles");
    match StyleCatalog::from_settings(settings) {
        Ok(catalog) if catalog.is_empty() => {
            Output::warning("No subtitle styles configured (styled output unavailable)");
        }
        Ok(catalog) => {
            Output::success(&format!("{} style(s) configured", catalog.len()));
            for token in catalog.tokens() {
                Output::list_item(token);
            }
        }
        Err(e) => {
            Output::error(&format!("Style catalog invalid: {}", e));
            all_ok = false;
        }
    }

    // Directories
    Output::header("Directories");
    Output::kv("Data", &settings.data_dir().display().to_string());
    Output::kv("Uploads", &settings.uploads_dir().display().to_string());
    Output::kv("Captions", &settings.captions_dir().display().to_string());

    println!();
    if all_ok {
        Output::success("All checks passed");
    } else {
        Output::warning("Some checks failed; see above");
    }

    Ok(())
}

fn tool_available(name: &str) -> bool {
    Command::new(name)
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
