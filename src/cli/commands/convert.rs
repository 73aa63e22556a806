//! Convert command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;
use std::path::Path;

/// Run the convert command.
pub async fn run_convert(input: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Convert) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tekst doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let input_path = Path::new(input);
    if !input_path.exists() {
        Output::error(&format!("Caption file not found: {}", input));
        return Err(anyhow::anyhow!("Caption file not found: {}", input));
    }

    let pipeline = Pipeline::new(settings)?;

    match pipeline.convert_captions(input_path).await {
        Ok(output) => {
            Output::success("Conversion complete");
            Output::kv("Output", &output.display().to_string());
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to convert captions: {}", e));
            Err(e.into())
        }
    }
}
