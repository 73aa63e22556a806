//! HTTP API server for the captioning pipeline.
//!
//! Exposes the two pipeline operations over REST: caption an uploaded video,
//! and burn a supplied phrase list into a stored video. Rendered artifacts
//! are served back under `/uploads`.

use crate::captions::Phrase;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::TekstError;
use crate::pipeline::{CaptionOptions, Pipeline};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::error;
use uuid::Uuid;

/// Uploads are capped at 512 MiB.
const MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

/// Shared application state.
struct AppState {
    pipeline: Pipeline,
    settings: Settings,
}

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let pipeline = Pipeline::new(settings.clone())?;
    let uploads_dir = settings.uploads_dir();

    let state = Arc::new(AppState { pipeline, settings });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/caption", post(caption))
        .route("/burn", post(burn))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tekst API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Caption", "POST /caption (multipart: video, style?, burn?)");
    Output::kv("Burn", "POST /burn (json: media_id, phrases, style)");
    Output::kv("Artifacts", "GET  /uploads/...");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Serialize)]
struct CaptionResponse {
    success: bool,
    message: String,
    media_id: String,
    duration_seconds: f64,
    video_url: String,
    transcript_url: String,
    captions_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    styled_captions_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_video_url: Option<String>,
}

#[derive(Deserialize)]
struct BurnRequest {
    /// Media ID of a previously uploaded video.
    media_id: String,
    /// Caption phrases to burn in.
    phrases: Vec<Phrase>,
    /// Style token from the catalog.
    style: String,
}

#[derive(Serialize)]
struct BurnResponse {
    success: bool,
    message: String,
    video_url: String,
}

#[derive(Serialize)]
struct FailureResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn failure(status: StatusCode, message: &str, detail: Option<String>) -> axum::response::Response {
    (
        status,
        Json(FailureResponse {
            success: false,
            message: message.to_string(),
            error: detail,
        }),
    )
        .into_response()
}

fn failure_for(err: &TekstError, message: &str) -> axum::response::Response {
    let status = match err {
        TekstError::UploadMissing | TekstError::UnknownStyle(_) | TekstError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    failure(status, message, Some(err.to_string()))
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn caption(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> axum::response::Response {
    let upload = match read_upload(multipart, &state.settings).await {
        Ok(u) => u,
        Err(e) => {
            return failure_for(&e, "Failed to read upload");
        }
    };

    let options = CaptionOptions {
        style: upload.style.clone(),
        burn: upload.burn,
    };

    match state
        .pipeline
        .caption_video(&upload.video_path, &upload.media_id, &options)
        .await
    {
        Ok(result) => Json(CaptionResponse {
            success: true,
            message: "Video processed successfully".to_string(),
            media_id: result.media_id,
            duration_seconds: result.duration_seconds,
            video_url: artifact_url(&state.settings, &upload.video_path),
            transcript_url: artifact_url(&state.settings, &result.transcript_path),
            captions_url: artifact_url(&state.settings, &result.vtt_path),
            styled_captions_url: result.ass_path.map(|p| artifact_url(&state.settings, &p)),
            output_video_url: result.video_path.map(|p| artifact_url(&state.settings, &p)),
        })
        .into_response(),
        Err(e) => {
            error!("Captioning failed for {}: {}", upload.media_id, e);
            failure_for(&e, "Failed to process video")
        }
    }
}

async fn burn(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BurnRequest>,
) -> axum::response::Response {
    let video_path = match state.pipeline.find_upload(&req.media_id) {
        Ok(path) => path,
        Err(e) => {
            return failure_for(&e, "Video not found");
        }
    };

    match state
        .pipeline
        .burn_phrases(&video_path, &req.phrases, &req.style, &req.media_id)
        .await
    {
        Ok(output) => Json(BurnResponse {
            success: true,
            message: "Video processed successfully".to_string(),
            video_url: artifact_url(&state.settings, &output),
        })
        .into_response(),
        Err(e) => {
            error!("Burn failed for {}: {}", req.media_id, e);
            failure_for(&e, "Failed to burn subtitles")
        }
    }
}

// === Helpers ===

struct Upload {
    media_id: String,
    video_path: PathBuf,
    style: Option<String>,
    burn: bool,
}

/// Read the multipart request, storing the video under a fresh UUID so
/// concurrent requests never collide in the shared uploads directory.
async fn read_upload(
    mut multipart: Multipart,
    settings: &Settings,
) -> crate::error::Result<Upload> {
    let mut video: Option<(String, Vec<u8>)> = None;
    let mut style: Option<String> = None;
    let mut burn = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| TekstError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("video") => {
                let file_name = field.file_name().unwrap_or("upload.mp4").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| TekstError::InvalidInput(format!("Failed to read upload: {}", e)))?;
                video = Some((file_name, bytes.to_vec()));
            }
            Some("style") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| TekstError::InvalidInput(format!("Bad style field: {}", e)))?;
                if !value.is_empty() {
                    style = Some(value);
                }
            }
            Some("burn") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| TekstError::InvalidInput(format!("Bad burn field: {}", e)))?;
                burn = value == "true" || value == "1";
            }
            _ => {}
        }
    }

    let (file_name, bytes) = video.ok_or(TekstError::UploadMissing)?;

    let ext = Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp4");
    let media_id = Uuid::new_v4().to_string();
    let video_path = settings.uploads_dir().join(format!("{}.{}", media_id, ext));

    tokio::fs::write(&video_path, &bytes).await?;

    Ok(Upload {
        media_id,
        video_path,
        style,
        burn,
    })
}

/// Build the public URL for an artifact under the uploads directory.
fn artifact_url(settings: &Settings, path: &Path) -> String {
    let relative = path
        .strip_prefix(settings.uploads_dir())
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string());

    let base = settings.server.public_url.as_deref().unwrap_or("");
    format!("{}/uploads/{}", base.trim_end_matches('/'), relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneralSettings, ServerSettings};

    #[test]
    fn test_artifact_url_relative_and_prefixed() {
        let mut settings = Settings::default();
        settings.general = GeneralSettings {
            data_dir: "/srv/tekst".to_string(),
            ..Default::default()
        };

        let path = PathBuf::from("/srv/tekst/uploads/captions/abc.vtt");
        assert_eq!(artifact_url(&settings, &path), "/uploads/captions/abc.vtt");

        settings.server = ServerSettings {
            public_url: Some("https://example.com/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            artifact_url(&settings, &path),
            "https://example.com/uploads/captions/abc.vtt"
        );
    }
}
