//! Media transcoding via ffmpeg.
//!
//! Thin wrappers around the external engine for the three operations the
//! pipeline needs: audio extraction, subtitle burn-in, and caption dialect
//! conversion. Every invocation is one-shot; a non-zero exit maps to
//! [`TekstError::Transcode`].

use crate::error::{Result, TekstError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Extract the audio track as a mono 16 kHz 16-bit PCM waveform.
#[instrument(skip_all, fields(video = %video_path.display()))]
pub async fn extract_audio(video_path: &Path, audio_path: &Path) -> Result<()> {
    if let Some(parent) = audio_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    debug!("Extracting audio to {}", audio_path.display());

    let result = Command::new("ffmpeg")
        .arg("-i").arg(video_path)
        .arg("-vn")
        .arg("-acodec").arg("pcm_s16le")
        .arg("-ar").arg("16000")
        .arg("-ac").arg("1")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(audio_path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    check_ffmpeg_result(result, audio_path, "audio extraction")?;
    info!("Audio extraction complete");
    Ok(())
}

/// Re-encode video with the caption file hard-baked into the picture.
///
/// If a font file is given it is embedded as an attachment and the subtitle
/// filter's font directory is overridden so renderers resolve the custom
/// glyph set.
#[instrument(skip_all, fields(video = %video_path.display()))]
pub async fn burn_subtitles(
    video_path: &Path,
    caption_path: &Path,
    output_path: &Path,
    font_file: Option<&Path>,
) -> Result<()> {
    if !caption_path.exists() {
        return Err(TekstError::Transcode(format!(
            "Caption file not found: {}",
            caption_path.display()
        )));
    }

    if let Ok(fps) = probe_frame_rate(video_path).await {
        debug!("Source frame rate: {:.3} fps", fps);
    }

    let mut filter = format!("subtitles='{}'", escape_filter_path(caption_path));
    if let Some(font) = font_file {
        if let Some(font_dir) = font.parent() {
            filter.push_str(&format!(":fontsdir='{}'", escape_filter_path(font_dir)));
        }
    }

    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-i").arg(video_path);

    if let Some(font) = font_file {
        cmd.arg("-attach").arg(font);
        cmd.arg("-metadata:s:t").arg("mimetype=application/x-truetype-font");
    }

    cmd.arg("-vf").arg(&filter)
        .arg("-c:v").arg("libx264")
        .arg("-preset").arg("fast")
        .arg("-crf").arg("18")
        .arg("-c:a").arg("copy")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(output_path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let result = cmd.output().await;
    check_ffmpeg_result(result, output_path, "subtitle burn-in")?;
    info!("Subtitles burned into {}", output_path.display());
    Ok(())
}

/// Convert a caption file to the ASS dialect by remuxing through ffmpeg.
///
/// Returns the path of the converted file, named after the input's stem.
#[instrument(skip_all, fields(input = %caption_path.display()))]
pub async fn convert_captions(caption_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let stem = caption_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            TekstError::InvalidInput(format!("Bad caption path: {}", caption_path.display()))
        })?;
    let output_path = output_dir.join(format!("{}.ass", stem));

    let result = Command::new("ffmpeg")
        .arg("-i").arg(caption_path)
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(&output_path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    check_ffmpeg_result(result, &output_path, "caption conversion")?;
    info!("Converted captions to {}", output_path.display());
    Ok(output_path)
}

/// Query the frame rate of the first video stream using ffprobe.
///
/// ffprobe reports `r_frame_rate` as a fraction string such as `30000/1001`;
/// the numerator and denominator are parsed explicitly rather than handing
/// the expression to any evaluator.
pub async fn probe_frame_rate(video_path: &Path) -> Result<f64> {
    let result = Command::new("ffprobe")
        .arg("-v").arg("quiet")
        .arg("-print_format").arg("json")
        .arg("-show_streams")
        .arg("-select_streams").arg("v:0")
        .arg(video_path)
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TekstError::ToolNotFound("ffprobe".into()));
        }
        Err(e) => {
            return Err(TekstError::Transcode(format!("ffprobe failed: {e}")));
        }
    };

    if !output.status.success() {
        return Err(TekstError::Transcode("ffprobe returned error".into()));
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&json_str)?;

    let rate = parsed["streams"][0]["r_frame_rate"]
        .as_str()
        .ok_or_else(|| TekstError::Transcode("No frame rate in ffprobe output".into()))?;

    parse_frame_rate(rate)
}

/// Parse a `num/den` fraction string into frames per second.
fn parse_frame_rate(rate: &str) -> Result<f64> {
    let (num, den) = match rate.split_once('/') {
        Some((n, d)) => (n, d),
        None => (rate, "1"),
    };

    let num: u64 = num
        .trim()
        .parse()
        .map_err(|_| TekstError::Transcode(format!("Bad frame rate: {rate}")))?;
    let den: u64 = den
        .trim()
        .parse()
        .map_err(|_| TekstError::Transcode(format!("Bad frame rate: {rate}")))?;

    if den == 0 {
        return Err(TekstError::Transcode(format!("Bad frame rate: {rate}")));
    }

    Ok(num as f64 / den as f64)
}

/// Escape a path for use inside an ffmpeg filter argument.
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
}

fn check_ffmpeg_result(
    result: std::io::Result<std::process::Output>,
    expected_output: &Path,
    operation: &str,
) -> Result<()> {
    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TekstError::ToolNotFound("ffmpeg".into()));
        }
        Err(e) => {
            return Err(TekstError::Transcode(format!("ffmpeg {operation} failed: {e}")));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TekstError::Transcode(format!(
            "ffmpeg {operation} failed: {}",
            stderr.trim()
        )));
    }

    if !expected_output.exists() {
        return Err(TekstError::Transcode(format!(
            "ffmpeg {operation} produced no output at {}",
            expected_output.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate_fraction() {
        assert_eq!(parse_frame_rate("30/1").unwrap(), 30.0);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert_eq!(parse_frame_rate("24").unwrap(), 24.0);
    }

    #[test]
    fn test_parse_frame_rate_rejects_garbage() {
        assert!(parse_frame_rate("abc/def").is_err());
        assert!(parse_frame_rate("30/0").is_err());
        assert!(parse_frame_rate("1+1").is_err());
    }

    #[test]
    fn test_escape_filter_path() {
        assert_eq!(
            escape_filter_path(Path::new("/tmp/it's here.ass")),
            "/tmp/it\\'s here.ass"
        );
        assert_eq!(
            escape_filter_path(Path::new("plain/path.ass")),
            "plain/path.ass"
        );
    }

    #[tokio::test]
    async fn test_burn_requires_readable_caption_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.ass");
        let video = tmp.path().join("video.mp4");
        let output = tmp.path().join("out.mkv");

        let err = burn_subtitles(&video, &missing, &output, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TekstError::Transcode(_)));
    }
}
