//! Captioning pipeline for Tekst.
//!
//! Coordinates one request end to end: extract audio, transcribe, derive
//! caption phrases, render caption files, and optionally burn them into the
//! video. Each invocation is an independent sequential pipeline; concurrent
//! requests only share the artifact directories, and every artifact is named
//! after the request's media ID so they never collide.

use crate::captions::{derive_phrases, render_ass, render_vtt, Phrase};
use crate::config::Settings;
use crate::error::{Result, TekstError};
use crate::media;
use crate::styles::StyleCatalog;
use crate::transcription::{Transcriber, Transcript, WhisperTranscriber};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Options for one captioning run.
#[derive(Debug, Clone, Default)]
pub struct CaptionOptions {
    /// Style token for the styled subtitle track; no ASS output when absent.
    pub style: Option<String>,
    /// Burn the rendered captions into the video.
    pub burn: bool,
}

/// Result of processing one video.
#[derive(Debug)]
pub struct CaptionResult {
    /// Media ID the artifacts are named after.
    pub media_id: String,
    /// Number of caption phrases produced.
    pub phrase_count: usize,
    /// Transcribed audio length in seconds.
    pub duration_seconds: f64,
    /// Plain-text transcript file.
    pub transcript_path: PathBuf,
    /// Rendered WebVTT caption file.
    pub vtt_path: PathBuf,
    /// Rendered ASS caption file, when a style was requested.
    pub ass_path: Option<PathBuf>,
    /// Burned-in output video, when burning was requested.
    pub video_path: Option<PathBuf>,
}

/// The captioning pipeline.
pub struct Pipeline {
    settings: Settings,
    styles: StyleCatalog,
    transcriber: Arc<dyn Transcriber>,
}

impl Pipeline {
    /// Create a pipeline from settings, wiring up the Whisper transcriber.
    pub fn new(settings: Settings) -> Result<Self> {
        let transcriber: Arc<dyn Transcriber> = Arc::new(WhisperTranscriber::with_config(
            &settings.transcription.model,
            settings.transcription.language.as_deref(),
        ));

        Self::with_components(settings, transcriber)
    }

    /// Create a pipeline with a custom transcriber (used by tests).
    pub fn with_components(settings: Settings, transcriber: Arc<dyn Transcriber>) -> Result<Self> {
        let styles = StyleCatalog::from_settings(&settings)?;

        std::fs::create_dir_all(settings.uploads_dir())?;
        std::fs::create_dir_all(settings.audio_dir())?;
        std::fs::create_dir_all(settings.captions_dir())?;

        Ok(Self {
            settings,
            styles,
            transcriber,
        })
    }

    /// Get the style catalog.
    pub fn styles(&self) -> &StyleCatalog {
        &self.styles
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Caption a video: extract audio, transcribe, render caption files, and
    /// optionally burn them in.
    #[instrument(skip(self, options), fields(media_id = %media_id))]
    pub async fn caption_video(
        &self,
        video_path: &Path,
        media_id: &str,
        options: &CaptionOptions,
    ) -> Result<CaptionResult> {
        // Resolve the style up front so a bad token fails before any
        // transcoding or API spend.
        let style = options
            .style
            .as_deref()
            .map(|token| self.styles.get(token))
            .transpose()?
            .cloned();

        info!("Extracting audio");
        let audio_path = self.settings.audio_dir().join(format!("{}.wav", media_id));
        media::extract_audio(video_path, &audio_path).await?;

        info!("Transcribing audio");
        let transcript = self.transcriber.transcribe(&audio_path).await?;
        info!(
            "Transcription complete ({} segments, {:.1}s)",
            transcript.segments.len(),
            transcript.duration_seconds
        );

        let transcript_path = self.write_transcript(&transcript, media_id)?;
        let phrases = self.phrases_from_transcript(&transcript);
        if phrases.is_empty() {
            warn!("Transcript produced no caption phrases");
        }

        let vtt_path = self.settings.captions_dir().join(format!("{}.vtt", media_id));
        std::fs::write(&vtt_path, render_vtt(&phrases))?;
        info!("Wrote captions to {}", vtt_path.display());

        let ass_path = match &style {
            Some(style) => {
                let path = self.settings.captions_dir().join(format!("{}.ass", media_id));
                std::fs::write(&path, render_ass(&phrases, style)?)?;
                Some(path)
            }
            None => None,
        };

        let video_out = if options.burn {
            let caption_file = ass_path.as_deref().unwrap_or(&vtt_path);
            let font_file = style.as_ref().and_then(|s| s.font_file.clone());
            let output = self
                .settings
                .uploads_dir()
                .join(format!("{}_with_captions.mkv", media_id));

            media::burn_subtitles(video_path, caption_file, &output, font_file.as_deref()).await?;
            Some(output)
        } else {
            None
        };

        Ok(CaptionResult {
            media_id: media_id.to_string(),
            phrase_count: phrases.len(),
            duration_seconds: transcript.duration_seconds,
            transcript_path,
            vtt_path,
            ass_path,
            video_path: video_out,
        })
    }

    /// Burn supplied phrases into a stored video using a named style.
    ///
    /// Renders the styled track, writes it to the captions directory, and
    /// re-encodes the video with the subtitles baked in.
    #[instrument(skip(self, phrases), fields(media_id = %media_id))]
    pub async fn burn_phrases(
        &self,
        video_path: &Path,
        phrases: &[Phrase],
        style_token: &str,
        media_id: &str,
    ) -> Result<PathBuf> {
        let ass_path = self.render_styled(phrases, style_token, media_id)?;

        let style = self.styles.get(style_token)?;
        let output = self
            .settings
            .uploads_dir()
            .join(format!("{}_with_captions.mkv", media_id));

        media::burn_subtitles(video_path, &ass_path, &output, style.font_file.as_deref()).await?;
        Ok(output)
    }

    /// Convert a caption file to the ASS dialect via the external engine.
    pub async fn convert_captions(&self, caption_path: &Path) -> Result<PathBuf> {
        media::convert_captions(caption_path, &self.settings.captions_dir()).await
    }

    /// Render a styled caption file for the given phrases.
    ///
    /// The style token is resolved before anything touches the filesystem, so
    /// an unknown token performs no write.
    pub fn render_styled(
        &self,
        phrases: &[Phrase],
        style_token: &str,
        media_id: &str,
    ) -> Result<PathBuf> {
        let style = self.styles.get(style_token)?;
        let content = render_ass(phrases, style)?;

        let path = self.settings.captions_dir().join(format!("{}.ass", media_id));
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Write the plain-text transcript artifact for a media ID.
    fn write_transcript(&self, transcript: &Transcript, media_id: &str) -> Result<PathBuf> {
        let path = self.settings.captions_dir().join(format!("{}.txt", media_id));
        std::fs::write(&path, &transcript.full_text)?;
        Ok(path)
    }

    /// Derive caption phrases from a transcript per the caption settings.
    pub fn phrases_from_transcript(&self, transcript: &Transcript) -> Vec<Phrase> {
        let captions = &self.settings.captions;
        let merge_gap = captions
            .merge_segments
            .then_some(captions.merge_gap_seconds);

        derive_phrases(&transcript.segments, merge_gap, captions.split_words)
    }

    /// Look up the uploaded video for a media ID, trying known extensions.
    pub fn find_upload(&self, media_id: &str) -> Result<PathBuf> {
        for ext in &["mp4", "mkv", "mov", "webm", "avi"] {
            let candidate = self.settings.uploads_dir().join(format!("{}.{}", media_id, ext));
            if candidate.exists() {
                return Ok(candidate);
            }
        }

        Err(TekstError::InvalidInput(format!(
            "No uploaded video found for '{}'",
            media_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CaptionSettings, GeneralSettings};
    use crate::transcription::Segment;
    use async_trait::async_trait;

    struct FakeTranscriber {
        segments: Vec<Segment>,
    }

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        async fn transcribe(&self, _audio_path: &Path) -> Result<Transcript> {
            Ok(Transcript::new("fake".to_string(), self.segments.clone()))
        }
    }

    fn test_pipeline(settings_mut: impl FnOnce(&mut Settings)) -> (Pipeline, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.general = GeneralSettings {
            data_dir: tmp.path().to_string_lossy().to_string(),
            ..Default::default()
        };
        settings_mut(&mut settings);

        let transcriber = Arc::new(FakeTranscriber { segments: vec![] });
        let pipeline = Pipeline::with_components(settings, transcriber).unwrap();
        (pipeline, tmp)
    }

    #[test]
    fn test_phrases_follow_caption_settings() {
        let (pipeline, _tmp) = test_pipeline(|s| {
            s.captions = CaptionSettings {
                merge_segments: true,
                merge_gap_seconds: 1.0,
                split_words: false,
            };
        });

        let transcript = Transcript::new(
            "clip".to_string(),
            vec![
                Segment::new(0.0, 1.0, "a".to_string()),
                Segment::new(1.5, 2.0, "b".to_string()),
            ],
        );

        let phrases = pipeline.phrases_from_transcript(&transcript);
        assert_eq!(phrases, vec![Phrase::new(0.0, 2.0, "a b")]);
    }

    #[test]
    fn test_unknown_style_writes_nothing() {
        let (pipeline, tmp) = test_pipeline(|_| {});

        let phrases = vec![Phrase::new(0.0, 1.0, "hi")];
        let err = pipeline
            .render_styled(&phrases, "nope", "clip01")
            .unwrap_err();

        assert!(matches!(err, TekstError::UnknownStyle(_)));
        assert!(!tmp.path().join("uploads/captions/clip01.ass").exists());
    }

    #[test]
    fn test_render_styled_writes_caption_file() {
        let (pipeline, tmp) = test_pipeline(|s| {
            s.styles
                .insert("plain".to_string(), crate::config::StyleSettings::default());
        });

        let phrases = vec![Phrase::new(0.0, 1.0, "hi")];
        let path = pipeline.render_styled(&phrases, "plain", "clip01").unwrap();

        assert_eq!(path, tmp.path().join("uploads/captions/clip01.ass"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Dialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,hi"));
    }

    #[test]
    fn test_transcript_text_artifact() {
        let (pipeline, tmp) = test_pipeline(|_| {});

        let transcript = Transcript::new(
            "clip03".to_string(),
            vec![
                Segment::new(0.0, 1.0, "hello".to_string()),
                Segment::new(1.0, 2.5, "there".to_string()),
            ],
        );

        let path = pipeline.write_transcript(&transcript, "clip03").unwrap();
        assert_eq!(path, tmp.path().join("uploads/captions/clip03.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello there");
        assert_eq!(transcript.duration_seconds, 2.5);
    }

    #[test]
    fn test_find_upload_requires_existing_file() {
        let (pipeline, tmp) = test_pipeline(|_| {});

        assert!(pipeline.find_upload("ghost").is_err());

        std::fs::write(tmp.path().join("uploads/clip02.mp4"), b"x").unwrap();
        assert_eq!(
            pipeline.find_upload("clip02").unwrap(),
            tmp.path().join("uploads/clip02.mp4")
        );
    }
}
