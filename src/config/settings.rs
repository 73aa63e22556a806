//! Configuration settings for Tekst.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcription: TranscriptionSettings,
    pub captions: CaptionSettings,
    pub server: ServerSettings,
    /// Subtitle style catalog, keyed by style token.
    pub styles: HashMap<String, StyleSettings>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for uploads and rendered artifacts.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.tekst".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Transcription service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Whisper model to use.
    pub model: String,
    /// Language hint passed to the API (ISO 639-1), if any.
    pub language: Option<String>,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
            language: None,
        }
    }
}

/// Caption cue generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionSettings {
    /// Merge adjacent segments separated by at most this many seconds.
    pub merge_gap_seconds: f64,
    /// Whether to merge adjacent segments before splitting.
    pub merge_segments: bool,
    /// Whether to split segments into sentence-level phrases by word timing.
    pub split_words: bool,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            merge_gap_seconds: 1.0,
            merge_segments: false,
            split_words: true,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Public base URL used when building artifact links (e.g. behind a proxy).
    pub public_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_url: None,
        }
    }
}

/// A single subtitle style entry in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Font family name as referenced by the subtitle renderer.
    pub font_family: String,
    /// Font size in points.
    pub font_size: u32,
    /// Primary text colour as `#RRGGBB`.
    pub font_color: String,
    /// Font weight (ASS convention: 0 = regular, 1/-1 = bold).
    pub font_weight: i32,
    /// Optional font file to attach and reference when burning subtitles.
    pub font_file: Option<String>,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 20,
            font_color: "#FFFFFF".to_string(),
            font_weight: 0,
            font_file: None,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TekstError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tekst")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Directory holding raw video uploads.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir().join("uploads")
    }

    /// Directory holding extracted audio tracks.
    pub fn audio_dir(&self) -> PathBuf {
        self.uploads_dir().join("audio")
    }

    /// Directory holding rendered caption files.
    pub fn captions_dir(&self) -> PathBuf {
        self.uploads_dir().join("captions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.transcription.model, "whisper-1");
        assert_eq!(settings.captions.merge_gap_seconds, 1.0);
        assert!(settings.captions.split_words);
        assert!(settings.styles.is_empty());
    }

    #[test]
    fn test_artifact_dirs_nest_under_uploads() {
        let settings = Settings {
            general: GeneralSettings {
                data_dir: "/srv/tekst".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(settings.uploads_dir(), PathBuf::from("/srv/tekst/uploads"));
        assert_eq!(
            settings.audio_dir(),
            PathBuf::from("/srv/tekst/uploads/audio")
        );
        assert_eq!(
            settings.captions_dir(),
            PathBuf::from("/srv/tekst/uploads/captions")
        );
    }

    #[test]
    fn test_parse_style_section() {
        let toml_str = r##"
            [styles.ella]
            font_family = "Ella"
            font_size = 20
            font_color = "#FF0000"
            font_weight = 1
            font_file = "fonts/Ella.otf"
        "##;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        let style = settings.styles.get("ella").unwrap();
        assert_eq!(style.font_family, "Ella");
        assert_eq!(style.font_color, "#FF0000");
        assert_eq!(style.font_file.as_deref(), Some("fonts/Ella.otf"));
    }
}
