//! Subtitle style catalog.
//!
//! Maps style tokens (presenter/persona names) to structured style records.
//! Unknown tokens fail with an explicit error instead of falling back to an
//! empty style, and font files are validated when the catalog is built.

use crate::config::{Settings, StyleSettings};
use crate::error::{Result, TekstError};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// A resolved subtitle style, applied uniformly to every cue in one render.
#[derive(Debug, Clone)]
pub struct CaptionStyle {
    /// Font family name as referenced by the subtitle renderer.
    pub font_family: String,
    /// Font size in points.
    pub font_size: u32,
    /// Primary text colour as `#RRGGBB`.
    pub font_color: String,
    /// Font weight (ASS convention: 0 = regular, 1/-1 = bold).
    pub font_weight: i32,
    /// Font file to attach when burning, if the style carries one.
    pub font_file: Option<PathBuf>,
}

impl Default for CaptionStyle {
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

/// Catalog of named subtitle styles.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    styles: HashMap<String, CaptionStyle>,
}

impl StyleCatalog {
    /// Build the catalog from settings, validating font files.
    ///
    /// Font file paths are resolved relative to the data directory unless
    /// absolute. A style referencing a missing font file is a configuration
    /// error: it would otherwise fail much later, mid-burn.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let data_dir = settings.data_dir();
        let mut styles = HashMap::new();

        for (token, entry) in &settings.styles {
            let style = Self::resolve(entry, &data_dir);

            if let Some(font_file) = &style.font_file {
                if !font_file.exists() {
                    return Err(TekstError::Config(format!(
                        "Style '{}' references missing font file: {}",
                        token,
                        font_file.display()
                    )));
                }
            }

            debug!("Registered subtitle style '{}'", token);
            styles.insert(token.clone(), style);
        }

        Ok(Self { styles })
    }

    fn resolve(entry: &StyleSettings, data_dir: &std::path::Path) -> CaptionStyle {
        let font_file = entry.font_file.as_ref().map(|f| {
            let expanded = Settings::expand_path(f);
            if expanded.is_absolute() {
                expanded
            } else {
                data_dir.join(expanded)
            }
        });

        CaptionStyle {
            font_family: entry.font_family.clone(),
            font_size: entry.font_size,
            font_color: entry.font_color.clone(),
            font_weight: entry.font_weight,
            font_file,
        }
    }

    /// Look up a style by token.
    pub fn get(&self, token: &str) -> Result<&CaptionStyle> {
        self.styles
            .get(token)
            .ok_or_else(|| TekstError::UnknownStyle(token.to_string()))
    }

    /// List the registered style tokens.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.styles.keys().map(|k| k.as_str()).collect();
        tokens.sort_unstable();
        tokens
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the catalog has no styles.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneralSettings;

    fn settings_with_style(entry: StyleSettings) -> Settings {
        let mut settings = Settings::default();
        settings.styles.insert("ella".to_string(), entry);
        settings
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let catalog = StyleCatalog::from_settings(&Settings::default()).unwrap();
        let err = catalog.get("nope").unwrap_err();
        assert!(matches!(err, TekstError::UnknownStyle(token) if token == "nope"));
    }

    #[test]
    fn test_lookup_registered_style() {
        let settings = settings_with_style(StyleSettings {
            font_family: "Ella".to_string(),
            font_size: 20,
            font_color: "#FF0000".to_string(),
            font_weight: 1,
            font_file: None,
        });

        let catalog = StyleCatalog::from_settings(&settings).unwrap();
        let style = catalog.get("ella").unwrap();
        assert_eq!(style.font_family, "Ella");
        assert_eq!(style.font_weight, 1);
    }

    #[test]
    fn test_missing_font_file_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = settings_with_style(StyleSettings {
            font_file: Some("fonts/does-not-exist.otf".to_string()),
            ..Default::default()
        });
        settings.general = GeneralSettings {
            data_dir: tmp.path().to_string_lossy().to_string(),
            ..Default::default()
        };

        let err = StyleCatalog::from_settings(&settings).unwrap_err();
        assert!(matches!(err, TekstError::Config(_)));
    }

    #[test]
    fn test_font_file_resolved_relative_to_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("fonts")).unwrap();
        std::fs::write(tmp.path().join("fonts/Ella.otf"), b"stub").unwrap();

        let mut settings = settings_with_style(StyleSettings {
            font_file: Some("fonts/Ella.otf".to_string()),
            ..Default::default()
        });
        settings.general = GeneralSettings {
            data_dir: tmp.path().to_string_lossy().to_string(),
            ..Default::default()
        };

        let catalog = StyleCatalog::from_settings(&settings).unwrap();
        let style = catalog.get("ella").unwrap();
        assert_eq!(
            style.font_file.as_deref(),
            Some(tmp.path().join("fonts/Ella.otf").as_path())
        );
    }
}
