//! Configuration module for Tekst.
//!
//! Handles loading and managing application settings and the style catalog.

mod settings;

pub use settings::{
    CaptionSettings, GeneralSettings, ServerSettings, Settings, StyleSettings,
    TranscriptionSettings,
};
