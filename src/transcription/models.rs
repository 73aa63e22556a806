//! Data models for transcription.

use serde::{Deserialize, Serialize};

/// One timed unit of transcribed speech returned by the transcription API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Transcribed text content.
    pub text: String,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: f64, end: f64, text: String) -> Self {
        Self { start, end, text }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A complete transcript with segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Media ID this transcript belongs to.
    pub media_id: String,
    /// Individual transcript segments with timestamps.
    pub segments: Vec<Segment>,
    /// Full transcript text (concatenated segments).
    pub full_text: String,
    /// Total duration in seconds.
    pub duration_seconds: f64,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(media_id: String, segments: Vec<Segment>) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join(" ");

        let duration_seconds = segments.last().map(|s| s.end).unwrap_or(0.0);

        Self {
            media_id,
            segments,
            full_text,
            duration_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_creation() {
        let segments = vec![
            Segment::new(0.0, 5.0, "Hello world".to_string()),
            Segment::new(5.0, 10.0, "This is a test".to_string()),
        ];

        let transcript = Transcript::new("clip01".to_string(), segments);

        assert_eq!(transcript.media_id, "clip01");
        assert_eq!(transcript.full_text, "Hello world This is a test");
        assert_eq!(transcript.duration_seconds, 10.0);
    }

    #[test]
    fn test_segment_duration() {
        let segment = Segment::new(1.5, 4.0, "hi".to_string());
        assert_eq!(segment.duration(), 2.5);
    }
}
