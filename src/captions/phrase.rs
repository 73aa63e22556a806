//! Phrase derivation from transcript segments.
//!
//! A `Phrase` is one timed caption cue. Segments map to phrases either
//! one-to-one (with text cleanup), merged across small gaps, or split into
//! sentence-level sub-phrases by allocating the segment's time span uniformly
//! across its words. No acoustic alignment is available upstream, so the
//! uniform partition is the defined policy rather than an approximation.

use crate::transcription::Segment;
use serde::{Deserialize, Serialize};

/// One timed caption cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Cue text, single line.
    pub text: String,
}

impl Phrase {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Collapse embedded line breaks and runs of whitespace into single spaces.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a word closes a sentence-level phrase.
fn ends_sentence(word: &str) -> bool {
    word.ends_with('.') || word.ends_with('?') || word.ends_with('!')
}

/// Map segments one-to-one into phrases, trimming text and collapsing
/// internal line breaks.
pub fn normalize_segments(segments: &[Segment]) -> Vec<Phrase> {
    segments
        .iter()
        .map(|s| Phrase::new(s.start, s.end, clean_text(&s.text)))
        .collect()
}

/// Merge adjacent segments separated by at most `gap_seconds` into one phrase.
///
/// Walks segments in order with a running accumulator; given ordered,
/// non-overlapping input the output is non-overlapping by construction.
pub fn merge_segments(segments: &[Segment], gap_seconds: f64) -> Vec<Phrase> {
    let mut phrases: Vec<Phrase> = Vec::new();
    let mut current: Option<Phrase> = None;

    for segment in segments {
        let text = clean_text(&segment.text);

        current = Some(match current.take() {
            Some(mut acc) if segment.start - acc.end <= gap_seconds => {
                acc.end = segment.end;
                if !text.is_empty() {
                    if !acc.text.is_empty() {
                        acc.text.push(' ');
                    }
                    acc.text.push_str(&text);
                }
                acc
            }
            Some(acc) => {
                phrases.push(acc);
                Phrase::new(segment.start, segment.end, text)
            }
            None => Phrase::new(segment.start, segment.end, text),
        });
    }

    if let Some(acc) = current {
        phrases.push(acc);
    }

    phrases
}

/// Split one phrase into sentence-level sub-phrases covering the same span.
///
/// The phrase duration is partitioned equally across its words. Words
/// accumulate into a buffer that closes on sentence-ending punctuation or at
/// the last word; each closed sub-phrase ends at
/// `start + (index + 1) * word_duration` and the next one starts exactly
/// there, so the output has no gaps or overlaps within the span.
pub fn split_phrase(phrase: &Phrase) -> Vec<Phrase> {
    let words: Vec<&str> = phrase.text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let word_duration = (phrase.end - phrase.start) / words.len() as f64;

    let mut output = Vec::new();
    let mut buffer = String::new();
    let mut phrase_start = phrase.start;

    for (i, word) in words.iter().enumerate() {
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(word);

        let is_last = i == words.len() - 1;
        if ends_sentence(word) || is_last {
            let phrase_end = phrase.start + (i + 1) as f64 * word_duration;
            output.push(Phrase::new(
                phrase_start,
                phrase_end,
                std::mem::take(&mut buffer),
            ));
            phrase_start = phrase_end;
        }
    }

    output
}

/// Derive caption phrases from raw transcript segments.
///
/// `merge_gap` enables the segment merge pass; `split_words` enables the
/// sentence-level split pass. With both disabled this is the identity
/// mapping plus text cleanup.
pub fn derive_phrases(
    segments: &[Segment],
    merge_gap: Option<f64>,
    split_words: bool,
) -> Vec<Phrase> {
    let normalized = match merge_gap {
        Some(gap) => merge_segments(segments, gap),
        None => normalize_segments(segments),
    };

    if !split_words {
        return normalized;
    }

    normalized.iter().flat_map(split_phrase).collect()
}
