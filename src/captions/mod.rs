//! Caption cue generation and rendering.
//!
//! Turns timed transcript segments into caption phrases and renders them in
//! the two supported dialects:
//!
//! - **WebVTT**: plain text cue blocks, used as the primary caption artifact.
//! - **ASS**: styled subtitle track, used for burning subtitles into video.

mod ass;
mod phrase;
mod timecode;
mod vtt;

pub use ass::render_ass;
pub use phrase::{derive_phrases, merge_segments, normalize_segments, split_phrase, Phrase};
pub use timecode::{format_ass_timestamp, format_vtt_timestamp};
pub use vtt::render_vtt;
