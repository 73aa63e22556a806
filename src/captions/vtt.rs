//! WebVTT caption rendering.

use super::phrase::Phrase;
use super::timecode::format_vtt_timestamp;

/// Render phrases as a WebVTT document.
///
/// Header token followed by timecode-delimited cue blocks, each terminated by
/// a blank line. Cue text is expected to be single-line already (phrases are
/// cleaned upstream); no further escaping is required for plain text cues.
pub fn render_vtt(phrases: &[Phrase]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for phrase in phrases {
        output.push_str(&format!(
            "{} --> {}\n",
            format_vtt_timestamp(phrase.start),
            format_vtt_timestamp(phrase.end)
        ));
        output.push_str(&phrase.text);
        output.push_str("\n\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal VTT parser, used only to check the emitter round-trips.
    fn parse_vtt(content: &str) -> Vec<Phrase> {
        let mut phrases = Vec::new();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("WEBVTT"));

        let mut pending: Option<(f64, f64)> = None;
        let mut text_lines: Vec<&str> = Vec::new();

        for line in lines {
            if let Some((start, end)) = line.split_once(" --> ") {
                pending = Some((parse_timestamp(start), parse_timestamp(end)));
                text_lines.clear();
            } else if line.is_empty() {
                if let Some((start, end)) = pending.take() {
                    phrases.push(Phrase::new(start, end, text_lines.join(" ")));
                }
                text_lines.clear();
            } else {
                text_lines.push(line);
            }
        }

        if let Some((start, end)) = pending {
            phrases.push(Phrase::new(start, end, text_lines.join(" ")));
        }

        phrases
    }

    fn parse_timestamp(s: &str) -> f64 {
        let (hms, ms) = s.split_once('.').unwrap();
        let parts: Vec<u64> = hms.split(':').map(|p| p.parse().unwrap()).collect();
        assert_eq!(parts.len(), 3, "bad timestamp: {s}");
        (parts[0] * 3600 + parts[1] * 60 + parts[2]) as f64
            + ms.parse::<u64>().unwrap() as f64 / 1000.0
    }

    #[test]
    fn test_render_header_and_cues() {
        let phrases = vec![
            Phrase::new(0.0, 2.0, "Hello world."),
            Phrase::new(2.0, 4.0, "Second cue"),
        ];

        let vtt = render_vtt(&phrases);
        assert!(vtt.starts_with("WEBVTT\n\n"));
        assert!(vtt.contains("00:00:00.000 --> 00:00:02.000\nHello world.\n\n"));
        assert!(vtt.contains("00:00:02.000 --> 00:00:04.000\nSecond cue\n\n"));
    }

    #[test]
    fn test_empty_input_is_header_only() {
        assert_eq!(render_vtt(&[]), "WEBVTT\n\n");
    }

    #[test]
    fn test_round_trip_recovers_cues() {
        let phrases = vec![
            Phrase::new(0.0, 1.234, "First sentence."),
            Phrase::new(1.234, 61.5, "A longer second cue"),
            Phrase::new(3661.5, 3700.0, "Past the hour mark"),
        ];

        let parsed = parse_vtt(&render_vtt(&phrases));
        assert_eq!(parsed.len(), phrases.len());

        for (original, recovered) in phrases.iter().zip(&parsed) {
            assert!((original.start - recovered.start).abs() < 0.001);
            assert!((original.end - recovered.end).abs() < 0.001);
            assert_eq!(original.text, recovered.text);
        }
    }
}
