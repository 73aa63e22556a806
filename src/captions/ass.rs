//! ASS (Advanced SubStation Alpha) caption rendering.
//!
//! Renders phrases as a styled subtitle track suitable for burning into
//! video: a fixed script-info section, a single `Default` style line built
//! from the caption style record, and one dialogue event per phrase.

use super::phrase::Phrase;
use super::timecode::format_ass_timestamp;
use crate::error::{Result, TekstError};
use crate::styles::CaptionStyle;
use std::fmt::Write;

/// Play resolution the style margins are tuned for.
const PLAY_RES: (u32, u32) = (1280, 720);

/// Convert a `#RRGGBB` colour token to ASS ABGR form (`&H00BBGGRR`).
fn ass_color(hex: &str) -> Result<String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TekstError::InvalidInput(format!(
            "Invalid colour token: {hex} (expected #RRGGBB)"
        )));
    }

    let r = &digits[0..2];
    let g = &digits[2..4];
    let b = &digits[4..6];
    Ok(format!("&H00{}{}{}", b, g, r).to_uppercase())
}

/// Render phrases as an ASS document with a single uniform style.
///
/// Lines are newline-joined with no trailing blank line; the blank-line
/// separation WebVTT requires between cues has no counterpart in the ASS
/// grammar.
pub fn render_ass(phrases: &[Phrase], style: &CaptionStyle) -> Result<String> {
    let primary = ass_color(&style.font_color)?;

    let mut output = String::new();

    writeln!(output, "[Script Info]").unwrap();
    writeln!(output, "Title: Generated Subtitles").unwrap();
    writeln!(output, "ScriptType: v4.00+").unwrap();
    writeln!(output, "WrapStyle: 0").unwrap();
    writeln!(output, "PlayResX: {}", PLAY_RES.0).unwrap();
    writeln!(output, "PlayResY: {}", PLAY_RES.1).unwrap();
    writeln!(output).unwrap();

    writeln!(output, "[V4+ Styles]").unwrap();
    writeln!(
        output,
        "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding"
    )
    .unwrap();
    writeln!(
        output,
        "Style: Default,{family},{size},{primary},&H00FFFFFF,&H00000000,&H00000000,{weight},0,0,0,100,100,0,0,1,1,0,2,10,10,50,1",
        family = style.font_family,
        size = style.font_size,
        primary = primary,
        weight = style.font_weight,
    )
    .unwrap();
    writeln!(output).unwrap();

    writeln!(output, "[Events]").unwrap();
    write!(
        output,
        "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"
    )
    .unwrap();

    for phrase in phrases {
        let text = phrase.text.split_whitespace().collect::<Vec<_>>().join(" ");
        write!(
            output,
            "\nDialogue: 0,{start},{end},Default,,0,0,0,,{text}",
            start = format_ass_timestamp(phrase.start),
            end = format_ass_timestamp(phrase.end),
            text = text,
        )
        .unwrap();
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_style() -> CaptionStyle {
        CaptionStyle {
            font_family: "Ella".to_string(),
            font_size: 20,
            font_color: "#FF0000".to_string(),
            font_weight: 1,
            font_file: None,
        }
    }

    #[test]
    fn test_ass_color_is_abgr() {
        assert_eq!(ass_color("#FF0000").unwrap(), "&H000000FF");
        assert_eq!(ass_color("#FFFFFF").unwrap(), "&H00FFFFFF");
        assert_eq!(ass_color("1A2B3C").unwrap(), "&H003C2B1A");
        assert!(ass_color("#F00").is_err());
        assert!(ass_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_render_header_and_style_line() {
        let output = render_ass(&[], &red_style()).unwrap();

        assert!(output.contains("[Script Info]"));
        assert!(output.contains("Title: Generated Subtitles"));
        assert!(output.contains("PlayResX: 1280"));
        assert!(output.contains("PlayResY: 720"));
        assert!(output.contains("[V4+ Styles]"));
        assert!(output.contains(
            "Style: Default,Ella,20,&H000000FF,&H00FFFFFF,&H00000000,&H00000000,1,"
        ));
        assert!(output.contains("[Events]"));
        // No dialogue lines and no trailing newline for an empty cue list
        assert!(output.ends_with("Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"));
    }

    #[test]
    fn test_render_dialogue_lines() {
        let phrases = vec![
            Phrase::new(0.0, 2.5, "Hello world."),
            Phrase::new(3661.5, 3700.0, "Past the hour"),
        ];

        let output = render_ass(&phrases, &red_style()).unwrap();
        assert!(output.contains("\nDialogue: 0,0:00:00.00,0:00:02.50,Default,,0,0,0,,Hello world."));
        assert!(output.contains("\nDialogue: 0,1:01:01.50,1:01:40.00,Default,,0,0,0,,Past the hour"));
        assert!(!output.ends_with('\n'));
    }

    #[test]
    fn test_embedded_line_breaks_are_flattened() {
        let phrases = vec![Phrase::new(0.0, 1.0, "line one\r\nline two")];
        let output = render_ass(&phrases, &red_style()).unwrap();
        assert!(output.contains(",,line one line two"));
        assert!(!output.contains("line one\r"));
    }
}
