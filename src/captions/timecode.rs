//! Caption timestamp formatting.
//!
//! WebVTT wants `HH:MM:SS.mmm`; ASS wants `H:MM:SS.cc` with an unpadded hour
//! field. Both are derived by rounding the offset to whole milliseconds or
//! centiseconds first and then decomposing, so a fraction that rounds up past
//! a second carries into the seconds field instead of printing `.1000`.

/// Format a seconds offset as a WebVTT timestamp (`HH:MM:SS.mmm`).
pub fn format_vtt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
}

/// Format a seconds offset as an ASS timestamp (`H:MM:SS.cc`).
pub fn format_ass_timestamp(seconds: f64) -> String {
    let total_cs = (seconds.max(0.0) * 100.0).round() as u64;
    let hours = total_cs / 360_000;
    let minutes = (total_cs % 360_000) / 6_000;
    let secs = (total_cs % 6_000) / 100;
    let cs = total_cs % 100;

    format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, cs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vtt_timestamp() {
        assert_eq!(format_vtt_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_vtt_timestamp(3661.5), "01:01:01.500");
        assert_eq!(format_vtt_timestamp(61.25), "00:01:01.250");
    }

    #[test]
    fn test_ass_timestamp() {
        assert_eq!(format_ass_timestamp(0.0), "0:00:00.00");
        assert_eq!(format_ass_timestamp(3661.5), "1:01:01.50");
        assert_eq!(format_ass_timestamp(1.5), "0:00:01.50");
        // Rounds to nearest centisecond
        assert_eq!(format_ass_timestamp(0.125), "0:00:00.13");
    }

    #[test]
    fn test_rounding_carries_into_seconds() {
        // 0.9996s rounds to 1000ms, which must become a full second
        assert_eq!(format_vtt_timestamp(0.9996), "00:00:01.000");
        // 0.999s rounds to 100cs, likewise
        assert_eq!(format_ass_timestamp(0.999), "0:00:01.00");
        // And the carry propagates across minute boundaries
        assert_eq!(format_vtt_timestamp(59.9999), "00:01:00.000");
        assert_eq!(format_ass_timestamp(3599.999), "1:00:00.00");
    }

    #[test]
    fn test_hours_are_not_truncated_past_a_day() {
        // 25 hours: a wall-clock conversion would wrap this to 01:00:00
        assert_eq!(format_vtt_timestamp(90_000.0), "25:00:00.000");
        assert_eq!(format_ass_timestamp(90_000.0), "25:00:00.00");
    }
}
