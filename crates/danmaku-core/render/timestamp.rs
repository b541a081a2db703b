//! ASS timestamp formatting

/// Convert seconds to whole centiseconds
///
/// Rounds half to even, so `0.125` seconds becomes 12 centiseconds.
/// Negative input clamps to zero.
#[must_use]
pub fn seconds_to_centiseconds(seconds: f64) -> u64 {
    let centiseconds = (seconds * 100.0).round_ties_even();
    if centiseconds.is_nan() || centiseconds <= 0.0 {
        0
    } else {
        centiseconds as u64
    }
}

/// Format centiseconds as `H:MM:SS.CC`
///
/// Hours are not wrapped or padded.
///
/// # Example
///
/// ```rust
/// # use danmaku_core::render::format_ass_time;
/// assert_eq!(format_ass_time(9050), "0:01:30.50");
/// assert_eq!(format_ass_time(36_000_000), "100:00:00.00");
/// ```
#[must_use]
pub fn format_ass_time(centiseconds: u64) -> String {
    let hours = centiseconds / 360_000;
    let remainder = centiseconds % 360_000;
    let minutes = remainder / 6000;
    let remainder = remainder % 6000;
    let seconds = remainder / 100;
    let cs = remainder % 100;

    format!("{hours}:{minutes:02}:{seconds:02}.{cs:02}")
}

/// Format a playback position in seconds as `H:MM:SS.CC`
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    format_ass_time(seconds_to_centiseconds(seconds))
}
