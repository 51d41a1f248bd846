/*!
 * SRT timestamp formatting.
 */

/// Format a second offset as an SRT timestamp (HH:MM:SS,mmm).
///
/// Milliseconds are truncated, not rounded. Hours have no upper bound and
/// keep growing past two digits. Negative input is a caller error.
pub fn format_timestamp(seconds: f64) -> String {
    assert!(
        seconds >= 0.0,
        "timestamp must be non-negative, got {}",
        seconds
    );

    let whole = seconds as u64;
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    // fract() < 1.0, so truncation can never reach 1000
    let millis = (seconds.fract() * 1000.0) as u64;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
