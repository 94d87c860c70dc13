//! Display formatting for notification text
//!
//! All size and speed strings shown in notifications are produced here so
//! the two platforms' renderings never drift apart.

/// Bytes per megabyte
const MB: f64 = 1024.0 * 1024.0;

/// Format a byte count as megabytes for display.
///
/// Rounds to two decimals, then trims a trailing zero in the hundredths
/// place so whole megabytes read as "1.0" rather than "1.00". The returned
/// string carries no unit; callers append " MB" in their templates.
pub fn format_megabytes(bytes: u64) -> String {
    let rounded = (bytes as f64 / MB * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    match text.strip_suffix('0') {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    }
}

/// Format a transfer speed in MB/s with one decimal
pub fn format_speed(speed_mbps: f64) -> String {
    format!("{speed_mbps:.1} MB/s")
}

/// Clamp a raw progress value to a displayable percentage
pub fn clamp_percent(progress: i64) -> u8 {
    progress.clamp(0, 100) as u8
}

// =============================================================================
// Tests
// =============================================================================
