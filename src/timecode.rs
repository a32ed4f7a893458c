/*!
 * SubRip timestamp codec.
 *
 * Converts between `HH:MM:SS,mmm` text and a millisecond count. Round trips
 * hold at the value level: `parse_time(&format_time(ms)) == ms`, while the text
 * itself is canonicalized (e.g. `1:02:03.004` formats back as `01:02:03,004`).
 */

use crate::errors::SubtitleError;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Parse `H:MM:SS,mmm` (or `H:MM:SS.mmm`) into milliseconds.
///
/// Only the first `.` is treated as a millisecond separator. Field ranges are
/// not checked, so `00:00:75,000` is 75 seconds.
pub fn parse_time(text: &str) -> Result<u64, SubtitleError> {
    let normalized = text.replacen('.', ",", 1);
    let malformed = || SubtitleError::MalformedTimestamp {
        input: text.to_string(),
    };

    let (clock, millis) = normalized.split_once(',').ok_or_else(malformed)?;
    let clock: Vec<&str> = clock.split(':').collect();
    if clock.len() != 3 {
        return Err(malformed());
    }

    let hours = parse_field(clock[0]).ok_or_else(malformed)?;
    let minutes = parse_field(clock[1]).ok_or_else(malformed)?;
    let seconds = parse_field(clock[2]).ok_or_else(malformed)?;
    let millis = parse_field(millis).ok_or_else(malformed)?;

    hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|ms| ms.checked_add(minutes.checked_mul(MS_PER_MINUTE)?))
        .and_then(|ms| ms.checked_add(seconds.checked_mul(MS_PER_SECOND)?))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(malformed)
}

/// Format milliseconds as `HH:MM:SS,mmm`; hours widen past two digits when needed.
pub fn format_time(ms: u64) -> String {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

// Digits only: `u64::from_str` would also take a leading `+`.
fn parse_field(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
