/*!
 * Tests for the SubRip timestamp codec
 */

use subsync::timecode::{format_time, parse_time};

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = parse_time(ts).unwrap();
    assert_eq!(ms, 5025678);

    let formatted = format_time(ms);
    assert_eq!(formatted, ts);
}

#[test]
fn test_timestamp_parsing_withDotAndShortHour_shouldCanonicalize() {
    let ms = parse_time("1:02:03.004").unwrap();
    assert_eq!(format_time(ms), "01:02:03,004");
}

#[test]
fn test_timestamp_parsing_withGarbage_shouldFail() {
    for input in ["", "abc", "00:00:01", "00:00:01,000 ", "-00:00:01,000", "00:00:01,000,000"] {
        assert!(parse_time(input).is_err(), "{:?} should not parse", input);
    }
}
