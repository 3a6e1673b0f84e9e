use std::time::Duration;

use super::error::DurationParseError;

/// Parse an ISO 8601 time duration such as `PT1H2M30S`.
///
/// Returns `Ok(None)` when the value does not start with `PT` (live streams
/// report `P0D`). Components are consumed in `H`, `M`, `S` order; each present
/// marker must be preceded by digits.
pub fn parse_duration(input: &str) -> Result<Option<Duration>, DurationParseError> {
    let Some(mut rest) = input.strip_prefix("PT") else {
        return Ok(None);
    };

    let mut secs = 0u64;
    for (marker, scale) in [('H', 3600u64), ('M', 60), ('S', 1)] {
        if let Some((num, tail)) = rest.split_once(marker) {
            let value = parse_component(input, num, marker)?;
            secs = value
                .checked_mul(scale)
                .and_then(|v| v.checked_add(secs))
                .ok_or_else(|| DurationParseError::new(input, "duration overflows"))?;
            rest = tail;
        }
    }

    if !rest.is_empty() {
        return Err(DurationParseError::new(
            input,
            format!("unexpected trailing text '{rest}'"),
        ));
    }
    Ok(Some(Duration::from_secs(secs)))
}

fn parse_component(input: &str, num: &str, marker: char) -> Result<u64, DurationParseError> {
    if num.is_empty() || !num.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationParseError::new(
            input,
            format!("expected a number before '{marker}', found '{num}'"),
        ));
    }
    num.parse::<u64>()
        .map_err(|e| DurationParseError::new(input, e.to_string()))
}

/// `H:MM:SS` when the duration reaches an hour, otherwise `M:SS`.
pub fn format_duration(dur: Duration) -> String {
    let secs = dur.as_secs();
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Compact view counts: `1.5K`, `2.5M`, `1M`.
pub fn format_number(num: u64) -> String {
    if num >= 1_000_000 {
        scaled(num, 1_000_000.0, 'M')
    } else if num >= 1_000 {
        scaled(num, 1_000.0, 'K')
    } else {
        num.to_string()
    }
}

fn scaled(num: u64, unit: f64, suffix: char) -> String {
    let text = format!("{:.1}", num as f64 / unit);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}{suffix}")
}

/// Date part of an RFC 3339 timestamp (`2024-01-02T03:04:05Z` -> `2024-01-02`).
pub fn publish_date(published_at: &str) -> &str {
    published_at
        .split_once('T')
        .map(|(date, _)| date)
        .unwrap_or(published_at)
}

/// Parse and format in one step, degrading malformed values to an empty string.
pub fn display_duration(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match parse_duration(raw) {
        Ok(Some(dur)) => format_duration(dur),
        Ok(None) => String::new(),
        Err(e) => {
            tracing::debug!("{e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u64, m: u64, s: u64) -> Duration {
        Duration::from_secs(h * 3600 + m * 60 + s)
    }

    #[test]
    fn parses_full_and_partial_durations() {
        assert_eq!(parse_duration("PT1H2M30S").unwrap(), Some(hms(1, 2, 30)));
        assert_eq!(parse_duration("PT5M10S").unwrap(), Some(hms(0, 5, 10)));
        assert_eq!(parse_duration("PT45S").unwrap(), Some(hms(0, 0, 45)));
        assert_eq!(parse_duration("PT2H").unwrap(), Some(hms(2, 0, 0)));
        assert_eq!(parse_duration("PT1H30S").unwrap(), Some(hms(1, 0, 30)));
        assert_eq!(parse_duration("PT0S").unwrap(), Some(Duration::ZERO));
    }

    #[test]
    fn missing_prefix_is_no_value() {
        assert_eq!(parse_duration("").unwrap(), None);
        assert_eq!(parse_duration("P0D").unwrap(), None);
        assert_eq!(parse_duration("P1DT2H").unwrap(), None);
        assert_eq!(parse_duration("1H2M").unwrap(), None);
    }

    #[test]
    fn malformed_components_are_errors() {
        assert!(parse_duration("PTH").is_err());
        assert!(parse_duration("PT1HM").is_err());
        assert!(parse_duration("PTxS").is_err());
        assert!(parse_duration("PT-5S").is_err());
        assert!(parse_duration("PT5").is_err());
        assert!(parse_duration("PT5S10").is_err());
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(hms(1, 2, 30)), "1:02:30");
        assert_eq!(format_duration(hms(0, 5, 10)), "5:10");
        assert_eq!(format_duration(hms(0, 0, 45)), "0:45");
        assert_eq!(format_duration(Duration::from_secs(3750)), "1:02:30");
        assert_eq!(format_duration(Duration::ZERO), "0:00");
        assert_eq!(format_duration(hms(12, 0, 5)), "12:00:05");
    }

    #[test]
    fn overlong_minutes_normalise() {
        let dur = parse_duration("PT90M").unwrap().unwrap();
        assert_eq!(format_duration(dur), "1:30:00");
    }

    #[test]
    fn parse_then_format_is_canonical() {
        for (raw, expected) in [
            ("PT1H2M30S", "1:02:30"),
            ("PT45S", "0:45"),
            ("PT10M", "10:00"),
            ("PT3H4S", "3:00:04"),
        ] {
            assert_eq!(display_duration(raw), expected, "{raw}");
        }
    }

    #[test]
    fn display_duration_degrades_to_empty() {
        assert_eq!(display_duration(""), "");
        assert_eq!(display_duration("P0D"), "");
        assert_eq!(display_duration("PTxM"), "");
    }

    #[test]
    fn formats_numbers() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(500), "500");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1K");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(1_000_000), "1M");
        assert_eq!(format_number(2_500_000), "2.5M");
        assert_eq!(format_number(12_340_000), "12.3M");
    }

    #[test]
    fn number_suffix_matches_magnitude() {
        for n in [1_000u64, 1_001, 54_321, 999_999] {
            assert!(format_number(n).ends_with('K'), "{n}");
        }
        for n in [1_000_000u64, 7_654_321, 999_999_999, u64::MAX] {
            assert!(format_number(n).ends_with('M'), "{n}");
        }
    }

    #[test]
    fn publish_date_truncates_at_time() {
        assert_eq!(publish_date("2024-01-02T03:04:05Z"), "2024-01-02");
        assert_eq!(publish_date("2024-01-02"), "2024-01-02");
        assert_eq!(publish_date(""), "");
    }
}
