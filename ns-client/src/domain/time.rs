//! Timestamp decoding for NS API payloads.
//!
//! The service sends timestamps like `2021-03-05T14:30:00+0100`. The offset
//! has no colon, and its four digits are read positionally as a day count,
//! an hour count, a minute count and a second count which are summed into a
//! single offset. `0100` therefore means one hour and `0200` two hours, which
//! covers the two zones the service emits. `0130` decodes to +01:03, not
//! +01:30.
//!
//! Only `+` offsets are understood. A `-` offset is rejected with a
//! [`FormatError`].

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};

/// Error returned when a timestamp string cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct FormatError {
    input: String,
    reason: &'static str,
}

impl FormatError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to decode.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Why decoding failed.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Decode a service timestamp into a timezone-aware instant.
///
/// # Examples
///
/// ```
/// use ns_client::domain::decode_timestamp;
///
/// let t = decode_timestamp("2021-03-05T14:30:00+0100").unwrap();
/// assert_eq!(t.to_rfc3339(), "2021-03-05T14:30:00+01:00");
///
/// // Missing offset separator
/// assert!(decode_timestamp("2021-03-05T14:30:00").is_err());
/// ```
pub fn decode_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, FormatError> {
    if raw.matches('T').count() != 1 {
        return Err(FormatError::new(raw, "expected exactly one 'T' separator"));
    }
    if raw.matches('+').count() != 1 {
        return Err(FormatError::new(raw, "expected exactly one '+' separator"));
    }

    let (date, rest) = raw
        .split_once('T')
        .ok_or_else(|| FormatError::new(raw, "expected exactly one 'T' separator"))?;
    let (time, offset) = rest
        .split_once('+')
        .ok_or_else(|| FormatError::new(raw, "expected exactly one '+' separator"))?;

    let [year, month, day] = parse_triplet(date, '-', raw, "date must be YYYY-MM-DD digits")?;
    let [hour, minute, second] = parse_triplet(time, ':', raw, "time must be HH:MM:SS digits")?;
    let offset = decode_offset(offset, raw)?;

    let year = i32::try_from(year).map_err(|_| FormatError::new(raw, "year out of range"))?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FormatError::new(raw, "not a calendar date"))?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| FormatError::new(raw, "not a valid time of day"))?;

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| FormatError::new(raw, "ambiguous local time"))
}

/// Read the four offset characters as day, hour, minute and second digits.
fn decode_offset(digits: &str, raw: &str) -> Result<FixedOffset, FormatError> {
    let bytes = digits.as_bytes();
    if bytes.len() != 4 {
        return Err(FormatError::new(raw, "offset must be four digits"));
    }

    let mut parts = [0i64; 4];
    for (slot, &b) in parts.iter_mut().zip(bytes) {
        *slot = (b as char)
            .to_digit(10)
            .ok_or_else(|| FormatError::new(raw, "offset must be four digits"))?
            .into();
    }
    let [days, hours, minutes, seconds] = parts;

    let offset = Duration::days(days)
        + Duration::hours(hours)
        + Duration::minutes(minutes)
        + Duration::seconds(seconds);

    i32::try_from(offset.num_seconds())
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| FormatError::new(raw, "offset out of range"))
}

/// Split `part` on `sep` into exactly three runs of ASCII digits.
fn parse_triplet(
    part: &str,
    sep: char,
    raw: &str,
    reason: &'static str,
) -> Result<[u32; 3], FormatError> {
    let mut fields = [0u32; 3];
    let mut pieces = part.split(sep);

    for slot in &mut fields {
        let piece = pieces.next().ok_or_else(|| FormatError::new(raw, reason))?;
        *slot = parse_digits(piece).ok_or_else(|| FormatError::new(raw, reason))?;
    }

    if pieces.next().is_some() {
        return Err(FormatError::new(raw, reason));
    }

    Ok(fields)
}

/// Parse a non-empty run of ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use proptest::prelude::*;

    proptest! {
        /// Any well-formed timestamp with a single-digit hour offset decodes
        /// to the same wall-clock fields and that offset.
        #[test]
        fn wall_clock_fields_survive(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60,
            offset_hours in 0i32..10,
        ) {
            let raw = format!(
                "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}+0{offset_hours}00"
            );
            let t = decode_timestamp(&raw).unwrap();
            prop_assert_eq!(t.year(), year);
            prop_assert_eq!(t.month(), month);
            prop_assert_eq!(t.day(), day);
            prop_assert_eq!(t.hour(), hour);
            prop_assert_eq!(t.minute(), minute);
            prop_assert_eq!(t.second(), second);
            prop_assert_eq!(t.offset().local_minus_utc(), offset_hours * 3600);
        }

        /// Strings without a '+' never decode.
        #[test]
        fn no_plus_never_decodes(s in "[0-9T:-]{0,30}") {
            prop_assert!(decode_timestamp(&s).is_err());
        }
    }
}
