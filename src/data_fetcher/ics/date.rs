use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;

static ICS_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})(?:T(\d{2})(\d{2})(\d{2})Z?)?$").expect("valid date regex")
});

/// Decodes a `DTSTART` value into an absolute instant.
///
/// * `YYYYMMDDTHHMMSSZ` and the floating `YYYYMMDDTHHMMSS` are both read as UTC.
/// * `YYYYMMDD` (all-day) becomes local midnight, so all-day items are not
///   on the same footing as timestamped ones.
pub fn decode_date(value: &str) -> Result<DateTime<Utc>, AppError> {
    let value = value.trim();
    let caps = ICS_DATE
        .captures(value)
        .ok_or_else(|| AppError::datetime_parse_error(format!("unsupported date '{value}'")))?;

    let field = |index: usize| -> u32 {
        caps.get(index)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    let year = caps[1]
        .parse::<i32>()
        .map_err(|e| AppError::datetime_parse_error(format!("year in '{value}': {e}")))?;
    let date = NaiveDate::from_ymd_opt(year, field(2), field(3))
        .ok_or_else(|| AppError::datetime_parse_error(format!("invalid date '{value}'")))?;

    if caps.get(4).is_none() {
        return local_midnight(date)
            .ok_or_else(|| AppError::datetime_parse_error(format!("no local midnight for '{value}'")));
    }

    let time = date
        .and_hms_opt(field(4), field(5), field(6))
        .ok_or_else(|| AppError::datetime_parse_error(format!("invalid time in '{value}'")))?;
    Ok(time.and_utc())
}

fn local_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    let midnight: NaiveDateTime = date.and_hms_opt(0, 0, 0)?;
    let local = Local.from_local_datetime(&midnight);
    local
        .earliest()
        .or_else(|| local.latest())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_utc_timestamp() {
        let date = decode_date("20240309T140000Z").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 3, 9, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_floating_timestamp_is_read_as_utc() {
        let date = decode_date("20241102T093015").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 11, 2, 9, 30, 15).unwrap());
    }

    #[test]
    fn test_all_day_is_local_midnight() {
        let date = decode_date("20240309").unwrap();
        let local = date.with_timezone(&Local);
        assert_eq!((local.year(), local.month(), local.day()), (2024, 3, 9));
        assert_eq!((local.hour(), local.minute()), (0, 0));
    }

    #[test]
    fn test_rejects_other_shapes() {
        for value in [
            "",
            "2024-03-09",
            "20240309T1400",
            "20240309T140000+0100",
            "not a date",
            "202403091",
        ] {
            assert!(decode_date(value).is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn test_rejects_out_of_range_components() {
        assert!(decode_date("20241309T140000Z").is_err());
        assert!(decode_date("20240230").is_err());
        assert!(decode_date("20240309T250000Z").is_err());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(decode_date(" 20240309T140000Z ").is_ok());
    }
}
