//! Spreadsheet serial dates
//!
//! A serial date counts days since 1899-12-30T00:00:00, with the time of day
//! as the fractional part. Timestamps are taken as wall-clock values; no zone
//! conversion happens here.

use chrono::{NaiveDateTime, Timelike};

/// Seconds between 1899-12-30T00:00:00 and the unix epoch
const EPOCH_OFFSET_SECS: i128 = 25_569 * 86_400;

const NANOS_PER_SEC: i128 = 1_000_000_000;
const NANOS_PER_DAY: f64 = 86_400.0 * 1_000_000_000.0;

/// Day count since the spreadsheet epoch
pub fn serial_days(ts: NaiveDateTime) -> f64 {
    let utc = ts.and_utc();
    let nanos = (i128::from(utc.timestamp()) + EPOCH_OFFSET_SECS) * NANOS_PER_SEC
        + i128::from(utc.timestamp_subsec_nanos());
    nanos as f64 / NANOS_PER_DAY
}

/// Cell text for a timestamp.
///
/// Exact midnight (ignoring sub-second digits) is written as a whole day
/// count; anything else keeps 6 fractional digits. Timestamps before the
/// epoch come out negative and are passed through unchanged.
pub fn serial_date(ts: NaiveDateTime) -> String {
    let days = serial_days(ts);
    if ts.hour() == 0 && ts.minute() == 0 && ts.second() == 0 {
        let mut buf = itoa::Buffer::new();
        buf.format(days.trunc() as i64).to_string()
    } else {
        format!("{:.6}", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_epoch_is_zero() {
        assert_eq!(serial_date(at(1899, 12, 30, 0, 0, 0)), "0");
        assert_eq!(serial_date(at(1900, 1, 1, 0, 0, 0)), "2");
        assert_eq!(serial_date(at(1970, 1, 1, 0, 0, 0)), "25569");
    }

    #[test]
    fn test_midnight_has_no_fraction() {
        let s = serial_date(at(2010, 10, 10, 0, 0, 0));
        assert_eq!(s, "40461");
        assert!(!s.contains('.'));
    }

    #[test]
    fn test_time_of_day_has_six_digits() {
        assert_eq!(serial_date(at(2010, 10, 10, 10, 10, 10)), "40461.423727");
        assert_eq!(serial_date(at(2010, 10, 10, 12, 0, 0)), "40461.500000");
    }

    #[test]
    fn test_before_epoch_is_negative() {
        assert_eq!(serial_date(at(1899, 12, 29, 0, 0, 0)), "-1");
        assert_eq!(serial_date(at(1899, 12, 29, 12, 0, 0)), "-0.500000");
    }

    #[test]
    fn test_subsecond_midnight_truncates() {
        let ts = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_milli_opt(0, 0, 0, 500)
            .unwrap();
        assert_eq!(serial_date(ts), "43831");
    }
}
