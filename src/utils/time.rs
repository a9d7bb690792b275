use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

const SECONDS_IN_HOUR: f64 = 3600.;
const SECONDS_IN_MINUTE: f64 = 60.;

/// Worked time between two punches in seconds. A missing punch on either side gives `0`.
/// The difference isn't clamped, so an out punch earlier than the in punch is negative.
pub fn duration_seconds(first_in: Option<NaiveDateTime>, last_out: Option<NaiveDateTime>) -> f64 {
    match (first_in, last_out) {
        (Some(first_in), Some(last_out)) => {
            (last_out - first_in).num_milliseconds() as f64 / 1000.
        }
        _ => 0.,
    }
}

/// This is the standard way of converting a duration to a string in minidone. Uses floor
/// division, so hours aren't bounded by a day and negative values keep the sign on the hours.
pub fn seconds_to_hms(seconds: f64) -> String {
    let hours = (seconds / SECONDS_IN_HOUR).floor() as i64;
    let minutes = (seconds.rem_euclid(SECONDS_IN_HOUR) / SECONDS_IN_MINUTE).floor() as i64;
    let seconds = seconds.rem_euclid(SECONDS_IN_MINUTE).floor() as i64;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn seconds_to_hours(seconds: f64) -> f64 {
    seconds / SECONDS_IN_HOUR
}

/// Converts an Excel serial date (days since 1899-12-30, fraction is the time of day).
pub fn from_excel_serial(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() || value < 0. {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let millis = (value * 86_400_000.).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{duration_seconds, from_excel_serial, seconds_to_hms};

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_duration_exact() {
        assert_eq!(duration_seconds(Some(at(9, 0, 0)), Some(at(17, 30, 15))), 30615.);
        assert_eq!(duration_seconds(Some(at(9, 0, 0)), Some(at(9, 0, 0))), 0.);
    }

    #[test]
    fn test_duration_missing_punch() {
        assert_eq!(duration_seconds(None, Some(at(17, 0, 0))), 0.);
        assert_eq!(duration_seconds(Some(at(9, 0, 0)), None), 0.);
        assert_eq!(duration_seconds(None, None), 0.);
    }

    #[test]
    fn test_duration_not_clamped() {
        assert_eq!(duration_seconds(Some(at(10, 0, 0)), Some(at(9, 0, 0))), -3600.);
    }

    #[test]
    fn test_seconds_to_hms() {
        assert_eq!(seconds_to_hms(0.), "00:00:00");
        assert_eq!(seconds_to_hms(3661.), "01:01:01");
        assert_eq!(seconds_to_hms(32400.), "09:00:00");
        assert_eq!(seconds_to_hms(59.9), "00:00:59");
    }

    #[test]
    fn test_seconds_to_hms_long_durations() {
        assert_eq!(seconds_to_hms(26. * 3600.), "26:00:00");
        assert_eq!(seconds_to_hms(100. * 3600. + 5.), "100:00:05");
    }

    #[test]
    fn test_seconds_to_hms_negative_floors() {
        assert_eq!(seconds_to_hms(-1.), "-1:59:59");
        assert_eq!(seconds_to_hms(-3600.), "-1:00:00");
    }

    #[test]
    fn test_excel_serial() {
        let noon = from_excel_serial(45355.5).unwrap();
        assert_eq!(noon, at(12, 0, 0));
        assert_eq!(from_excel_serial(-1.), None);
        assert_eq!(from_excel_serial(f64::NAN), None);
    }
}
