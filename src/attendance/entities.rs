use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::utils::time::{duration_seconds, seconds_to_hms, seconds_to_hours};

use super::work_mode::WorkMode;

/// One row of the attendance sheet: a person's first and last punch for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub personnel_id: String,
    pub first_name: String,
    pub last_name: String,
    pub first_reader: String,
    pub first_in: Option<NaiveDateTime>,
    pub last_reader: String,
    pub last_out: Option<NaiveDateTime>,
    pub department: String,
}

impl AttendanceRecord {
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Result of processing a single [AttendanceRecord].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRecord {
    #[serde(rename = "Personnel ID")]
    pub personnel_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Total Time (seconds)")]
    pub duration_seconds: f64,
    #[serde(rename = "Time Done")]
    pub time_done: String,
    #[serde(rename = "Work Mode")]
    pub work_mode: WorkMode,
}

impl DerivedRecord {
    pub fn assemble(record: &AttendanceRecord) -> Self {
        // A missing punch collapses into a zero duration, which then reads as a half day
        // instead of invalid time. Downstream reports depend on this, so it stays.
        let duration_seconds = duration_seconds(record.first_in, record.last_out);
        Self {
            personnel_id: record.personnel_id.clone(),
            name: record.name(),
            date: record.first_in.map(|v| v.date()),
            duration_seconds,
            time_done: seconds_to_hms(duration_seconds),
            work_mode: WorkMode::classify(Some(seconds_to_hours(duration_seconds))),
        }
    }

    pub fn hours(&self) -> f64 {
        seconds_to_hours(self.duration_seconds)
    }

    pub fn formatted_date(&self) -> String {
        self.date
            .map(|v| v.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::attendance::work_mode::WorkMode;

    use super::{AttendanceRecord, DerivedRecord};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn record(first_in: Option<NaiveDateTime>, last_out: Option<NaiveDateTime>) -> AttendanceRecord {
        AttendanceRecord {
            personnel_id: "1001".into(),
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            first_reader: "Main Door".into(),
            first_in,
            last_reader: "Main Door".into(),
            last_out,
            department: "Interns".into(),
        }
    }

    #[test]
    fn test_assemble_full_day() {
        let derived = DerivedRecord::assemble(&record(Some(at(9, 0)), Some(at(17, 45))));
        assert_eq!(derived.personnel_id, "1001");
        assert_eq!(derived.name, "Asha Rao");
        assert_eq!(derived.date, NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(derived.duration_seconds, 31500.);
        assert_eq!(derived.time_done, "08:45:00");
        assert_eq!(derived.work_mode, WorkMode::FullDay);
    }

    #[test]
    fn test_missing_last_out_is_half_day() {
        let derived = DerivedRecord::assemble(&record(Some(at(9, 0)), None));
        assert_eq!(derived.duration_seconds, 0.);
        assert_eq!(derived.time_done, "00:00:00");
        assert_eq!(derived.work_mode, WorkMode::HalfDay);
        assert_eq!(derived.date, NaiveDate::from_ymd_opt(2024, 3, 4));
    }

    #[test]
    fn test_missing_first_in_has_no_date() {
        let derived = DerivedRecord::assemble(&record(None, Some(at(17, 0))));
        assert_eq!(derived.date, None);
        assert_eq!(derived.formatted_date(), "");
        assert_eq!(derived.work_mode, WorkMode::HalfDay);
    }

    #[test]
    fn test_reclassification_is_stable() {
        for (start, end) in [(9, 12), (9, 13), (8, 17), (8, 18), (7, 20)] {
            let derived = DerivedRecord::assemble(&record(Some(at(start, 30)), Some(at(end, 0))));
            assert_eq!(WorkMode::classify(Some(derived.hours())), derived.work_mode);
        }
    }

    #[test]
    fn test_name_keeps_parts_verbatim() {
        let mut value = record(None, None);
        value.first_name = " Asha".into();
        value.last_name = String::new();
        assert_eq!(value.name(), " Asha ");
    }
}
