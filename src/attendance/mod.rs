//! Turning attendance rows into worked time and work modes.
//!
//! Everything here is pure: [AttendanceReport::build] takes already normalized
//! [entities::AttendanceRecord]s, sheet specifics live in [crate::sheet].

pub mod entities;
pub mod summary;
pub mod work_mode;

use serde::Serialize;
use tracing::debug;

use entities::{AttendanceRecord, DerivedRecord};
use summary::WorkModeSummary;

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    pub records: Vec<DerivedRecord>,
    pub summary: WorkModeSummary,
}

impl AttendanceReport {
    pub fn build(records: &[AttendanceRecord]) -> Self {
        let records = records
            .iter()
            .map(DerivedRecord::assemble)
            .inspect(|v| debug!("Derived {v:?}"))
            .collect::<Vec<_>>();
        let summary = WorkModeSummary::from_records(&records);
        Self { records, summary }
    }
}
