use calamine::{Data, Range};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{trace, warn};

use crate::{attendance::entities::AttendanceRecord, utils::time::from_excel_serial};

use super::SheetError;

const DATE_TIME_FORMATS: [&str; 11] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Layout of the "First In And Last Out" export produced by the access control system.
///
/// The sheet starts with a header row, then one more header-like row that carries no data,
/// then one row per person per day. Columns are positional:
///
/// | 0            | 1          | 2         | 3                    | 4             | 5                   | 6             | 7          |
/// |--------------|------------|-----------|----------------------|---------------|---------------------|---------------|------------|
/// | Personnel ID | First Name | Last Name | First in Reader Name | First In Time | Last Out Reader Name | Last Out Time | Department |
///
/// Any change to that export should only need changes here.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstInLastOutLayout;

impl FirstInLastOutLayout {
    pub const SHEET_NAME: &'static str = "First In And Last Out";
    pub const COLUMNS: usize = 8;

    const PERSONNEL_ID: usize = 0;
    const FIRST_NAME: usize = 1;
    const LAST_NAME: usize = 2;
    const FIRST_READER: usize = 3;
    const FIRST_IN: usize = 4;
    const LAST_READER: usize = 5;
    const LAST_OUT: usize = 6;
    const DEPARTMENT: usize = 7;

    /// Rows before the data: the column header and the secondary header artifact.
    const SKIPPED_ROWS: usize = 2;

    /// Extracts all records of the sheet. A sheet with nothing below its column header is
    /// reported as [SheetError::NoData].
    pub fn records(&self, range: &Range<Data>) -> Result<Vec<AttendanceRecord>, SheetError> {
        if range.height() <= 1 {
            return Err(SheetError::NoData);
        }
        if range.width() < Self::COLUMNS {
            return Err(SheetError::Layout {
                row: 0,
                columns: range.width(),
            });
        }
        range
            .rows()
            .enumerate()
            .skip(Self::SKIPPED_ROWS)
            .map(|(index, row)| self.record(index, row))
            .collect()
    }

    pub fn record(&self, index: usize, row: &[Data]) -> Result<AttendanceRecord, SheetError> {
        if row.len() < Self::COLUMNS {
            return Err(SheetError::Layout {
                row: index,
                columns: row.len(),
            });
        }
        let record = AttendanceRecord {
            personnel_id: cell_text(&row[Self::PERSONNEL_ID]),
            first_name: cell_text(&row[Self::FIRST_NAME]),
            last_name: cell_text(&row[Self::LAST_NAME]),
            first_reader: cell_text(&row[Self::FIRST_READER]),
            first_in: cell_timestamp(&row[Self::FIRST_IN]),
            last_reader: cell_text(&row[Self::LAST_READER]),
            last_out: cell_timestamp(&row[Self::LAST_OUT]),
            department: cell_text(&row[Self::DEPARTMENT]),
        };
        if record.first_in.is_none() || record.last_out.is_none() {
            warn!("Row {index} of {} is missing a punch", record.personnel_id);
        }
        trace!("Parsed row {index} {record:?}");
        Ok(record)
    }
}

/// Text content of a cell. Whole numbers lose their fraction so that numeric ids read
/// the same as they look in the spreadsheet.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(v) | Data::DateTimeIso(v) | Data::DurationIso(v) => v.clone(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) if v.is_finite() && v.fract() == 0. => (*v as i64).to_string(),
        Data::Float(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v
            .as_datetime()
            .map(|v| v.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Point in time stored in a cell, `None` for anything that can't be read as one.
pub fn cell_timestamp(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(v) => v.as_datetime(),
        Data::String(v) | Data::DateTimeIso(v) => parse_timestamp(v),
        Data::Float(v) => from_excel_serial(*v),
        Data::Int(v) => from_excel_serial(*v as f64),
        _ => None,
    }
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|v| v.and_time(NaiveTime::MIN))
        })
}
