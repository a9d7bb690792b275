use std::{fmt::Display, path::Path};

use anyhow::Result;
use clap::ValueEnum;
use rust_xlsxwriter::{Format, Workbook};
use tracing::instrument;

use crate::attendance::entities::DerivedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Xlsx,
    Csv,
}

impl TableFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            TableFormat::Xlsx => "processed_output.xlsx",
            TableFormat::Csv => "processed_output.csv",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            TableFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            TableFormat::Csv => "text/csv",
        }
    }
}

impl Display for TableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableFormat::Xlsx => write!(f, "xlsx"),
            TableFormat::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    PersonnelId,
    Name,
    Date,
    Seconds,
    TimeDone,
    WorkMode,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::PersonnelId => "Personnel ID",
            Column::Name => "Name",
            Column::Date => "Date",
            Column::Seconds => "Total Time (seconds)",
            Column::TimeDone => "Time Done",
            Column::WorkMode => "Work Mode",
        }
    }

    pub fn text(&self, record: &DerivedRecord) -> String {
        match self {
            Column::PersonnelId => record.personnel_id.clone(),
            Column::Name => record.name.clone(),
            Column::Date => record.formatted_date(),
            Column::Seconds => record.duration_seconds.to_string(),
            Column::TimeDone => record.time_done.clone(),
            Column::WorkMode => record.work_mode.to_string(),
        }
    }
}

/// Columns of the processed table. Raw seconds are only there on request.
pub fn columns(include_seconds: bool) -> Vec<Column> {
    let mut columns = vec![Column::PersonnelId, Column::Name, Column::Date];
    if include_seconds {
        columns.push(Column::Seconds);
    }
    columns.extend([Column::TimeDone, Column::WorkMode]);
    columns
}

#[instrument(skip(records))]
pub fn write_table(
    path: &Path,
    format: TableFormat,
    records: &[DerivedRecord],
    include_seconds: bool,
) -> Result<()> {
    let columns = columns(include_seconds);
    match format {
        TableFormat::Xlsx => write_xlsx(path, &columns, records),
        TableFormat::Csv => write_csv(path, &columns, records),
    }
}

fn write_csv(path: &Path, columns: &[Column], records: &[DerivedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(columns.iter().map(|v| v.header()))?;
    for record in records {
        writer.write_record(columns.iter().map(|v| v.text(record)))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, columns: &[Column], records: &[DerivedRecord]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1")?;

    for (col, column) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column.header(), &header)?;
    }
    for (row, record) in records.iter().enumerate() {
        let row = row as u32 + 1;
        for (col, column) in columns.iter().enumerate() {
            let col = col as u16;
            match column {
                Column::Seconds => {
                    worksheet.write_number(row, col, record.duration_seconds)?;
                }
                column => {
                    worksheet.write_string(row, col, column.text(record))?;
                }
            }
        }
    }
    worksheet.autofit();
    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use calamine::{open_workbook_auto, Data, Reader};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::attendance::{entities::DerivedRecord, work_mode::WorkMode};

    use super::{columns, write_table, Column, TableFormat};

    fn records() -> Vec<DerivedRecord> {
        vec![
            DerivedRecord {
                personnel_id: "1001".into(),
                name: "Asha Rao".into(),
                date: NaiveDate::from_ymd_opt(2024, 3, 4),
                duration_seconds: 32400.,
                time_done: "09:00:00".into(),
                work_mode: WorkMode::FullDay,
            },
            DerivedRecord {
                personnel_id: "1002".into(),
                name: "Ravi, Jr Kumar".into(),
                date: None,
                duration_seconds: 0.,
                time_done: "00:00:00".into(),
                work_mode: WorkMode::HalfDay,
            },
        ]
    }

    #[test]
    fn test_columns() {
        assert_eq!(
            columns(false),
            vec![
                Column::PersonnelId,
                Column::Name,
                Column::Date,
                Column::TimeDone,
                Column::WorkMode
            ]
        );
        assert_eq!(columns(true)[3], Column::Seconds);
    }

    #[test]
    fn test_csv_output() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(TableFormat::Csv.file_name());
        write_table(&path, TableFormat::Csv, &records(), false)?;

        let content = std::fs::read_to_string(&path)?;
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Personnel ID,Name,Date,Time Done,Work Mode");
        assert_eq!(lines[1], "1001,Asha Rao,2024-03-04,09:00:00,Full Day");
        assert_eq!(lines[2], "1002,\"Ravi, Jr Kumar\",,00:00:00,Half Day");
        Ok(())
    }

    #[test]
    fn test_csv_output_with_seconds() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        write_table(&path, TableFormat::Csv, &records(), true)?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.starts_with("Personnel ID,Name,Date,Total Time (seconds),Time Done"));
        assert!(content.contains("1001,Asha Rao,2024-03-04,32400,09:00:00,Full Day"));
        Ok(())
    }

    #[test]
    fn test_xlsx_output_reads_back() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(TableFormat::Xlsx.file_name());
        write_table(&path, TableFormat::Xlsx, &records(), true)?;

        let mut workbook = open_workbook_auto(&path)?;
        let range = workbook.worksheet_range("Sheet1")?;
        assert_eq!(range.height(), 3);
        assert_eq!(
            range.get((0, 0)),
            Some(&Data::String("Personnel ID".into()))
        );
        assert_eq!(range.get((1, 3)), Some(&Data::Float(32400.)));
        assert_eq!(range.get((1, 5)), Some(&Data::String("Full Day".into())));
        assert_eq!(range.get((2, 5)), Some(&Data::String("Half Day".into())));
        Ok(())
    }

    #[test]
    fn test_mime() {
        assert_eq!(TableFormat::Csv.mime(), "text/csv");
        assert!(TableFormat::Xlsx.mime().contains("spreadsheetml"));
    }
}
