pub mod chart;
pub mod table;

use std::path::PathBuf;

use anyhow::Result;
use chart::{save_chart, ChartKind};
use table::{write_table, TableFormat};
use tracing::{info, warn};

use crate::{attendance::AttendanceReport, utils::dir::ensure_dir};

pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
pub const DEFAULT_STATIC_DIR: &str = "./static";

/// Where and in what form processed attendance gets written.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub format: TableFormat,
    pub chart: Option<ChartKind>,
    pub include_seconds: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            upload_dir: DEFAULT_UPLOAD_DIR.into(),
            static_dir: DEFAULT_STATIC_DIR.into(),
            format: TableFormat::Xlsx,
            chart: Some(ChartKind::Pie),
            include_seconds: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub table: PathBuf,
    pub chart: Option<PathBuf>,
}

/// Writes the processed table and, when there is anything to plot, the chart.
pub fn write_outputs(report: &AttendanceReport, config: &OutputConfig) -> Result<WrittenOutputs> {
    ensure_dir(&config.upload_dir)?;
    let table = config.upload_dir.join(config.format.file_name());
    write_table(&table, config.format, &report.records, config.include_seconds)?;
    info!("Processed data saved to {table:?}");

    let chart = match config.chart {
        Some(_) if report.summary.chart_counts().is_empty() => {
            warn!("Nothing to chart, skipping");
            None
        }
        Some(kind) => {
            ensure_dir(&config.static_dir)?;
            let path = config.static_dir.join(kind.file_name());
            save_chart(&path, kind, &report.summary)?;
            info!("Chart saved to {path:?}");
            Some(path)
        }
        None => None,
    };

    Ok(WrittenOutputs { table, chart })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::attendance::{entities::AttendanceRecord, AttendanceReport};

    use super::{chart::ChartKind, table::TableFormat, write_outputs, OutputConfig};

    fn report(hours: &[u32]) -> AttendanceReport {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let records = hours
            .iter()
            .enumerate()
            .map(|(index, hours)| AttendanceRecord {
                personnel_id: index.to_string(),
                first_name: "Intern".into(),
                last_name: index.to_string(),
                first_reader: String::new(),
                first_in: day.and_hms_opt(8, 0, 0),
                last_reader: String::new(),
                last_out: day.and_hms_opt(8 + hours, 0, 0),
                department: String::new(),
            })
            .collect::<Vec<_>>();
        AttendanceReport::build(&records)
    }

    #[test]
    fn test_writes_table_and_chart() -> Result<()> {
        let dir = tempdir()?;
        let config = OutputConfig {
            upload_dir: dir.path().join("uploads"),
            static_dir: dir.path().join("static"),
            format: TableFormat::Csv,
            chart: Some(ChartKind::Bar),
            include_seconds: false,
        };
        let written = write_outputs(&report(&[3, 8, 10]), &config)?;

        assert_eq!(written.table, dir.path().join("uploads/processed_output.csv"));
        assert!(written.table.is_file());
        let chart = written.chart.expect("chart should be written");
        assert_eq!(chart, dir.path().join("static/bar_chart.svg"));
        assert!(chart.is_file());
        Ok(())
    }

    #[test]
    fn test_empty_report_skips_chart() -> Result<()> {
        let dir = tempdir()?;
        let config = OutputConfig {
            upload_dir: dir.path().join("uploads"),
            static_dir: dir.path().join("static"),
            ..OutputConfig::default()
        };
        let written = write_outputs(&report(&[]), &config)?;
        assert!(written.table.is_file());
        assert_eq!(written.chart, None);
        assert!(!config.static_dir.exists());
        Ok(())
    }
}
