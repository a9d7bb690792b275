use std::{
    io::IsTerminal,
    path::{Path, PathBuf},
};

use ansi_term::Colour;
use anyhow::Result;
use clap::Parser;
use tracing::{info, instrument};

use crate::{
    attendance::{
        entities::DerivedRecord, summary::WorkModeSummary, work_mode::WorkMode, AttendanceReport,
    },
    sheet::{load_records, SheetError, WorkbookSource},
};

use super::output::{
    chart::ChartKind, table::TableFormat, write_outputs, OutputConfig, DEFAULT_STATIC_DIR,
    DEFAULT_UPLOAD_DIR,
};

#[derive(Debug, Parser)]
pub struct ProcessCommand {
    #[arg(help = "Attendance export (.xls or .xlsx) with a \"First In And Last Out\" sheet")]
    file: PathBuf,
    #[arg(long, short, default_value_t = TableFormat::Xlsx, help = "Format of the processed table")]
    format: TableFormat,
    #[arg(long, short, default_value_t = ChartKind::Pie, help = "Kind of chart summarizing work modes")]
    chart: ChartKind,
    #[arg(long, help = "Don't render a chart")]
    no_chart: bool,
    #[arg(long, short = 's', help = "Add a column with the total time in seconds")]
    include_seconds: bool,
    #[arg(long, default_value = DEFAULT_UPLOAD_DIR, help = "Directory for the processed table")]
    upload_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_STATIC_DIR, help = "Directory for the chart")]
    static_dir: PathBuf,
}

#[derive(Debug, Parser)]
pub struct SummaryCommand {
    #[arg(help = "Attendance export (.xls or .xlsx) with a \"First In And Last Out\" sheet")]
    file: PathBuf,
    #[arg(long, help = "Print records and counts as JSON")]
    json: bool,
}

/// Command to process `process` command. Reads the export, prints the results and writes the
/// table and chart.
#[instrument]
pub fn process_attendance_command(
    ProcessCommand {
        file,
        format,
        chart,
        no_chart,
        include_seconds,
        upload_dir,
        static_dir,
    }: ProcessCommand,
) -> Result<()> {
    let Some(report) = read_report(&file)? else {
        return Ok(());
    };

    let config = OutputConfig {
        upload_dir,
        static_dir,
        format,
        chart: (!no_chart).then_some(chart),
        include_seconds,
    };

    let painter = Painter::for_stdout();
    println!("Results");
    print_records(&painter, &report.records);
    println!();
    print_summary(&painter, &report.summary);

    let written = write_outputs(&report, &config)?;
    println!();
    println!(
        "Processed data saved to {} ({})",
        written.table.display(),
        format.mime()
    );
    if let Some(chart) = written.chart {
        println!("Chart saved to {}", chart.display());
    }
    Ok(())
}

/// Command to process `summary` command. Same reading as `process`, but nothing is written.
#[instrument]
pub fn summary_command(SummaryCommand { file, json }: SummaryCommand) -> Result<()> {
    let Some(report) = read_report(&file)? else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&Painter::for_stdout(), &report.summary);
    }
    Ok(())
}

/// `None` means the sheet was empty. That was already reported to the user.
fn read_report(file: &Path) -> Result<Option<AttendanceReport>> {
    let mut source = WorkbookSource::open(file)?;
    match load_records(&mut source) {
        Ok(records) => Ok(Some(AttendanceReport::build(&records))),
        Err(SheetError::NoData) => {
            info!("Sheet in {file:?} is empty");
            eprintln!("{}", SheetError::NoData);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

struct Painter {
    colored: bool,
}

impl Painter {
    fn for_stdout() -> Self {
        Self {
            colored: std::io::stdout().is_terminal(),
        }
    }

    fn mode(&self, mode: WorkMode) -> String {
        if !self.colored {
            return mode.label().to_string();
        }
        let colour = match mode {
            WorkMode::HalfDay => Colour::Yellow,
            WorkMode::Regularization => Colour::Blue,
            WorkMode::FullDay => Colour::Green,
            WorkMode::Overtime => Colour::Purple,
            WorkMode::InvalidTime => Colour::Red,
        };
        colour.paint(mode.label()).to_string()
    }

    fn header(&self, value: &str) -> String {
        if self.colored {
            Colour::White.bold().paint(value).to_string()
        } else {
            value.to_string()
        }
    }
}

fn print_records(painter: &Painter, records: &[DerivedRecord]) {
    println!(
        "{}",
        painter.header("Personnel ID\tName\tDate\tTime Done\tWork Mode")
    );
    for record in records {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            record.personnel_id,
            record.name,
            record.formatted_date(),
            record.time_done,
            painter.mode(record.work_mode)
        );
    }
}

fn print_summary(painter: &Painter, summary: &WorkModeSummary) {
    println!("{}", painter.header("Work Mode\tCount\tShare"));
    for (mode, count) in summary.iter() {
        println!("{}\t{}\t{}", painter.mode(mode), count, summary.share(mode));
    }
    println!("Total\t{}", summary.total());
}
