//! Reading attendance exports. [SheetSource] hides the workbook format, [layout] knows
//! where the data sits inside the sheet.

pub mod layout;

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::attendance::entities::AttendanceRecord;

use layout::FirstInLastOutLayout;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xls", "xlsx"];

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Unsupported file {0:?}, expected an .xls or .xlsx workbook")]
    UnsupportedExtension(PathBuf),
    #[error("Failed to open workbook {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("Workbook has no sheet named \"{0}\"")]
    MissingSheet(String),
    #[error("Failed to read sheet")]
    Read(#[source] calamine::Error),
    #[error("Row {row} has {columns} columns, expected at least {}", FirstInLastOutLayout::COLUMNS)]
    Layout { row: usize, columns: usize },
    #[error("No data found in the Excel sheet.")]
    NoData,
}

/// Checks only what follows the last dot of the file name, the content is left to the
/// workbook reader. A bare ".xlsx" counts as an xlsx file.
pub fn allowed_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|v| {
            v.to_string_lossy()
                .rsplit_once('.')
                .map(|(_, extension)| extension.to_lowercase())
        })
        .is_some_and(|v| ALLOWED_EXTENSIONS.contains(&v.as_str()))
}

/// Anything that can hand out sheets by name.
#[cfg_attr(test, mockall::automock)]
pub trait SheetSource {
    fn sheet_names(&self) -> Vec<String>;

    fn range(&mut self, name: &str) -> Result<calamine::Range<Data>, SheetError>;
}

pub struct WorkbookSource {
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    pub fn open(path: &Path) -> Result<Self, SheetError> {
        if !allowed_file(path) {
            return Err(SheetError::UnsupportedExtension(path.to_path_buf()));
        }
        let workbook = open_workbook_auto(path).map_err(|source| SheetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened workbook {path:?}");
        Ok(Self { workbook })
    }
}

impl SheetSource for WorkbookSource {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn range(&mut self, name: &str) -> Result<calamine::Range<Data>, SheetError> {
        self.workbook.worksheet_range(name).map_err(SheetError::Read)
    }
}

/// Reads every attendance record from the "First In And Last Out" sheet of `source`.
#[instrument(skip(source))]
pub fn load_records(source: &mut impl SheetSource) -> Result<Vec<AttendanceRecord>, SheetError> {
    let sheet_name = FirstInLastOutLayout::SHEET_NAME;
    if !source.sheet_names().iter().any(|v| v == sheet_name) {
        return Err(SheetError::MissingSheet(sheet_name.to_string()));
    }
    let range = source.range(sheet_name)?;
    let records = FirstInLastOutLayout.records(&range)?;
    info!("Loaded {} attendance records", records.len());
    Ok(records)
}
