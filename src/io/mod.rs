mod csv_io;
mod json_io;

use std::path::Path;

use crate::error::AdvisorError;
use crate::models::{BatchResult, FieldPlan};

pub use csv_io::{read_plans_csv, read_plans_csv_from_bytes, results_to_csv_string, write_results_csv};
pub use json_io::{read_plans_json, read_plans_json_from_bytes, write_results_json};

/// Trait for reading field plans from a file.
pub trait PlanReader {
    fn read(&self, path: &Path) -> Result<Vec<FieldPlan>, AdvisorError>;
}

/// Trait for writing batch results to a file.
pub trait ResultWriter {
    fn write(&self, results: &[BatchResult], path: &Path) -> Result<(), AdvisorError>;
}

/// CSV format reader/writer.
pub struct CsvFormat;

impl PlanReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<Vec<FieldPlan>, AdvisorError> {
        read_plans_csv(path)
    }
}

impl ResultWriter for CsvFormat {
    fn write(&self, results: &[BatchResult], path: &Path) -> Result<(), AdvisorError> {
        write_results_csv(results, path)
    }
}

/// JSON format reader/writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl PlanReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<Vec<FieldPlan>, AdvisorError> {
        read_plans_json(path)
    }
}

impl ResultWriter for JsonFormat {
    fn write(&self, results: &[BatchResult], path: &Path) -> Result<(), AdvisorError> {
        write_results_json(results, path, self.pretty)
    }
}

/// Supported batch file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, AdvisorError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }

    pub fn from_extension(ext: &str) -> Result<Self, AdvisorError> {
        match ext.to_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            other => Err(AdvisorError::ParseError(format!(
                "Unsupported file format: '{other}' (expected csv or json)"
            ))),
        }
    }

    pub fn reader(&self) -> Box<dyn PlanReader> {
        match self {
            FileFormat::Csv => Box::new(CsvFormat),
            FileFormat::Json => Box::new(JsonFormat::default()),
        }
    }

    pub fn writer(&self) -> Box<dyn ResultWriter> {
        match self {
            FileFormat::Csv => Box::new(CsvFormat),
            FileFormat::Json => Box::new(JsonFormat { pretty: true }),
        }
    }
}

/// Read field plans, picking the format from the file extension.
pub fn read_plans(path: impl AsRef<Path>) -> Result<Vec<FieldPlan>, AdvisorError> {
    let path = path.as_ref();
    FileFormat::from_path(path)?.reader().read(path)
}

/// Parse uploaded plan bytes in the given format.
pub fn read_plans_from_bytes(
    data: &[u8],
    format: FileFormat,
) -> Result<Vec<FieldPlan>, AdvisorError> {
    match format {
        FileFormat::Csv => read_plans_csv_from_bytes(data),
        FileFormat::Json => read_plans_json_from_bytes(data),
    }
}

/// Write batch results, picking the format from the file extension.
pub fn write_results(results: &[BatchResult], path: impl AsRef<Path>) -> Result<(), AdvisorError> {
    let path = path.as_ref();
    FileFormat::from_path(path)?.writer().write(results, path)
}
