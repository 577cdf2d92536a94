//! Report loading and result writing helpers.

use crate::errors::ReportError;
use crate::normalize::InteractionRecords;
use crate::xml::{parse_xml, XmlElement};

use polars::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read and parse a JSON report.
pub fn load_json_report(input_file: &Path) -> Result<Value, ReportError> {
    let reader = BufReader::new(File::open(input_file)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Read and parse an XML report into its root element.
///
/// The file is read as bytes so that the encoding declared in the document
/// is honoured.
pub fn load_xml_report(input_file: &Path) -> Result<XmlElement, ReportError> {
    let content = std::fs::read(input_file)?;
    parse_xml(&content)
}

/// Write converted interaction records as pretty-printed JSON.
pub fn write_json_report(records: &InteractionRecords, file_path: &Path) -> Result<(), ReportError> {
    let mut writer = BufWriter::new(File::create(file_path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a DataFrame to a file, replacing the extension of `file_path` with
/// the one of `file_type`.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<(), ReportError> {
    let file_suffix = file_type.to_string();
    let mut file = File::create(file_path.with_extension(file_suffix))?;
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(())
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

/// Layout of an input report.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// JSON report, canonical or heuristic keys
    Json,
    /// XML report
    Xml,
}

impl ReportFormat {
    /// Guess the format from the file extension: `.xml` is XML, anything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => ReportFormat::Xml,
            _ => ReportFormat::Json,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Xml => write!(f, "xml"),
        }
    }
}
