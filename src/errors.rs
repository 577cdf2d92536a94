//! Error types for report loading, conversion and rendering.

use thiserror::Error;

/// Errors that can abort a conversion or plotting run.
///
/// Missing residue fields and unclassifiable elements are not errors: they are
/// resolved with sentinel values or fallback rules during normalization.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Reading the input or writing an output file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON report could not be parsed or the converted report could not be written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The XML report is not well-formed
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An XML attribute could not be decoded
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// The XML event stream did not describe a single rooted tree
    #[error("Malformed XML document: {0}")]
    MalformedXml(String),

    /// The top level of a JSON report must be an object
    #[error("Expected a JSON object at the top level of the report, found {0}")]
    NotAnObject(&'static str),

    /// Building or writing the counts table failed
    #[error("DataFrame error: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),

    /// The chart backend reported an error
    #[error("Failed to render chart: {0}")]
    Plot(String),
}
