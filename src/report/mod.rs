//! Rendering analyses as text, JSON or CSV.
//!
//! Every renderer builds the complete output in memory and returns it as a
//! `String`, so a failure never leaves a half-written report behind.

mod text;

pub use text::TextReport;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::analysis::Analysis;
use crate::error::LayoutscanError;

/// Header row of the CSV report.
pub const CSV_HEADER: [&str; 7] = ["path", "index", "x", "y", "width", "height", "area"];

/// Output format of a report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = LayoutscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(LayoutscanError::UnsupportedFormat(format!(
                "'{}' (supported: text, json, csv)",
                other
            ))),
        }
    }
}

/// Options for report rendering.
#[derive(Clone, Debug, Default)]
pub struct ReportOptions {
    pub format: ReportFormat,
    /// List every region in the text report.
    pub list_regions: bool,
}

/// Renders analyses in the requested format.
pub fn render(analyses: &[Analysis], opts: &ReportOptions) -> Result<String, LayoutscanError> {
    match opts.format {
        ReportFormat::Text => Ok(TextReport::new(analyses, opts.list_regions).to_string()),
        ReportFormat::Json => to_json_string(analyses),
        ReportFormat::Csv => to_csv_string(analyses),
    }
}

/// Pretty-printed JSON: an object for one analysis, an array otherwise.
pub fn to_json_string(analyses: &[Analysis]) -> Result<String, LayoutscanError> {
    let mut json = match analyses {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    }
    .map_err(LayoutscanError::JsonWrite)?;
    json.push('\n');
    Ok(json)
}

/// A single CSV row: one text region of one image.
#[derive(Debug, Serialize)]
struct RegionRow {
    path: String,
    index: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    area: u64,
}

/// CSV with one row per text region. Indices are 1-based within each image.
///
/// The header is written even when no image has any regions.
pub fn to_csv_string(analyses: &[Analysis]) -> Result<String, LayoutscanError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    csv_writer.write_record(CSV_HEADER)?;

    for analysis in analyses {
        let path = analysis.path.display().to_string();
        for (i, region) in analysis.descriptor.text_regions.iter().enumerate() {
            csv_writer.serialize(RegionRow {
                path: path.clone(),
                index: i + 1,
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                area: region.area,
            })?;
        }
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| LayoutscanError::Io(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| {
        LayoutscanError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
