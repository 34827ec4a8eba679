//! Two-column series files
//!
//! Input: one header line (skipped), then `timestamp value` per line, fields
//! separated by whitespace and/or commas. Output: `Time,Simplified_Power`
//! header followed by `timestamp,value` rows with six fractional digits.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use regex::Regex;
use tracing::debug;
use voltage_downsample::OutputPoint;

use crate::error::{Result, ToolError};

/// Header written to every output file
pub const OUTPUT_HEADER: [&str; 2] = ["Time", "Simplified_Power"];

/// Fractional digits of the value column
pub const VALUE_PRECISION: usize = 6;

/// Timestamps and values read from an input file, index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub timestamps: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Splits data lines into timestamp and value fields
pub struct LineParser {
    separator: Regex,
}

impl LineParser {
    pub fn new() -> Result<Self> {
        let separator = Regex::new(r"[\s,]+")
            .map_err(|e| ToolError::config(format!("Invalid field separator: {}", e)))?;
        Ok(Self { separator })
    }

    /// Parse one data line; `line_no` is 1-based and only used for errors
    ///
    /// Returns `None` for blank lines. Fields after the value are ignored.
    pub fn parse_line(&self, line: &str, line_no: usize) -> Result<Option<(String, f64)>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let mut fields = self.separator.split(trimmed).filter(|f| !f.is_empty());
        let timestamp = fields
            .next()
            .ok_or_else(|| ToolError::parse(line_no, "missing timestamp"))?;
        let raw_value = fields
            .next()
            .ok_or_else(|| ToolError::parse(line_no, "missing value"))?;
        let value = raw_value.parse::<f64>().map_err(|e| {
            ToolError::parse(line_no, format!("invalid value '{}': {}", raw_value, e))
        })?;
        if !value.is_finite() {
            return Err(ToolError::parse(
                line_no,
                format!("value '{}' is not finite", raw_value),
            ));
        }

        Ok(Some((timestamp.to_string(), value)))
    }
}

/// Read a series from any buffered source, skipping the header line
pub fn parse_series<R: BufRead>(reader: R) -> Result<Series> {
    let parser = LineParser::new()?;
    let mut series = Series::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| ToolError::parse(line_no, e.to_string()))?;
        if idx == 0 {
            debug!(header = line.trim(), "skipping header");
            continue;
        }
        if let Some((timestamp, value)) = parser.parse_line(&line, line_no)? {
            series.timestamps.push(timestamp);
            series.values.push(value);
        }
    }

    Ok(series)
}

/// Read a series file
pub fn read_series(path: &Path) -> Result<Series> {
    let file = File::open(path).map_err(|e| ToolError::io(path, e))?;
    let series = parse_series(BufReader::new(file))?;
    debug!(path = %path.display(), samples = series.len(), "loaded series");
    Ok(series)
}

/// Write reduced points with the fixed header and precision
pub fn write_points<W: Write>(writer: W, points: &[OutputPoint<String>]) -> csv::Result<()> {
    // Labels are written exactly as read
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    csv_writer.write_record(OUTPUT_HEADER)?;
    for point in points {
        let value = format!("{:.*}", VALUE_PRECISION, point.value);
        csv_writer.write_record([point.timestamp.as_str(), value.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the points to it
pub fn write_points_file(path: &Path, points: &[OutputPoint<String>]) -> Result<()> {
    let file = File::create(path).map_err(|e| ToolError::io(path, e))?;
    write_points(BufWriter::new(file), points).map_err(|e| ToolError::csv(path, e))?;
    debug!(path = %path.display(), points = points.len(), "wrote points");
    Ok(())
}
