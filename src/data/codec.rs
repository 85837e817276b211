//! CSV reading and writing for the sensor feed.
//!
//! The feed is three comma separated columns: time, temperature, humidity.
//! A header row is optional. Rows that do not make a valid [`Reading`] are
//! dropped and reported in [`ParseReport::rejected`].

use std::io;

use chrono::SecondsFormat;
use sensorwatch_types::{Dataset, Reading};

use super::timestamp::parse_timestamp;
use crate::error::{ExportError, ParseError};

/// Header written on export.
pub const HEADER: [&str; 3] = ["time", "temperature", "humidity"];

const FIELD_COUNT: usize = 3;

/// Result of parsing a CSV body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// The valid readings, in the order they appeared.
    pub dataset: Dataset,
    /// One entry per dropped row.
    pub rejected: Vec<ParseError>,
    /// Whether the first row was recognized as a header.
    pub has_header: bool,
}

/// Parse a CSV body into a dataset.
pub fn parse_csv(text: &str) -> ParseReport {
    parse_reader(text.as_bytes())
}

/// Parse CSV from any reader into a dataset.
pub fn parse_reader<R: io::Read>(reader: R) -> ParseReport {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut report = ParseReport::default();
    let mut readings = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let fallback_line = index as u64 + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                let is_io = matches!(e.kind(), csv::ErrorKind::Io(_));
                report.rejected.push(ParseError::MalformedRow {
                    line,
                    reason: e.to_string(),
                });
                if is_io {
                    break;
                }
                continue;
            }
        };

        if index == 0 && looks_like_header(&record) {
            report.has_header = true;
            continue;
        }

        let line = record.position().map_or(fallback_line, |p| p.line());
        match parse_record(&record) {
            Ok(reading) => readings.push(reading),
            Err(reason) => report.rejected.push(ParseError::MalformedRow { line, reason }),
        }
    }

    report.dataset = Dataset::new(readings);
    report
}

/// A header is three non-empty labels: no timestamp, no numbers.
///
/// Anything else in the first row is treated as data, so a broken first
/// row is rejected and reported rather than skipped.
fn looks_like_header(record: &csv::StringRecord) -> bool {
    record.len() == FIELD_COUNT
        && record.iter().all(|field| !field.is_empty())
        && record.get(0).and_then(parse_timestamp).is_none()
        && record.iter().all(|field| field.parse::<f64>().is_err())
}

fn parse_record(record: &csv::StringRecord) -> Result<Reading, String> {
    if record.len() != FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            record.len()
        ));
    }

    let time = &record[0];
    let timestamp =
        parse_timestamp(time).ok_or_else(|| format!("unparsable timestamp '{}'", time))?;
    let temperature = parse_value(&record[1], "temperature")?;
    let humidity = parse_value(&record[2], "humidity")?;

    Ok(Reading::new(timestamp, temperature, humidity))
}

fn parse_value(field: &str, name: &str) -> Result<f64, String> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("unparsable {} '{}'", name, field)),
    }
}

/// Write a dataset as CSV with a header row.
///
/// Timestamps are RFC 3339 in UTC and numbers use the shortest form that
/// reads back to the same value, so [`parse_csv`] recovers an equal dataset.
pub fn write_csv<W: io::Write>(dataset: &Dataset, writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;

    for reading in dataset {
        writer.write_record([
            reading
                .timestamp
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            reading.temperature.to_string(),
            reading.humidity.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Serialize a dataset to a UTF-8 CSV string.
pub fn to_csv_string(dataset: &Dataset) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(dataset, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
