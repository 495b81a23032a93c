use crate::config::{ColumnConfig, PipelineConfig};
use crate::error::{ProcessingError, Result};
use crate::models::Measurement;
use crate::readers::ColumnMapping;
use crate::utils::constants::{
    DATETIME_FORMATS, DATE_FORMATS, DEFAULT_LEGACY_ENCODING, ENCODING_AUTO, UTF8_BOM,
};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info, warn};
use validator::Validate;

/// Counts of what happened to each source row during normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub sentinel_rows: usize,
    pub incomplete_rows: usize,
    pub invalid_dates: usize,
    pub invalid_numbers: usize,
    pub invalid_values: usize,
    pub kept_rows: usize,
}

impl LoadReport {
    pub fn dropped_rows(&self) -> usize {
        self.total_rows - self.kept_rows
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Load Report ===\n");
        summary.push_str(&format!("Source rows: {}\n", self.total_rows));
        summary.push_str(&format!("Aggregate rows skipped: {}\n", self.sentinel_rows));
        summary.push_str(&format!("Incomplete rows dropped: {}\n", self.incomplete_rows));
        summary.push_str(&format!("Unparsable dates dropped: {}\n", self.invalid_dates));
        summary.push_str(&format!("Unparsable readings dropped: {}\n", self.invalid_numbers));
        summary.push_str(&format!("Out-of-range readings dropped: {}\n", self.invalid_values));
        summary.push_str(&format!(
            "Records kept: {} ({:.1}%)\n",
            self.kept_rows,
            if self.total_rows == 0 {
                0.0
            } else {
                100.0 * self.kept_rows as f64 / self.total_rows as f64
            }
        ));

        summary
    }
}

/// Loads a raw measurement dump and normalizes it into clean `Measurement`s.
pub struct MeasurementReader {
    columns: ColumnConfig,
    sentinels: Vec<String>,
    encoding: String,
}

impl MeasurementReader {
    pub fn new() -> Self {
        Self::from_config(&PipelineConfig::default())
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            sentinels: config.sentinels.clone(),
            encoding: config.encoding.clone(),
        }
    }

    /// Read and normalize measurements from a delimited file
    pub fn read_measurements(&self, path: &Path) -> Result<(Vec<Measurement>, LoadReport)> {
        let bytes = std::fs::read(path)?;
        let content = self.decode(&bytes)?;
        let (measurements, report) = self.read_from_str(&content)?;

        info!(
            "Loaded {} of {} rows from {}",
            report.kept_rows,
            report.total_rows,
            path.display()
        );

        Ok((measurements, report))
    }

    /// Decode raw bytes to text, stripping a UTF-8 BOM
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        if self.encoding == ENCODING_AUTO {
            if let Ok(text) = std::str::from_utf8(bytes) {
                return Ok(Cow::Borrowed(text));
            }
            debug!(
                "Input is not valid UTF-8, decoding as {}",
                DEFAULT_LEGACY_ENCODING
            );
            return decode_with(DEFAULT_LEGACY_ENCODING, bytes);
        }

        decode_with(&self.encoding, bytes)
    }

    /// Normalize already-decoded delimited text
    pub fn read_from_str(&self, content: &str) -> Result<(Vec<Measurement>, LoadReport)> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.clone();
        let mapping = ColumnMapping::resolve(&headers, &self.columns)?;
        debug!("Resolved source columns: {:?}", mapping);

        let mut report = LoadReport::default();
        let mut measurements = Vec::new();

        for result in reader.records() {
            let record = result?;
            report.total_rows += 1;

            if let Some(measurement) = self.normalize_row(&record, &mapping, &mut report)? {
                measurements.push(measurement);
            }
        }

        report.kept_rows = measurements.len();

        if report.total_rows > 0 && report.kept_rows == 0 {
            warn!(
                "All {} source rows were dropped during cleaning",
                report.total_rows
            );
        }

        Ok((measurements, report))
    }

    /// Turn one source row into a measurement, or drop it and count why
    fn normalize_row(
        &self,
        record: &StringRecord,
        mapping: &ColumnMapping,
        report: &mut LoadReport,
    ) -> Result<Option<Measurement>> {
        let date = field(record, mapping.date, mapping)?;
        let district = field(record, mapping.district, mapping)?;
        let pm10 = field(record, mapping.pm10, mapping)?;
        let pm25 = field(record, mapping.pm25, mapping)?;

        if self.sentinels.iter().any(|s| s == date) {
            report.sentinel_rows += 1;
            return Ok(None);
        }

        if [date, district, pm10, pm25].iter().any(|v| v.is_empty()) {
            report.incomplete_rows += 1;
            return Ok(None);
        }

        let Some(date) = parse_date(date) else {
            report.invalid_dates += 1;
            return Ok(None);
        };

        let (Some(pm10), Some(pm25)) = (parse_reading(pm10), parse_reading(pm25)) else {
            report.invalid_numbers += 1;
            return Ok(None);
        };

        let measurement = Measurement::new(date, district.to_string(), pm10, pm25);
        if let Err(e) = measurement.validate() {
            debug!("Dropping {} on {}: {}", measurement.district, measurement.date, e);
            report.invalid_values += 1;
            return Ok(None);
        }

        Ok(Some(measurement))
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}

/// A trimmed field; a row too short to hold it is malformed input
fn field<'r>(record: &'r StringRecord, index: usize, mapping: &ColumnMapping) -> Result<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| ProcessingError::MalformedRow {
            line: record.position().map_or(0, |p| p.line()),
            expected: mapping.required_width(),
            found: record.len(),
        })
}

fn decode_with<'a>(label: &str, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| ProcessingError::Encoding(format!("Unknown encoding label: {}", label)))?;

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(ProcessingError::Encoding(format!(
            "Input is not valid {}",
            encoding.name()
        )));
    }

    Ok(text)
}

/// Parse a calendar date, discarding any time component
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a concentration; non-numeric and non-finite values are rejected
pub fn parse_reading(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "날짜,측정소명,미세먼지,초미세먼지";

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2019, 1, 15).unwrap();

        assert_eq!(parse_date("2019-01-15"), Some(expected));
        assert_eq!(parse_date("2019/01/15"), Some(expected));
        assert_eq!(parse_date("2019.01.15"), Some(expected));
        assert_eq!(parse_date("20190115"), Some(expected));
        assert_eq!(parse_date("2019-01-15 13:00"), Some(expected));
        assert_eq!(parse_date(" 2019-01-15 "), Some(expected));
        assert_eq!(parse_date("2019-02-30"), None);
        assert_eq!(parse_date("평균"), None);
    }

    #[test]
    fn test_parse_reading() {
        assert_eq!(parse_reading("45"), Some(45.0));
        assert_eq!(parse_reading(" 12.5 "), Some(12.5));
        assert_eq!(parse_reading("-"), None);
        assert_eq!(parse_reading("점검중"), None);
        assert_eq!(parse_reading("NaN"), None);
        assert_eq!(parse_reading("inf"), None);
    }

    #[test]
    fn test_sentinel_and_incomplete_rows_dropped() -> Result<()> {
        let content = format!(
            "{}\n\
             전체,,,\n\
             평균,,40,20\n\
             2019-01-15,강남구,45,20\n\
             2019-01-15,종로구,95,55\n\
             2019-01-16,,50,30\n\
             2019-01-16,중구,,30\n",
            HEADER
        );

        let reader = MeasurementReader::new();
        let (measurements, report) = reader.read_from_str(&content)?;

        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0].district, "강남구");
        assert_eq!(measurements[1].pm10, 95.0);
        assert_eq!(report.total_rows, 6);
        assert_eq!(report.sentinel_rows, 2);
        assert_eq!(report.incomplete_rows, 2);
        assert_eq!(report.kept_rows, 2);
        assert_eq!(report.dropped_rows(), 4);

        Ok(())
    }

    #[test]
    fn test_uncoercible_values_dropped() -> Result<()> {
        let content = format!(
            "{}\n\
             not-a-date,강남구,45,20\n\
             2019-01-15,강남구,점검중,20\n\
             2019-01-15,강남구,45,-3\n\
             2019-01-15,종로구,95,55\n",
            HEADER
        );

        let (measurements, report) = MeasurementReader::new().read_from_str(&content)?;

        assert_eq!(measurements.len(), 1);
        assert_eq!(report.invalid_dates, 1);
        assert_eq!(report.invalid_numbers, 1);
        assert_eq!(report.invalid_values, 1);

        for m in &measurements {
            assert!(m.pm10 >= 0.0 && m.pm25 >= 0.0);
            assert!(!m.district.is_empty());
        }

        Ok(())
    }

    #[test]
    fn test_sentinel_match_is_case_sensitive() -> Result<()> {
        let content = "date,district,pm10,pm25\nAverage,Gangnam,45,20\naverage,Gangnam,45,20\n";

        let (measurements, report) = MeasurementReader::new().read_from_str(content)?;

        assert!(measurements.is_empty());
        assert_eq!(report.sentinel_rows, 1);
        assert_eq!(report.invalid_dates, 1);

        Ok(())
    }

    #[test]
    fn test_short_row_is_fatal() {
        let content = format!("{}\n2019-01-15,강남구,45\n", HEADER);

        let err = MeasurementReader::new().read_from_str(&content).unwrap_err();
        match err {
            ProcessingError::MalformedRow {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let content = "날짜,측정소명,미세먼지\n2019-01-15,강남구,45\n";
        let err = MeasurementReader::new().read_from_str(content).unwrap_err();
        assert!(matches!(err, ProcessingError::MissingColumn { .. }));
    }

    #[test]
    fn test_read_euc_kr_file() -> Result<()> {
        let content = format!("{}\n2019-03-02,서초구,61,33\n", HEADER);
        let (encoded, _, _) = encoding_rs::EUC_KR.encode(&content);

        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(&encoded)?;

        let (measurements, _) = MeasurementReader::new().read_measurements(temp_file.path())?;

        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].district, "서초구");
        assert_eq!(measurements[0].pm25, 33.0);

        Ok(())
    }

    #[test]
    fn test_read_utf8_bom_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(UTF8_BOM)?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(temp_file, "2019-10-09,용산구,28,14")?;

        let (measurements, report) = MeasurementReader::new().read_measurements(temp_file.path())?;

        assert_eq!(report.total_rows, 1);
        assert_eq!(measurements[0].district, "용산구");
        assert_eq!(measurements[0].date, NaiveDate::from_ymd_opt(2019, 10, 9).unwrap());

        Ok(())
    }
}
