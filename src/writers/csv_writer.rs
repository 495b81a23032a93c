use crate::error::Result;
use crate::models::AirQualityRecord;
use crate::utils::constants::{EXPORT_COLUMNS, UTF8_BOM};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes enriched records as UTF-8 CSV with a BOM, so spreadsheet tools
/// keep non-ASCII district names intact.
pub struct CsvWriter {
    write_bom: bool,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { write_bom: true }
    }

    pub fn with_bom(mut self, write_bom: bool) -> Self {
        self.write_bom = write_bom;
        self
    }

    /// Write records to `path`, replacing any existing file
    pub fn write_records(&self, records: &[AirQualityRecord], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = BufWriter::new(File::create(path)?);
        if self.write_bom {
            file.write_all(UTF8_BOM)?;
        }

        let mut writer = csv::Writer::from_writer(file);
        if records.is_empty() {
            // serialize() only emits the header alongside the first row
            writer.write_record(EXPORT_COLUMNS)?;
        }
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(district: &str, pm10: f64, pm25: f64) -> AirQualityRecord {
        let date = NaiveDate::from_ymd_opt(2019, 1, 15).unwrap();
        AirQualityRecord::from_measurement(Measurement::new(date, district.to_string(), pm10, pm25))
    }

    #[test]
    fn test_write_header_and_rows() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("card_output.csv");

        CsvWriter::new().write_records(&[record("강남구", 45.0, 20.0)], &path)?;

        let bytes = std::fs::read(&path)?;
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("date,district,pm10,pm25,month,day,season,pm_grade")
        );
        assert_eq!(
            lines.next(),
            Some("2019-01-15,강남구,45.0,20.0,1,15,winter,normal")
        );
        assert_eq!(lines.next(), None);

        Ok(())
    }

    #[test]
    fn test_overwrites_existing_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are longer than the new file\n".repeat(50))?;

        CsvWriter::new()
            .with_bom(false)
            .write_records(&[record("Jongno", 95.0, 55.0)], &path)?;

        let text = std::fs::read_to_string(&path)?;
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("Jongno,95.0,55.0,1,15,winter,bad\n"));

        Ok(())
    }

    #[test]
    fn test_empty_export_still_has_header() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.csv");

        CsvWriter::new().with_bom(false).write_records(&[], &path)?;

        let text = std::fs::read_to_string(&path)?;
        assert_eq!(text, "date,district,pm10,pm25,month,day,season,pm_grade\n");

        Ok(())
    }
}
