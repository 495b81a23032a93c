//! Resolves the four logical fields against a source header row.

use csv::StringRecord;

use crate::config::ColumnConfig;
use crate::error::{ProcessingError, Result};

/// Positions of the date, district, PM10 and PM2.5 columns in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: usize,
    pub district: usize,
    pub pm10: usize,
    pub pm25: usize,
}

impl ColumnMapping {
    /// Each field takes the first candidate name present in the header.
    pub fn resolve(headers: &StringRecord, columns: &ColumnConfig) -> Result<Self> {
        Ok(Self {
            date: find_column(headers, "date", &columns.date)?,
            district: find_column(headers, "district", &columns.district)?,
            pm10: find_column(headers, "pm10", &columns.pm10)?,
            pm25: find_column(headers, "pm25", &columns.pm25)?,
        })
    }

    /// Minimum number of fields a data row needs
    pub fn required_width(&self) -> usize {
        self.date.max(self.district).max(self.pm10).max(self.pm25) + 1
    }
}

fn find_column(headers: &StringRecord, field: &str, candidates: &[String]) -> Result<usize> {
    candidates
        .iter()
        .find_map(|candidate| {
            headers
                .iter()
                .position(|header| normalize_header(header) == candidate.trim())
        })
        .ok_or_else(|| ProcessingError::MissingColumn {
            field: field.to_string(),
            candidates: candidates.join(", "),
        })
}

fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}
