use crate::models::{AirQualityRecord, Measurement};
use tracing::debug;

/// Derives month, day, season and PM10 grade for every measurement.
pub struct Enricher;

impl Enricher {
    pub fn new() -> Self {
        Self
    }

    /// Enrich every measurement, preserving input order
    pub fn enrich(&self, measurements: Vec<Measurement>) -> Vec<AirQualityRecord> {
        let records: Vec<AirQualityRecord> = measurements
            .into_iter()
            .map(AirQualityRecord::from_measurement)
            .collect();

        debug!("Enriched {} records", records.len());
        records
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}
