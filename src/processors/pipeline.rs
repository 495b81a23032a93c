use crate::analyzers::{AirQualityAnalyzer, AnalysisReport};
use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{AirQualityRecord, Measurement};
use crate::processors::{Enricher, IntegrityChecker, IntegrityReport};
use crate::readers::{LoadReport, MeasurementReader};
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tracing::{info, warn};

/// Everything one run computes, held in memory for the caller
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<AirQualityRecord>,
    pub load_report: LoadReport,
    pub integrity_report: IntegrityReport,
    pub report: AnalysisReport,
}

/// Load → enrich → aggregate/rank, each stage callable on its own.
pub struct AirQualityPipeline {
    config: PipelineConfig,
}

impl AirQualityPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn load(&self, path: &Path) -> Result<(Vec<Measurement>, LoadReport)> {
        MeasurementReader::from_config(&self.config).read_measurements(path)
    }

    pub fn enrich(&self, measurements: Vec<Measurement>) -> Vec<AirQualityRecord> {
        Enricher::new().enrich(measurements)
    }

    pub fn check(&self, records: &[AirQualityRecord]) -> IntegrityReport {
        IntegrityChecker::new().check_integrity(records)
    }

    pub fn analyze(&self, records: &[AirQualityRecord]) -> AnalysisReport {
        AirQualityAnalyzer::new(self.config.top_n, self.config.good_ratio_join).analyze(records)
    }

    /// Run every stage over an input file
    pub fn run(&self, input: &Path, progress: Option<&ProgressReporter>) -> Result<PipelineOutput> {
        if let Some(p) = progress {
            p.set_message("Reading measurements...");
        }
        let (measurements, load_report) = self.load(input)?;

        if measurements.is_empty() {
            return Err(ProcessingError::NoRecords {
                total_rows: load_report.total_rows,
            });
        }

        if let Some(p) = progress {
            p.set_message("Enriching records...");
        }
        let records = self.enrich(measurements);

        if let Some(p) = progress {
            p.set_message("Checking data integrity...");
        }
        let integrity_report = self.check(&records);
        if !integrity_report.violations.is_empty() {
            warn!(
                "{} integrity violations found (records kept)",
                integrity_report.violations.len()
            );
        }

        if let Some(p) = progress {
            p.set_message("Computing summaries...");
        }
        let report = self.analyze(&records);

        if let Some(p) = progress {
            p.finish_with_message(&format!("Processed {} records", records.len()));
        }
        info!(
            "Pipeline complete: {} records, {} districts",
            report.total_records, report.unique_districts
        );

        Ok(PipelineOutput {
            records,
            load_report,
            integrity_report,
            report,
        })
    }
}

impl Default for AirQualityPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
