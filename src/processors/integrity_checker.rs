use crate::models::AirQualityRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone)]
pub struct IntegrityReport {
    pub total_records: usize,
    pub duplicate_records: usize,
    pub violations: Vec<IntegrityViolation>,
    pub district_statistics: BTreeMap<String, DistrictStatistics>,
}

#[derive(Debug, Clone)]
pub struct IntegrityViolation {
    pub district: String,
    pub date: NaiveDate,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    DuplicateMeasurement,
    FineExceedsCoarse,
}

#[derive(Debug, Clone, Default)]
pub struct DistrictStatistics {
    pub total_records: usize,
    pub min_pm10: Option<f64>,
    pub max_pm10: Option<f64>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Flags suspect records without removing them.
pub struct IntegrityChecker;

impl IntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check_integrity(&self, records: &[AirQualityRecord]) -> IntegrityReport {
        let mut report = IntegrityReport {
            total_records: records.len(),
            duplicate_records: 0,
            violations: Vec::new(),
            district_statistics: BTreeMap::new(),
        };

        let mut seen: HashSet<(NaiveDate, &str)> = HashSet::with_capacity(records.len());

        for record in records {
            if !seen.insert((record.date, record.district.as_str())) {
                report.duplicate_records += 1;
                report.violations.push(IntegrityViolation {
                    district: record.district.clone(),
                    date: record.date,
                    violation_type: ViolationType::DuplicateMeasurement,
                    details: "more than one measurement for this district and date".to_string(),
                });
            }

            // PM2.5 is a subset of PM10
            if record.pm25 > record.pm10 {
                report.violations.push(IntegrityViolation {
                    district: record.district.clone(),
                    date: record.date,
                    violation_type: ViolationType::FineExceedsCoarse,
                    details: format!("PM2.5 {} exceeds PM10 {}", record.pm25, record.pm10),
                });
            }

            let stats = report
                .district_statistics
                .entry(record.district.clone())
                .or_default();

            stats.total_records += 1;
            stats.min_pm10 = Some(stats.min_pm10.map_or(record.pm10, |v| v.min(record.pm10)));
            stats.max_pm10 = Some(stats.max_pm10.map_or(record.pm10, |v| v.max(record.pm10)));
            stats.first_date = Some(stats.first_date.map_or(record.date, |d| d.min(record.date)));
            stats.last_date = Some(stats.last_date.map_or(record.date, |d| d.max(record.date)));
        }

        report
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Districts: {}\n",
            report.district_statistics.len()
        ));
        summary.push_str(&format!(
            "Duplicate Measurements: {}\n",
            report.duplicate_records
        ));
        summary.push_str(&format!("Violations: {}\n", report.violations.len()));

        if !report.violations.is_empty() {
            summary.push_str("\nTop 10 Violations:\n");
            for (i, violation) in report.violations.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. {} on {}: {}\n",
                    i + 1,
                    violation.district,
                    violation.date,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}
