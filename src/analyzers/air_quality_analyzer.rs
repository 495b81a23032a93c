use crate::analyzers::{Aggregator, Ranker};
use crate::config::GoodRatioJoin;
use crate::models::{
    AirQualityRecord, DailyMean, DistrictMean, GoodRatio, GradeShare, MaxEvent, SeasonGradeShare,
    SeasonMean,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Every summary view of one run, already ranked
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub total_records: usize,
    pub unique_districts: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub overall_mean_pm10: Option<f64>,
    pub max_pm10_events: Vec<MaxEvent>,
    pub top_districts: Vec<DistrictMean>,
    pub season_means: Vec<SeasonMean>,
    pub grade_distribution: Vec<GradeShare>,
    pub good_ratio_join: GoodRatioJoin,
    pub top_good_ratios: Vec<GoodRatio>,
    pub daily_means: Vec<DailyMean>,
    pub season_grades: Vec<SeasonGradeShare>,
}

/// Runs the aggregator and ranker over an enriched record slice.
pub struct AirQualityAnalyzer {
    ranker: Ranker,
    join: GoodRatioJoin,
}

impl AirQualityAnalyzer {
    pub fn new(top_n: usize, join: GoodRatioJoin) -> Self {
        Self {
            ranker: Ranker::new(top_n),
            join,
        }
    }

    pub fn analyze(&self, records: &[AirQualityRecord]) -> AnalysisReport {
        let aggregator = Aggregator::new(records);
        let district_means = aggregator.mean_pm10_by_district();
        let unique_districts = district_means.len();

        let date_range = records
            .iter()
            .map(|r| r.date)
            .min()
            .zip(records.iter().map(|r| r.date).max());

        let report = AnalysisReport {
            total_records: aggregator.total_records(),
            unique_districts,
            date_range,
            overall_mean_pm10: aggregator.overall_mean_pm10(),
            max_pm10_events: aggregator.max_pm10_events(),
            top_districts: self.ranker.rank_district_means(district_means),
            season_means: self.ranker.rank_season_means(aggregator.mean_by_season()),
            grade_distribution: self
                .ranker
                .rank_grade_distribution(aggregator.grade_distribution()),
            good_ratio_join: self.join,
            top_good_ratios: self
                .ranker
                .rank_good_ratios(aggregator.good_ratio_by_district(self.join)),
            daily_means: aggregator.daily_mean_pm10(),
            season_grades: self
                .ranker
                .order_season_grades(aggregator.season_grade_distribution()),
        };

        debug!(
            "Analyzed {} records across {} districts",
            report.total_records, report.unique_districts
        );
        report
    }
}

impl Default for AirQualityAnalyzer {
    fn default() -> Self {
        Self::new(crate::utils::constants::DEFAULT_TOP_N, GoodRatioJoin::default())
    }
}

impl AnalysisReport {
    pub fn summary(&self) -> String {
        let date_range = match self.date_range {
            Some((first, last)) => format!("{} to {}", first, last),
            None => "No records".to_string(),
        };

        format!(
            "Air Quality Parameters: PM10, PM2.5\n\
            Districts: {} districts\n\
            Date Range: {}\n\
            Records: {} total",
            self.unique_districts, date_range, self.total_records
        )
    }

    /// All views in pipeline order
    pub fn detailed_summary(&self) -> String {
        let mut out = String::new();

        out.push_str(&self.summary());
        out.push_str("\n\n");

        match self.overall_mean_pm10 {
            Some(mean) => out.push_str(&format!("Annual mean PM10: {:.4}\n", mean)),
            None => out.push_str("Annual mean PM10: No valid measurements\n"),
        }

        out.push_str("\nMaximum PM10 events:\n");
        out.push_str(&format!("{:<12} {:<16} {:>8}\n", "date", "district", "pm10"));
        for event in &self.max_pm10_events {
            out.push_str(&format!(
                "{:<12} {:<16} {:>8.1}\n",
                event.date.to_string(),
                event.district,
                event.pm10
            ));
        }

        out.push_str(&format!(
            "\nTop {} districts by mean PM10:\n",
            self.top_districts.len()
        ));
        out.push_str(&format!("{:<16} {:>10}\n", "district", "avg_pm10"));
        for row in &self.top_districts {
            out.push_str(&format!("{:<16} {:>10.2}\n", row.district, row.avg_pm10));
        }

        out.push_str("\nSeasonal mean PM10/PM2.5 (ascending PM10):\n");
        out.push_str(&format!("{:<8} {:>10} {:>10}\n", "season", "avg_pm10", "avg_pm25"));
        for row in &self.season_means {
            out.push_str(&format!(
                "{:<8} {:>10.2} {:>10.2}\n",
                row.season.as_str(),
                row.avg_pm10,
                row.avg_pm25
            ));
        }

        out.push_str("\nPM10 grade distribution:\n");
        out.push_str(&format!("{:<8} {:>8} {:>8}\n", "pm_grade", "n", "pct"));
        for row in &self.grade_distribution {
            out.push_str(&format!(
                "{:<8} {:>8} {:>8.2}\n",
                row.pm_grade.as_str(),
                row.n,
                row.pct
            ));
        }

        out.push_str(&format!(
            "\nTop {} districts by share of good days:\n",
            self.top_good_ratios.len()
        ));
        out.push_str(&format!("{:<16} {:>6} {:>8}\n", "district", "n", "pct"));
        for row in &self.top_good_ratios {
            out.push_str(&format!("{:<16} {:>6} {:>8.2}\n", row.district, row.n, row.pct));
        }

        out
    }
}

/// The first `limit` enriched records as a table
pub fn format_records_head(records: &[AirQualityRecord], limit: usize) -> String {
    let mut out = format!(
        "{:<12} {:<16} {:>8} {:>8} {:>5} {:>4} {:<8} {:<8}\n",
        "date", "district", "pm10", "pm25", "month", "day", "season", "pm_grade"
    );

    for record in records.iter().take(limit) {
        out.push_str(&format!(
            "{:<12} {:<16} {:>8.1} {:>8.1} {:>5} {:>4} {:<8} {:<8}\n",
            record.date.to_string(),
            record.district,
            record.pm10,
            record.pm25,
            record.month,
            record.day,
            record.season.as_str(),
            record.pm_grade.as_str()
        ));
    }

    out
}
