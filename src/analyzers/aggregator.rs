//! Summary views over the enriched record slice.
//!
//! Every view is an independent pass over the records; none depends on
//! another. Groups come out in key order: districts lexically, seasons and
//! grades in their fixed presentation order.

use crate::config::GoodRatioJoin;
use crate::models::{
    AirQualityRecord, DailyMean, DistrictMean, GoodRatio, GradeShare, MaxEvent, PmGrade, Season,
    SeasonGradeShare, SeasonMean,
};
use crate::utils::numeric::{percentage, MeanAccumulator};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct Aggregator<'a> {
    records: &'a [AirQualityRecord],
}

impl<'a> Aggregator<'a> {
    pub fn new(records: &'a [AirQualityRecord]) -> Self {
        Self { records }
    }

    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    /// Mean PM10 over all records; `None` when there are none
    pub fn overall_mean_pm10(&self) -> Option<f64> {
        let mut acc = MeanAccumulator::default();
        for record in self.records {
            acc.push(record.pm10);
        }
        acc.mean()
    }

    /// Every record at the dataset's maximum PM10, in input order
    pub fn max_pm10_events(&self) -> Vec<MaxEvent> {
        let Some(max) = self.records.iter().map(|r| r.pm10).reduce(f64::max) else {
            return Vec::new();
        };

        self.records
            .iter()
            .filter(|r| r.pm10 == max)
            .map(|r| MaxEvent {
                date: r.date,
                district: r.district.clone(),
                pm10: r.pm10,
            })
            .collect()
    }

    pub fn mean_pm10_by_district(&self) -> Vec<DistrictMean> {
        let mut groups: BTreeMap<&str, MeanAccumulator> = BTreeMap::new();
        for record in self.records {
            groups
                .entry(record.district.as_str())
                .or_default()
                .push(record.pm10);
        }

        groups
            .into_iter()
            .filter_map(|(district, acc)| {
                acc.mean().map(|avg_pm10| DistrictMean {
                    district: district.to_string(),
                    avg_pm10,
                })
            })
            .collect()
    }

    pub fn mean_by_season(&self) -> Vec<SeasonMean> {
        let mut groups: BTreeMap<Season, (MeanAccumulator, MeanAccumulator)> = BTreeMap::new();
        for record in self.records {
            let (pm10, pm25) = groups.entry(record.season).or_default();
            pm10.push(record.pm10);
            pm25.push(record.pm25);
        }

        groups
            .into_iter()
            .filter_map(|(season, (pm10, pm25))| {
                Some(SeasonMean {
                    season,
                    avg_pm10: pm10.mean()?,
                    avg_pm25: pm25.mean()?,
                })
            })
            .collect()
    }

    /// Grades present in the data, with share of the total record count
    pub fn grade_distribution(&self) -> Vec<GradeShare> {
        let total = self.records.len();
        let mut counts: BTreeMap<PmGrade, usize> = BTreeMap::new();
        for record in self.records {
            *counts.entry(record.pm_grade).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(pm_grade, n)| GradeShare {
                pm_grade,
                n,
                pct: percentage(n, total),
            })
            .collect()
    }

    /// Good-graded share of each district's records.
    ///
    /// With `GoodRatioJoin::Inner` a district without any good record is
    /// absent; with `GoodRatioJoin::Left` it is reported with `n = 0`.
    pub fn good_ratio_by_district(&self, join: GoodRatioJoin) -> Vec<GoodRatio> {
        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        let mut good: BTreeMap<&str, usize> = BTreeMap::new();

        for record in self.records {
            let district = record.district.as_str();
            *totals.entry(district).or_default() += 1;
            if record.is_good() {
                *good.entry(district).or_default() += 1;
            }
        }

        totals
            .into_iter()
            .filter_map(|(district, total)| {
                let n = match (good.get(district), join) {
                    (Some(&n), _) => n,
                    (None, GoodRatioJoin::Left) => 0,
                    (None, GoodRatioJoin::Inner) => return None,
                };
                Some(GoodRatio {
                    district: district.to_string(),
                    n,
                    total,
                    pct: percentage(n, total),
                })
            })
            .collect()
    }

    /// Mean PM10 across districts per date, oldest first
    pub fn daily_mean_pm10(&self) -> Vec<DailyMean> {
        let mut groups: BTreeMap<NaiveDate, MeanAccumulator> = BTreeMap::new();
        for record in self.records {
            groups.entry(record.date).or_default().push(record.pm10);
        }

        groups
            .into_iter()
            .filter_map(|(date, acc)| acc.mean().map(|avg_pm10| DailyMean { date, avg_pm10 }))
            .collect()
    }

    /// Grade shares within each season (percent of that season's records)
    pub fn season_grade_distribution(&self) -> Vec<SeasonGradeShare> {
        let mut season_totals: BTreeMap<Season, usize> = BTreeMap::new();
        let mut counts: BTreeMap<(Season, PmGrade), usize> = BTreeMap::new();

        for record in self.records {
            *season_totals.entry(record.season).or_default() += 1;
            *counts.entry((record.season, record.pm_grade)).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|((season, pm_grade), n)| {
                let total = season_totals.get(&season).copied().unwrap_or(0);
                SeasonGradeShare {
                    season,
                    pm_grade,
                    n,
                    total,
                    pct: percentage(n, total),
                }
            })
            .collect()
    }
}
