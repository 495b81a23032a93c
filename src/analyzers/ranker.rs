use crate::models::{DistrictMean, GoodRatio, GradeShare, SeasonGradeShare, SeasonMean};

/// Sort-and-truncate rules for the summary views.
///
/// All sorts are stable, so ties keep the aggregator's order and ranking an
/// already-ranked table changes nothing.
pub struct Ranker {
    top_n: usize,
}

impl Ranker {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Highest mean PM10 first, truncated to `top_n`
    pub fn rank_district_means(&self, mut rows: Vec<DistrictMean>) -> Vec<DistrictMean> {
        rows.sort_by(|a, b| b.avg_pm10.total_cmp(&a.avg_pm10));
        rows.truncate(self.top_n);
        rows
    }

    /// Lowest mean PM10 first, full table
    pub fn rank_season_means(&self, mut rows: Vec<SeasonMean>) -> Vec<SeasonMean> {
        rows.sort_by(|a, b| a.avg_pm10.total_cmp(&b.avg_pm10));
        rows
    }

    /// Fixed grade order: good, normal, bad, worse
    pub fn rank_grade_distribution(&self, mut rows: Vec<GradeShare>) -> Vec<GradeShare> {
        rows.sort_by_key(|row| row.pm_grade);
        rows
    }

    /// Highest good share first, truncated to `top_n`
    pub fn rank_good_ratios(&self, mut rows: Vec<GoodRatio>) -> Vec<GoodRatio> {
        rows.sort_by(|a, b| b.pct.total_cmp(&a.pct));
        rows.truncate(self.top_n);
        rows
    }

    /// Fixed season order, then fixed grade order
    pub fn order_season_grades(&self, mut rows: Vec<SeasonGradeShare>) -> Vec<SeasonGradeShare> {
        rows.sort_by_key(|row| (row.season, row.pm_grade));
        rows
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(crate::utils::constants::DEFAULT_TOP_N)
    }
}
