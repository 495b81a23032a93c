//! Row types of the derived summary views.
//!
//! Each view is a plain `Vec` of one of these rows, recomputed from the
//! enriched record slice on every run.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{PmGrade, Season};

/// A record whose PM10 equals the dataset maximum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaxEvent {
    pub date: NaiveDate,
    pub district: String,
    pub pm10: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictMean {
    pub district: String,
    pub avg_pm10: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonMean {
    pub season: Season,
    pub avg_pm10: f64,
    pub avg_pm25: f64,
}

/// Share of all records falling into one grade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeShare {
    pub pm_grade: PmGrade,
    pub n: usize,
    pub pct: f64,
}

/// Share of a district's records graded good
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoodRatio {
    pub district: String,
    pub n: usize,
    pub total: usize,
    pub pct: f64,
}

/// Mean PM10 over every district for one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub avg_pm10: f64,
}

/// Share of one season's records falling into one grade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonGradeShare {
    pub season: Season,
    pub pm_grade: PmGrade,
    pub n: usize,
    pub total: usize,
    pub pct: f64,
}
