use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{PmGrade, Season};

/// A cleaned measurement: one district's daily PM10/PM2.5 reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Measurement {
    pub date: NaiveDate,

    #[validate(length(min = 1))]
    pub district: String,

    #[validate(range(min = 0.0))]
    pub pm10: f64,

    #[validate(range(min = 0.0))]
    pub pm25: f64,
}

impl Measurement {
    pub fn new(date: NaiveDate, district: String, pm10: f64, pm25: f64) -> Self {
        Self {
            date,
            district,
            pm10,
            pm25,
        }
    }
}

/// A measurement with its calendar, season and grade columns derived.
///
/// Field order is the column order of the exported CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityRecord {
    pub date: NaiveDate,
    pub district: String,
    pub pm10: f64,
    pub pm25: f64,
    pub month: u32,
    pub day: u32,
    pub season: Season,
    pub pm_grade: PmGrade,
}

impl AirQualityRecord {
    pub fn from_measurement(measurement: Measurement) -> Self {
        let month = measurement.date.month();
        let day = measurement.date.day();

        Self {
            season: Season::from_month(month),
            pm_grade: PmGrade::from_pm10(measurement.pm10),
            date: measurement.date,
            district: measurement.district,
            pm10: measurement.pm10,
            pm25: measurement.pm25,
            month,
            day,
        }
    }

    pub fn measurement(&self) -> Measurement {
        Measurement::new(self.date, self.district.clone(), self.pm10, self.pm25)
    }

    pub fn is_good(&self) -> bool {
        self.pm_grade == PmGrade::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_validation() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 15).unwrap();

        let valid = Measurement::new(date, "Gangnam".to_string(), 45.0, 20.0);
        assert!(valid.validate().is_ok());

        let negative = Measurement::new(date, "Gangnam".to_string(), -1.0, 20.0);
        assert!(negative.validate().is_err());

        let unnamed = Measurement::new(date, String::new(), 45.0, 20.0);
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_enrichment_from_measurement() {
        let date = NaiveDate::from_ymd_opt(2019, 8, 3).unwrap();
        let record =
            AirQualityRecord::from_measurement(Measurement::new(date, "마포구".to_string(), 31.0, 12.0));

        assert_eq!(record.month, 8);
        assert_eq!(record.day, 3);
        assert_eq!(record.season, Season::Summer);
        assert_eq!(record.pm_grade, PmGrade::Normal);
        assert_eq!(record.district, "마포구");
        assert!(!record.is_good());
    }
}
