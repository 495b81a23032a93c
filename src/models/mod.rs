pub mod grade;
pub mod measurement;
pub mod season;
pub mod summary;

pub use grade::PmGrade;
pub use measurement::{AirQualityRecord, Measurement};
pub use season::Season;
pub use summary::{
    DailyMean, DistrictMean, GoodRatio, GradeShare, MaxEvent, SeasonGradeShare, SeasonMean,
};
