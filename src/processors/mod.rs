pub mod enricher;
pub mod integrity_checker;
pub mod pipeline;

pub use enricher::Enricher;
pub use integrity_checker::{
    DistrictStatistics, IntegrityChecker, IntegrityReport, IntegrityViolation, ViolationType,
};
pub use pipeline::{AirQualityPipeline, PipelineOutput};
