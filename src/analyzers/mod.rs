pub mod aggregator;
pub mod air_quality_analyzer;
pub mod ranker;

pub use aggregator::Aggregator;
pub use air_quality_analyzer::{format_records_head, AirQualityAnalyzer, AnalysisReport};
pub use ranker::Ranker;
