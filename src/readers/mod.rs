pub mod column_mapping;
pub mod measurement_reader;

pub use column_mapping::ColumnMapping;
pub use measurement_reader::{parse_date, parse_reading, LoadReport, MeasurementReader};
