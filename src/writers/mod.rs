pub mod chart_renderer;
pub mod csv_writer;
pub mod parquet_writer;
pub mod summary_writer;

pub use chart_renderer::ChartRenderer;
pub use csv_writer::CsvWriter;
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};
pub use summary_writer::write_json_summary;
