use crate::error::{ProcessingError, Result};
use crate::models::{AirQualityRecord, PmGrade, Season};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE, UNIX_EPOCH_DAYS_FROM_CE,
};
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    /// Write enriched records to a Parquet file, replacing any existing file
    pub fn write_records(&self, records: &[AirQualityRecord], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let schema = self.create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
        for chunk in records.chunks(self.row_group_size) {
            let batch = self.records_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }
        writer.close()?;

        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    /// Arrow schema mirroring the exported CSV columns
    fn create_schema(&self) -> Arc<Schema> {
        let fields = vec![
            Field::new("date", DataType::Date32, false),
            Field::new("district", DataType::Utf8, false),
            Field::new("pm10", DataType::Float64, false),
            Field::new("pm25", DataType::Float64, false),
            Field::new("month", DataType::UInt32, false),
            Field::new("day", DataType::UInt32, false),
            Field::new("season", DataType::Utf8, false),
            Field::new("pm_grade", DataType::Utf8, false),
        ];

        Arc::new(Schema::new(fields))
    }

    fn records_to_batch(
        &self,
        records: &[AirQualityRecord],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let dates: Vec<i32> = records
            .iter()
            .map(|r| r.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            .collect();
        let districts: Vec<&str> = records.iter().map(|r| r.district.as_str()).collect();
        let pm10: Vec<f64> = records.iter().map(|r| r.pm10).collect();
        let pm25: Vec<f64> = records.iter().map(|r| r.pm25).collect();
        let months: Vec<u32> = records.iter().map(|r| r.month).collect();
        let days: Vec<u32> = records.iter().map(|r| r.day).collect();
        let seasons: Vec<&str> = records.iter().map(|r| r.season.as_str()).collect();
        let grades: Vec<&str> = records.iter().map(|r| r.pm_grade.as_str()).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(Date32Array::from(dates)),
            Arc::new(StringArray::from(districts)),
            Arc::new(Float64Array::from(pm10)),
            Arc::new(Float64Array::from(pm25)),
            Arc::new(UInt32Array::from(months)),
            Arc::new(UInt32Array::from(days)),
            Arc::new(StringArray::from(seasons)),
            Arc::new(StringArray::from(grades)),
        ];
        let batch = RecordBatch::try_new(schema, columns)?;

        Ok(batch)
    }

    /// Read up to `limit` records back (0 = all)
    pub fn read_records(&self, path: &Path, limit: usize) -> Result<Vec<AirQualityRecord>> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let mut records = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;

            let dates = typed_column::<Date32Array>(&batch, 0, "date")?;
            let districts = typed_column::<StringArray>(&batch, 1, "district")?;
            let pm10 = typed_column::<Float64Array>(&batch, 2, "pm10")?;
            let pm25 = typed_column::<Float64Array>(&batch, 3, "pm25")?;
            let months = typed_column::<UInt32Array>(&batch, 4, "month")?;
            let days = typed_column::<UInt32Array>(&batch, 5, "day")?;
            let seasons = typed_column::<StringArray>(&batch, 6, "season")?;
            let grades = typed_column::<StringArray>(&batch, 7, "pm_grade")?;

            for i in 0..batch.num_rows() {
                if limit > 0 && records.len() >= limit {
                    return Ok(records);
                }

                let date = dates
                    .value(i)
                    .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
                    .and_then(NaiveDate::from_num_days_from_ce_opt)
                    .ok_or_else(|| {
                        ProcessingError::InvalidFormat(format!(
                            "Invalid date value: {}",
                            dates.value(i)
                        ))
                    })?;

                records.push(AirQualityRecord {
                    date,
                    district: districts.value(i).to_string(),
                    pm10: pm10.value(i),
                    pm25: pm25.value(i),
                    month: months.value(i),
                    day: days.value(i),
                    season: seasons.value(i).parse::<Season>()?,
                    pm_grade: grades.value(i).parse::<PmGrade>()?,
                });
            }
        }

        Ok(records)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();
        let compression = if row_groups > 0 && metadata.row_group(0).num_columns() > 0 {
            metadata.row_group(0).column(0).compression()
        } else {
            self.compression
        };

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            file_size,
            compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn typed_column<'b, T: 'static>(batch: &'b RecordBatch, index: usize, name: &str) -> Result<&'b T> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ProcessingError::InvalidFormat(format!("Invalid {} column type", name)))
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn sample_records() -> Vec<AirQualityRecord> {
        [
            (2019, 1, 15, "강남구", 45.0, 20.0),
            (2019, 1, 15, "종로구", 95.0, 55.0),
            (2019, 9, 3, "마포구", 18.5, 7.25),
        ]
        .into_iter()
        .map(|(y, m, d, district, pm10, pm25)| {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            AirQualityRecord::from_measurement(Measurement::new(
                date,
                district.to_string(),
                pm10,
                pm25,
            ))
        })
        .collect()
    }

    #[test]
    fn test_write_and_read_back() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;
        let records = sample_records();

        writer.write_records(&records, temp_file.path())?;

        let read_back = writer.read_records(temp_file.path(), 0)?;
        assert_eq!(read_back, records);

        let limited = writer.read_records(temp_file.path(), 2)?;
        assert_eq!(limited.len(), 2);

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 3);
        assert!(info.summary().contains("Total rows: 3"));

        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        let compressions = [
            COMPRESSION_SNAPPY,
            COMPRESSION_GZIP,
            COMPRESSION_LZ4,
            COMPRESSION_ZSTD,
            COMPRESSION_NONE,
        ];

        for compression in &compressions {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_file = NamedTempFile::new()?;

            let result = writer.write_records(&sample_records(), temp_file.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }

        assert!(ParquetWriter::new().with_compression("brotli9").is_err());
        Ok(())
    }

    #[test]
    fn test_small_row_groups() -> Result<()> {
        let writer = ParquetWriter::new().with_row_group_size(2);
        let temp_file = NamedTempFile::new()?;
        let records = sample_records();

        writer.write_records(&records, temp_file.path())?;

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.row_groups, 2);
        assert_eq!(writer.read_records(temp_file.path(), 0)?, records);

        Ok(())
    }

    #[test]
    fn test_zero_row_group_size_is_clamped() -> Result<()> {
        let writer = ParquetWriter::new().with_row_group_size(0);
        let temp_file = NamedTempFile::new()?;

        writer.write_records(&sample_records(), temp_file.path())?;

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 3);
        assert_eq!(info.row_groups, 3);

        Ok(())
    }

    #[test]
    fn test_out_of_range_date_rejected() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;

        let schema = writer.create_schema();
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Date32Array::from(vec![i32::MAX - 10])),
            Arc::new(StringArray::from(vec!["강남구"])),
            Arc::new(Float64Array::from(vec![45.0])),
            Arc::new(Float64Array::from(vec![20.0])),
            Arc::new(UInt32Array::from(vec![1u32])),
            Arc::new(UInt32Array::from(vec![15u32])),
            Arc::new(StringArray::from(vec!["winter"])),
            Arc::new(StringArray::from(vec!["normal"])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns)?;

        let mut file_writer = ArrowWriter::try_new(File::create(temp_file.path())?, schema, None)?;
        file_writer.write(&batch)?;
        file_writer.close()?;

        let err = writer.read_records(temp_file.path(), 0).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidFormat(_)));

        Ok(())
    }

    #[test]
    fn test_write_empty_records() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;

        writer.write_records(&[], temp_file.path())?;
        assert_eq!(writer.get_file_info(temp_file.path())?.total_rows, 0);

        Ok(())
    }
}
