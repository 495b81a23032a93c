/// Candidate source headers per logical field (Korean export first, then the exported names)
pub const DATE_COLUMNS: &[&str] = &["날짜", "date"];
pub const DISTRICT_COLUMNS: &[&str] = &["측정소명", "district"];
pub const PM10_COLUMNS: &[&str] = &["미세먼지", "pm10"];
pub const PM25_COLUMNS: &[&str] = &["초미세먼지", "pm25"];

/// Pre-aggregated footer rows ("total", "average") found in the date column
pub const AGGREGATE_SENTINELS: &[&str] = &["전체", "평균", "total", "average"];

/// Encoding tried when the input is not valid UTF-8
pub const DEFAULT_LEGACY_ENCODING: &str = "euc-kr";
pub const ENCODING_AUTO: &str = "auto";

/// Accepted date layouts, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// PM10 grade thresholds (inclusive upper bounds, µg/m³)
pub const PM10_GOOD_MAX: f64 = 30.0;
pub const PM10_NORMAL_MAX: f64 = 80.0;
pub const PM10_BAD_MAX: f64 = 150.0;

/// Season month partition; every other month is winter
pub const SPRING_MONTHS: [u32; 2] = [3, 4];
pub const SUMMER_MONTHS: [u32; 4] = [5, 6, 7, 8];
pub const AUTUMN_MONTHS: [u32; 2] = [9, 10];

/// Ranking defaults
pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_HEAD_ROWS: usize = 5;

/// Output file names
pub const DEFAULT_OUTPUT_FILE: &str = "card_output.csv";
pub const DAILY_TREND_CHART_FILE: &str = "pm10_daily_trend.svg";
pub const SEASON_GRADE_CHART_FILE: &str = "pm10_grade_by_season.svg";

/// Column order of the exported CSV
pub const EXPORT_COLUMNS: [&str; 8] = [
    "date", "district", "pm10", "pm25", "month", "day", "season", "pm_grade",
];

/// Chart defaults
pub const DAILY_TREND_TITLE: &str = "Daily Trend of PM10 in Seoul, 2019";
pub const SEASON_GRADE_TITLE: &str = "Seasonal Distribution of PM10 Grades in Seoul, 2019";
pub const DAILY_TREND_SIZE: (u32, u32) = (1400, 500);
pub const SEASON_GRADE_SIZE: (u32, u32) = (1000, 600);

/// Parquet defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";

/// Days between 0001-01-01 (CE) and 1970-01-01, for Arrow Date32 values
pub const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// UTF-8 byte order mark written ahead of exported CSV files
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
