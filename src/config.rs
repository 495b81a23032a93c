//! Pipeline configuration.
//!
//! Defaults are compiled in; a TOML/JSON/YAML file and `AIRQ_`-prefixed
//! environment variables are layered on top (e.g. `AIRQ_TOP_N=3`,
//! `AIRQ_CHARTS__TREND_TITLE=...`). CLI flags override the result.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    AGGREGATE_SENTINELS, DAILY_TREND_SIZE, DAILY_TREND_TITLE, DATE_COLUMNS, DEFAULT_TOP_N,
    DISTRICT_COLUMNS, ENCODING_AUTO, PM10_COLUMNS, PM25_COLUMNS, SEASON_GRADE_SIZE,
    SEASON_GRADE_TITLE,
};

pub const ENV_PREFIX: &str = "AIRQ";

/// How districts without a single good reading appear in the good-ratio view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GoodRatioJoin {
    /// Only districts with at least one good reading
    #[default]
    Inner,
    /// Every district; those without good readings report n = 0, pct = 0
    Left,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub date: Vec<String>,
    pub district: Vec<String>,
    pub pm10: Vec<String>,
    pub pm25: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            date: to_strings(DATE_COLUMNS),
            district: to_strings(DISTRICT_COLUMNS),
            pm10: to_strings(PM10_COLUMNS),
            pm25: to_strings(PM25_COLUMNS),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub trend_title: String,
    pub season_grade_title: String,
    pub trend_width: u32,
    pub trend_height: u32,
    pub season_grade_width: u32,
    pub season_grade_height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            trend_title: DAILY_TREND_TITLE.to_string(),
            season_grade_title: SEASON_GRADE_TITLE.to_string(),
            trend_width: DAILY_TREND_SIZE.0,
            trend_height: DAILY_TREND_SIZE.1,
            season_grade_width: SEASON_GRADE_SIZE.0,
            season_grade_height: SEASON_GRADE_SIZE.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub columns: ColumnConfig,
    pub sentinels: Vec<String>,
    /// `auto` (UTF-8, falling back to EUC-KR) or any WHATWG encoding label
    pub encoding: String,
    pub top_n: usize,
    pub good_ratio_join: GoodRatioJoin,
    pub charts: ChartConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            columns: ColumnConfig::default(),
            sentinels: to_strings(AGGREGATE_SENTINELS),
            encoding: ENCODING_AUTO.to_string(),
            top_n: DEFAULT_TOP_N,
            good_ratio_join: GoodRatioJoin::default(),
            charts: ChartConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Build the configuration from defaults, an optional file, and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from_sources(path, environment())
    }

    fn load_from_sources(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(env);

        let config: PipelineConfig = builder.build()?.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_good_ratio_join(mut self, join: GoodRatioJoin) -> Self {
        self.good_ratio_join = join;
        self
    }

    /// Reject settings the pipeline cannot run with
    pub fn check(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(ProcessingError::Config(
                "top_n must be at least 1".to_string(),
            ));
        }

        let columns = [
            ("date", &self.columns.date),
            ("district", &self.columns.district),
            ("pm10", &self.columns.pm10),
            ("pm25", &self.columns.pm25),
        ];
        for (field, candidates) in columns {
            if candidates.iter().all(|c| c.trim().is_empty()) {
                return Err(ProcessingError::Config(format!(
                    "No header candidates configured for column '{}'",
                    field
                )));
            }
        }

        if self.encoding != ENCODING_AUTO
            && encoding_rs::Encoding::for_label(self.encoding.as_bytes()).is_none()
        {
            return Err(ProcessingError::Config(format!(
                "Unknown encoding label: {}",
                self.encoding
            )));
        }

        Ok(())
    }
}

/// `AIRQ_TOP_N`, `AIRQ_CHARTS__TREND_TITLE`, ...
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
