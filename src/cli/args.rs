use crate::config::GoodRatioJoin;
use crate::utils::constants::{DEFAULT_HEAD_ROWS, DEFAULT_OUTPUT_FILE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airquality-processor")]
#[command(about = "Daily district air-quality (PM10/PM2.5) processor and reporter")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean, enrich and summarise a measurement CSV, then export it
    Analyze {
        #[arg(short, long, help = "Input measurement CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        #[arg(long, help = "Chart directory [default: directory of --output]")]
        charts_dir: Option<PathBuf>,

        #[arg(long, help = "Skip chart rendering")]
        no_charts: bool,

        #[arg(
            long,
            value_name = "FILE",
            num_args = 0..=1,
            help = "Also write Parquet [default file: --output with .parquet]"
        )]
        parquet: Option<Option<PathBuf>>,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(
            long,
            value_name = "FILE",
            num_args = 0..=1,
            help = "Also write a JSON summary [default file: --output with .json]"
        )]
        summary_json: Option<Option<PathBuf>>,

        #[arg(long, value_enum, help = "Districts listed in the good-ratio view")]
        good_ratio_join: Option<GoodRatioJoin>,

        #[arg(long, help = "Rows kept by the top-N rankings")]
        top_n: Option<usize>,
    },

    /// Load and check a measurement CSV without writing anything
    Validate {
        #[arg(short, long, help = "Input measurement CSV file")]
        input: PathBuf,
    },

    /// Display information about an exported CSV or Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_HEAD_ROWS)]
        sample: usize,
    },
}
