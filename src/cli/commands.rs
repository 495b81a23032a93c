use crate::analyzers::{format_records_head, AirQualityAnalyzer};
use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::AirQualityRecord;
use crate::processors::{AirQualityPipeline, Enricher, IntegrityChecker};
use crate::readers::MeasurementReader;
use crate::utils::constants::DEFAULT_HEAD_ROWS;
use crate::utils::filename::{chart_dir, sibling_with_extension};
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::writers::{write_json_summary, ChartRenderer, CsvWriter, ParquetWriter};
use std::path::Path;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = PipelineConfig::load(cli.config.as_deref())?;
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Analyze {
            input,
            output,
            charts_dir,
            no_charts,
            parquet,
            compression,
            summary_json,
            good_ratio_join,
            top_n,
        } => {
            let mut config = config;
            if let Some(n) = top_n {
                config = config.with_top_n(n);
            }
            if let Some(join) = good_ratio_join {
                config = config.with_good_ratio_join(join);
            }
            config.check()?;

            // Fail on a bad codec before doing any work
            let parquet_writer = ParquetWriter::new().with_compression(&compression)?;

            println!("Processing air-quality data...");
            println!("Input file: {}", input.display());
            println!("Output file: {}", output.display());

            let charts = config.charts.clone();
            let pipeline = AirQualityPipeline::new(config);

            let progress = ProgressReporter::new_spinner("Processing data...", false);
            let result = pipeline.run(&input, Some(&progress))?;
            drop(progress);

            println!("\n{}", result.load_report.summary());
            println!("First {} records:", DEFAULT_HEAD_ROWS.min(result.records.len()));
            println!("{}", format_records_head(&result.records, DEFAULT_HEAD_ROWS));
            println!("{}", result.report.detailed_summary());

            CsvWriter::new().write_records(&result.records, &output)?;
            println!("Wrote {} records to {}", result.records.len(), output.display());

            if let Some(path) = parquet {
                let path = path.unwrap_or_else(|| sibling_with_extension(&output, "parquet"));
                parquet_writer.write_records(&result.records, &path)?;
                println!("\n{}", parquet_writer.get_file_info(&path)?.summary());
            }

            if let Some(path) = summary_json {
                let path = path.unwrap_or_else(|| sibling_with_extension(&output, "json"));
                write_json_summary(&result.report, &path)?;
                println!("Wrote JSON summary to {}", path.display());
            }

            if no_charts {
                info!("Chart rendering skipped");
            } else {
                let dir = chart_dir(&output, charts_dir.as_deref());
                let written = ChartRenderer::new(charts).render_all(&result.report, &dir)?;
                for path in written {
                    println!("Wrote chart {}", path.display());
                }
            }

            println!("Processing complete!");
        }

        Commands::Validate { input } => {
            println!("Validating air-quality data...");
            println!("Input file: {}", input.display());

            let pipeline = AirQualityPipeline::new(config);
            let (measurements, load_report) = pipeline.load(&input)?;
            let records = pipeline.enrich(measurements);
            let integrity_report = pipeline.check(&records);

            println!("\n{}", load_report.summary());
            println!("{}", IntegrityChecker::new().generate_summary(&integrity_report));

            if records.is_empty() {
                println!("⚠️  No usable records in input");
            } else if integrity_report.violations.is_empty() {
                println!("✅ All data passed validation checks");
            } else {
                println!(
                    "⚠️  Found {} validation issues",
                    integrity_report.violations.len()
                );
            }
        }

        Commands::Info { file, sample } => {
            println!("Analyzing file: {}", file.display());

            let records = if is_parquet(&file) {
                let writer = ParquetWriter::new();
                let file_info = writer.get_file_info(&file)?;
                println!("\nFile Details:");
                println!("{}", file_info.summary());
                writer.read_records(&file, 0)?
            } else {
                let (measurements, load_report) =
                    MeasurementReader::from_config(&config).read_measurements(&file)?;
                println!("\n{}", load_report.summary());
                Enricher::new().enrich(measurements)
            };

            print_info(&records, &config, sample);
        }
    }

    Ok(())
}

fn is_parquet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"))
}

fn print_info(records: &[AirQualityRecord], config: &PipelineConfig, sample: usize) {
    let report = AirQualityAnalyzer::new(config.top_n, config.good_ratio_join).analyze(records);
    println!("\n{}", report.summary());

    if sample > 0 {
        println!("\nSample Records (showing {} records):", sample.min(records.len()));
        println!("{}", format_records_head(records, sample));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_parquet() {
        assert!(is_parquet(Path::new("out/card_output.parquet")));
        assert!(is_parquet(Path::new("DATA.PARQUET")));
        assert!(!is_parquet(Path::new("card_output.csv")));
        assert!(!is_parquet(Path::new("parquet")));
    }
}
