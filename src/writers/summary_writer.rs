use crate::analyzers::AnalysisReport;
use crate::error::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Write the analysis report as pretty-printed JSON
pub fn write_json_summary(report: &AnalysisReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;

    info!("Wrote JSON summary to {}", path.display());
    Ok(())
}
