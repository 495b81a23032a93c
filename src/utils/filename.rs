use std::path::{Path, PathBuf};

/// Directory holding `output`, or the current directory for a bare file name
pub fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Where charts go: the explicit directory if given, else next to the CSV output
pub fn chart_dir(output: &Path, charts_dir: Option<&Path>) -> PathBuf {
    charts_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_dir(output))
}

/// `card_output.csv` -> `card_output.<extension>` in the same directory
pub fn sibling_with_extension(output: &Path, extension: &str) -> PathBuf {
    output.with_extension(extension)
}
