pub mod constants;
pub mod filename;
pub mod logging;
pub mod numeric;
pub mod progress;

pub use constants::*;
pub use filename::{chart_dir, output_dir, sibling_with_extension};
pub use logging::init_logging;
pub use numeric::{percentage, round2, MeanAccumulator};
pub use progress::ProgressReporter;
