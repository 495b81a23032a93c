//! SVG charts for the daily PM10 trend and the seasonal grade shares.

use crate::analyzers::AnalysisReport;
use crate::config::ChartConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{DailyMean, PmGrade, Season, SeasonGradeShare};
use crate::utils::constants::{DAILY_TREND_CHART_FILE, SEASON_GRADE_CHART_FILE};
use chrono::Duration;
use plotters::prelude::*;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::info;

const FONT: &str = "sans-serif";
const BAR_WIDTH: f64 = 0.2;
const LEGEND_TITLE: &str = "PM10 Grade";
const LEGEND_WIDTH: i32 = 120;
const LEGEND_TOP: i32 = 30;

pub struct ChartRenderer {
    config: ChartConfig,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Render both charts into `dir`, returning the written paths
    pub fn render_all(&self, report: &AnalysisReport, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }

        let trend_path = dir.join(DAILY_TREND_CHART_FILE);
        self.render_daily_trend(&report.daily_means, &trend_path)?;

        let season_path = dir.join(SEASON_GRADE_CHART_FILE);
        self.render_season_grades(&report.season_grades, &season_path)?;

        Ok(vec![trend_path, season_path])
    }

    /// Line chart of mean daily PM10 over time
    pub fn render_daily_trend(&self, daily: &[DailyMean], path: &Path) -> Result<()> {
        let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
            return Err(ProcessingError::Chart(
                "No daily values to plot".to_string(),
            ));
        };
        let start = first.date;
        let span = ((last.date - start).num_days() as f64).max(1.0);
        let y_max = daily.iter().map(|d| d.avg_pm10).fold(0.0, f64::max).max(1.0) * 1.1;

        let root = SVGBackend::new(path, (self.config.trend_width, self.config.trend_height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.config.trend_title, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..span, 0f64..y_max)
            .map_err(chart_error)?;

        let date_label = |x: &f64| {
            (start + Duration::days(x.round() as i64))
                .format("%Y-%m-%d")
                .to_string()
        };
        chart
            .configure_mesh()
            .x_labels(12)
            .x_label_formatter(&date_label)
            .x_desc("Date")
            .y_desc("PM10")
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(LineSeries::new(
                daily
                    .iter()
                    .map(|d| ((d.date - start).num_days() as f64, d.avg_pm10)),
                BLUE.stroke_width(2),
            ))
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
        info!("Rendered daily trend chart to {}", path.display());
        Ok(())
    }

    /// Grouped bars: seasons on the x axis, one bar per grade
    pub fn render_season_grades(&self, shares: &[SeasonGradeShare], path: &Path) -> Result<()> {
        if shares.is_empty() {
            return Err(ProcessingError::Chart(
                "No season/grade shares to plot".to_string(),
            ));
        }

        let pct: HashMap<(Season, PmGrade), f64> = shares
            .iter()
            .map(|s| ((s.season, s.pm_grade), s.pct))
            .collect();
        let y_max = (shares.iter().map(|s| s.pct).fold(0.0, f64::max) * 1.15).clamp(1.0, 100.0);

        let root = SVGBackend::new(
            path,
            (
                self.config.season_grade_width,
                self.config.season_grade_height,
            ),
        )
        .into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        // Season i is centred on x = i
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.config.season_grade_title, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..3.5f64, 0f64..y_max)
            .map_err(chart_error)?;

        let season_label = |x: &f64| {
            let i = x.round();
            if (x - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            Season::ALL
                .get(i as usize)
                .map(|s| s.as_str().to_string())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(5)
            .x_label_formatter(&season_label)
            .x_desc("Season")
            .y_desc("Percentage (%)")
            .draw()
            .map_err(chart_error)?;

        for grade in PmGrade::ALL {
            let color = grade_color(grade);
            let bars: Vec<Rectangle<(f64, f64)>> = Season::ALL
                .iter()
                .map(|season| {
                    let x0 = season.index() as f64 - 2.0 * BAR_WIDTH
                        + grade.index() as f64 * BAR_WIDTH;
                    let height = pct.get(&(*season, grade)).copied().unwrap_or(0.0);
                    Rectangle::new([(x0, 0.0), (x0 + BAR_WIDTH, height)], color.filled())
                })
                .collect();

            chart
                .draw_series(bars)
                .map_err(chart_error)?
                .label(grade.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        // Legend box in plot-area pixels, titled just above it
        let legend_area = chart.plotting_area().strip_coord_spec();
        let legend_x = legend_area.dim_in_pixel().0 as i32 - LEGEND_WIDTH;
        legend_area
            .draw(&Text::new(
                LEGEND_TITLE,
                (legend_x, LEGEND_TOP - 20),
                (FONT, 14.0).into_font(),
            ))
            .map_err(chart_error)?;

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::Coordinate(legend_x, LEGEND_TOP))
            .draw()
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
        info!("Rendered season/grade chart to {}", path.display());
        Ok(())
    }
}

fn grade_color(grade: PmGrade) -> RGBColor {
    match grade {
        PmGrade::Good => RGBColor(66, 133, 244),
        PmGrade::Normal => RGBColor(52, 168, 83),
        PmGrade::Bad => RGBColor(251, 188, 5),
        PmGrade::Worse => RGBColor(234, 67, 53),
    }
}

fn chart_error<E: Display>(e: E) -> ProcessingError {
    ProcessingError::Chart(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn daily(day: u32, avg_pm10: f64) -> DailyMean {
        DailyMean {
            date: NaiveDate::from_ymd_opt(2019, 1, day).unwrap(),
            avg_pm10,
        }
    }

    #[test]
    fn test_render_daily_trend_svg() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("trend.svg");

        ChartRenderer::new(ChartConfig::default())
            .render_daily_trend(&[daily(1, 40.0), daily(2, 75.5), daily(3, 20.0)], &path)?;

        let svg = std::fs::read_to_string(&path)?;
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Daily Trend of PM10 in Seoul, 2019"));

        Ok(())
    }

    #[test]
    fn test_render_season_grades_svg() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("season.svg");
        let shares = vec![
            SeasonGradeShare {
                season: Season::Spring,
                pm_grade: PmGrade::Good,
                n: 1,
                total: 2,
                pct: 50.0,
            },
            SeasonGradeShare {
                season: Season::Winter,
                pm_grade: PmGrade::Worse,
                n: 2,
                total: 2,
                pct: 100.0,
            },
        ];

        ChartRenderer::new(ChartConfig::default()).render_season_grades(&shares, &path)?;

        let svg = std::fs::read_to_string(&path)?;
        assert!(svg.contains("Seasonal Distribution of PM10 Grades in Seoul, 2019"));
        assert!(svg.contains("worse"));
        assert!(svg.contains("PM10 Grade</text>"));

        Ok(())
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let renderer = ChartRenderer::new(ChartConfig::default());
        let path = Path::new("unused.svg");

        assert!(renderer.render_daily_trend(&[], path).is_err());
        assert!(renderer.render_season_grades(&[], path).is_err());
    }
}
