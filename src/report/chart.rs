//! PNG line charts of per-day statistics.

use crate::aggregation::aggregator::StatisticsTable;
use crate::aggregation::error::StatsError;
use crate::report::error::ReportError;
use crate::types::signal::StatKey;
use crate::utils::ensure_output_dir_exists;
use log::info;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::fmt::Display;
use std::path::{Path, PathBuf};

pub const PLOT_DIR: &str = "plots";

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 400;
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// What to draw: one point per date, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub y_label: String,
    pub points: Vec<(String, f64)>,
}

impl ChartSpec {
    /// Chart of `key` over the table's dates, titled with the key name.
    pub fn for_statistic(table: &StatisticsTable, key: StatKey) -> Result<ChartSpec, StatsError> {
        let points = table
            .iter()
            .map(|(date, stats)| {
                stats
                    .get(&key)
                    .map(|value| (date.clone(), *value))
                    .ok_or_else(|| StatsError::MissingKey {
                        date: date.clone(),
                        key,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ChartSpec {
            title: key.to_string(),
            y_label: key.axis_label(),
            points,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Y-axis bounds with 10% headroom on both sides; flat series get ±1.
pub(crate) fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span == 0.0 {
        return (min - 1.0, max + 1.0);
    }
    (min - span * 0.1, max + span * 0.1)
}

/// Tick label for x position `x`: the date at that index, blank between points.
pub(crate) fn date_label(points: &[(String, f64)], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    points
        .get(rounded as usize)
        .map(|(date, _)| date.clone())
        .unwrap_or_default()
}

fn render_error<E: Display>(path: &Path) -> impl Fn(E) -> ReportError + '_ {
    move |e| ReportError::ChartRender {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Draws `spec` as a line with circle markers and writes it to `path` as PNG.
pub fn render_chart(spec: &ChartSpec, path: &Path) -> Result<(), ReportError> {
    if spec.points.is_empty() {
        return Err(ReportError::NothingToPlot(spec.title.clone()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_output_dir_exists(parent)?;
    }

    let points = &spec.points;
    let (y_min, y_max) = value_range(points.iter().map(|(_, v)| *v));
    let x_max = points.len() as f64 - 0.5;

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(95)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)
        .map_err(render_error(path))?;

    chart
        .configure_mesh()
        .x_labels(points.len())
        .x_label_formatter(&|x| date_label(points, *x))
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Date")
        .y_desc(spec.y_label.as_str())
        .draw()
        .map_err(render_error(path))?;

    let series = points
        .iter()
        .enumerate()
        .map(|(i, (_, value))| (i as f64, *value));
    chart
        .draw_series(LineSeries::new(series.clone(), &LINE_COLOR))
        .map_err(render_error(path))?;
    chart
        .draw_series(series.map(|point| Circle::new(point, 4, LINE_COLOR.filled())))
        .map_err(render_error(path))?;

    root.present().map_err(render_error(path))?;
    info!("Rendered chart '{}' to {:?}", spec.title, path);
    Ok(())
}

/// Renders `key` to `<dir>/plots/<key>.png`.
pub fn render_statistic_chart(
    table: &StatisticsTable,
    key: StatKey,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(PLOT_DIR).join(format!("{key}.png"));
    render_chart(&ChartSpec::for_statistic(table, key)?, &path)?;
    Ok(path)
}
