//! This module provides the main entry point of the crate. [`MeteoStats`] fetches an
//! hourly series for a location and runs one [`Action`] over it: exporting a per-day
//! statistic, finding extreme days, or producing the full report.

use crate::aggregation::aggregator::{full_statistics, single_statistic};
use crate::aggregation::extremes::{extreme_dates, ExtremeDates};
use crate::aggregation::grouper::group_by_date;
use crate::error::MeteoStatsError;
use crate::open_meteo::fetcher::OpenMeteoFetcher;
use crate::open_meteo::DEFAULT_BASE_URL;
use crate::report::chart::{render_chart, render_statistic_chart, ChartSpec, PLOT_DIR};
use crate::report::csv_export::{write_full_report_csv, write_statistic_csv};
use crate::report::error::ReportError;
use crate::types::action::Action;
use crate::types::raw_series::RawSeries;
use crate::types::signal::{Reducer, Signal, StatKey};
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use meteo_stats::LatLon;
///
/// let berlin = LatLon::default();
/// assert_eq!(berlin.0, 52.52); // Latitude
/// assert_eq!(berlin.1, 13.41); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl Default for LatLon {
    fn default() -> Self {
        LatLon(52.52, 13.41)
    }
}

/// What an [`Action`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// A single statistic was exported. `chart` is `None` when there was nothing to plot
    /// or charts were disabled.
    Exported {
        key: StatKey,
        csv: PathBuf,
        chart: Option<PathBuf>,
    },
    /// Extreme days of the daily average of `signal`.
    Extremes {
        signal: Signal,
        dates: ExtremeDates,
    },
    FullReport {
        csv: PathBuf,
        extremes: Vec<(Signal, ExtremeDates)>,
        charts: Vec<PathBuf>,
    },
}

fn write_extremes(
    f: &mut fmt::Formatter<'_>,
    signal: Signal,
    dates: &ExtremeDates,
) -> fmt::Result {
    writeln!(f, "Max {} on: {}", signal.label(), dates.max_date)?;
    writeln!(f, "Min {} on: {}", signal.label(), dates.min_date)
}

/// Formats the outcome as the lines shown to the user.
impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::Exported { csv, chart, .. } => {
                writeln!(f, "CSV Exported: {}", csv.display())?;
                if let Some(chart) = chart {
                    writeln!(f, "Chart saved: {}", chart.display())?;
                }
                Ok(())
            }
            ActionOutcome::Extremes { signal, dates } => write_extremes(f, *signal, dates),
            ActionOutcome::FullReport {
                csv,
                extremes,
                charts,
            } => {
                writeln!(f, "CSV Exported: {}", csv.display())?;
                for (signal, dates) in extremes {
                    write_extremes(f, *signal, dates)?;
                }
                for chart in charts {
                    writeln!(f, "Chart saved: {}", chart.display())?;
                }
                Ok(())
            }
        }
    }
}

/// The client: fetches hourly data and turns it into reports.
///
/// # Examples
///
/// ```no_run
/// # use meteo_stats::{Action, LatLon, MeteoStats, MeteoStatsError};
/// # use chrono::NaiveDate;
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), MeteoStatsError> {
/// let client = MeteoStats::builder().output_dir("reports".into()).build()?;
///
/// let outcome = client
///     .report()
///     .location(LatLon(52.52, 13.41))
///     .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap())
///     .action("avg_temp".parse()?)
///     .call()
///     .await?;
/// print!("{outcome}");
/// # Ok(())
/// # }
/// ```
pub struct MeteoStats {
    fetcher: OpenMeteoFetcher,
    output_dir: PathBuf,
    render_charts: bool,
}

#[bon]
impl MeteoStats {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.base_url(String)`: Optional. Forecast endpoint, defaults to the public Open-Meteo API.
    /// * `.timeout(Duration)`: Optional. HTTP request timeout, defaults to 30 seconds.
    /// * `.output_dir(PathBuf)`: Optional. Where CSV files go (charts go to its `plots`
    ///   subdirectory). Defaults to the working directory.
    /// * `.render_charts(bool)`: Optional. Set to `false` to only write CSV files.
    ///
    /// # Errors
    ///
    /// Returns [`MeteoStatsError::Fetch`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        base_url: Option<String>,
        timeout: Option<Duration>,
        output_dir: Option<PathBuf>,
        render_charts: Option<bool>,
    ) -> Result<Self, MeteoStatsError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        Ok(Self {
            fetcher: OpenMeteoFetcher::new(&base_url, timeout)?,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
            render_charts: render_charts.unwrap_or(true),
        })
    }

    /// Fetches the hourly series for `location` between `start_date` and `end_date`
    /// (both inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`MeteoStatsError::InvalidDateRange`] without making a request when
    /// `start_date` is after `end_date`, and [`MeteoStatsError::Fetch`] when the request
    /// fails or the server answers with a non-success status.
    #[builder]
    pub async fn hourly(
        &self,
        location: LatLon,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RawSeries, MeteoStatsError> {
        if start_date > end_date {
            return Err(MeteoStatsError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(self
            .fetcher
            .hourly(location.0, location.1, start_date, end_date)
            .await?)
    }

    /// Fetches the series and runs `action` on it. Nothing is written if the fetch fails.
    #[builder]
    pub async fn report(
        &self,
        location: LatLon,
        start_date: NaiveDate,
        end_date: NaiveDate,
        action: Action,
    ) -> Result<ActionOutcome, MeteoStatsError> {
        let series = self
            .hourly()
            .location(location)
            .start_date(start_date)
            .end_date(end_date)
            .call()
            .await?;
        self.run_action(&series, action)
    }

    /// Runs `action` on an already fetched series.
    pub fn run_action(
        &self,
        series: &RawSeries,
        action: Action,
    ) -> Result<ActionOutcome, MeteoStatsError> {
        let buckets = group_by_date(series)?;
        info!("Running {} over {} days", action, buckets.len());

        match action {
            Action::Statistic(key) => {
                let table = single_statistic(&buckets, key)?;
                let csv = write_statistic_csv(&table, key, &self.output_dir)?;
                let chart = if self.render_charts {
                    match render_statistic_chart(&table, key, &self.output_dir) {
                        Ok(path) => Some(path),
                        Err(ReportError::NothingToPlot(title)) => {
                            warn!("No days in range, skipping chart '{}'", title);
                            None
                        }
                        Err(e) => return Err(e.into()),
                    }
                } else {
                    None
                };
                Ok(ActionOutcome::Exported { key, csv, chart })
            }
            Action::ExtremeDate(signal) => {
                let key = StatKey::new(Reducer::Avg, signal);
                let table = single_statistic(&buckets, key)?;
                Ok(ActionOutcome::Extremes {
                    signal,
                    dates: extreme_dates(&table, key)?,
                })
            }
            Action::FullReport => {
                let table = full_statistics(&buckets)?;
                // Extremes first: an empty range fails before any file is written.
                let extremes = Signal::ALL
                    .into_iter()
                    .map(|signal| {
                        extreme_dates(&table, StatKey::new(Reducer::Avg, signal))
                            .map(|dates| (signal, dates))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let csv = write_full_report_csv(&table, &self.output_dir)?;

                let mut charts = Vec::new();
                if self.render_charts {
                    for signal in Signal::ALL {
                        let key = StatKey::new(Reducer::Avg, signal);
                        let spec = ChartSpec::for_statistic(&table, key)?
                            .with_title(format!("Average {} Over Time", signal.description()));
                        let path = self
                            .output_dir
                            .join(PLOT_DIR)
                            .join(format!("{key}.png"));
                        render_chart(&spec, &path)?;
                        charts.push(path);
                    }
                }
                Ok(ActionOutcome::FullReport {
                    csv,
                    extremes,
                    charts,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::error::StatsError;
    use crate::aggregation::fixtures::sample_series;
    use crate::open_meteo::error::FetchError;
    use crate::open_meteo::test_server::serve_once;
    use std::path::Path;
    use tempfile::TempDir;

    const BODY: &str = r#"{"hourly": {
        "time": ["2024-01-01T00:00", "2024-01-01T01:00", "2024-01-02T00:00"],
        "temperature_2m": [10.0, 12.0, 5.0],
        "wind_speed_10m": [2.0, 3.0, 1.0],
        "soil_temperature_0cm": [6.0, 7.0, 3.0]
    }}"#;

    fn client(base_url: &str, dir: &TempDir) -> MeteoStats {
        MeteoStats::builder()
            .base_url(base_url.to_string())
            .timeout(Duration::from_secs(5))
            .output_dir(dir.path().to_path_buf())
            .render_charts(false)
            .build()
            .unwrap()
    }

    fn charting_client(dir: &TempDir) -> MeteoStats {
        MeteoStats::builder()
            .output_dir(dir.path().to_path_buf())
            .build()
            .unwrap()
    }

    fn assert_png(path: &Path) {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"), "{path:?} is not a PNG");
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn files_in(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_report_single_statistic() {
        let dir = TempDir::new().unwrap();
        let server = serve_once("200 OK", BODY).await;
        let client = client(&server.url, &dir);

        let outcome = client
            .report()
            .location(LatLon::default())
            .start_date(date(1))
            .end_date(date(2))
            .action("max_soil".parse().unwrap())
            .call()
            .await
            .unwrap();

        let csv = dir.path().join("max_soil.csv");
        assert_eq!(
            outcome,
            ActionOutcome::Exported {
                key: "max_soil".parse().unwrap(),
                csv: csv.clone(),
                chart: None,
            }
        );
        assert_eq!(
            std::fs::read_to_string(&csv).unwrap().lines().collect::<Vec<_>>(),
            ["Date,max_soil", "2024-01-01,7.0", "2024-01-02,3.0"]
        );
        assert!(server.request_line().await.contains("latitude=52.52"));
    }

    #[tokio::test]
    async fn test_report_fetch_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let server = serve_once("500 Internal Server Error", "").await;
        let client = client(&server.url, &dir);

        let err = client
            .report()
            .location(LatLon::default())
            .start_date(date(1))
            .end_date(date(2))
            .action(Action::FullReport)
            .call()
            .await
            .unwrap_err();

        match err {
            MeteoStatsError::Fetch(e @ FetchError::HttpStatus { .. }) => {
                assert_eq!(e.status().map(|s| s.as_u16()), Some(500));
            }
            other => panic!("expected HTTP status error, got {other:?}"),
        }
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_invalid_date_range_skips_request() {
        let dir = TempDir::new().unwrap();
        // Nothing listens here; reaching the network would give a Fetch error instead.
        let client = client("http://127.0.0.1:9/v1/forecast", &dir);

        let err = client
            .hourly()
            .location(LatLon::default())
            .start_date(date(5))
            .end_date(date(2))
            .call()
            .await
            .unwrap_err();

        assert!(matches!(err, MeteoStatsError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_extreme_date_action() {
        let dir = TempDir::new().unwrap();
        let client = client(DEFAULT_BASE_URL, &dir);

        let outcome = client
            .run_action(&sample_series(), Action::ExtremeDate(Signal::Temperature))
            .unwrap();

        assert_eq!(
            outcome.to_string(),
            "Max Temp on: 2024-01-01\nMin Temp on: 2024-01-02\n"
        );
        assert_eq!(files_in(dir.path()), 0);
    }

    #[test]
    fn test_full_report_action() {
        let dir = TempDir::new().unwrap();
        let client = client(DEFAULT_BASE_URL, &dir);

        let outcome = client
            .run_action(&sample_series(), Action::FullReport)
            .unwrap();

        let ActionOutcome::FullReport {
            csv,
            extremes,
            charts,
        } = outcome
        else {
            panic!("expected a full report");
        };
        assert_eq!(csv, dir.path().join("weather_data.csv"));
        assert!(csv.exists());
        assert!(charts.is_empty());
        let signals: Vec<Signal> = extremes.iter().map(|(s, _)| *s).collect();
        assert_eq!(signals, Signal::ALL);
        // Wind averages: 2.5 on the first day, 1.0 on the second.
        assert_eq!(extremes[1].1.max_date, "2024-01-01");
        assert_eq!(extremes[1].1.min_date, "2024-01-02");
    }

    #[test]
    fn test_full_report_on_empty_range_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let client = client(DEFAULT_BASE_URL, &dir);

        let err = client
            .run_action(&RawSeries::default(), Action::FullReport)
            .unwrap_err();

        assert!(matches!(
            err,
            MeteoStatsError::Stats(StatsError::EmptyTable { .. })
        ));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[test]
    fn test_single_statistic_with_chart() {
        let dir = TempDir::new().unwrap();
        let key: StatKey = "max_soil".parse().unwrap();

        let outcome = charting_client(&dir)
            .run_action(&sample_series(), Action::Statistic(key))
            .unwrap();

        let chart = dir.path().join("plots").join("max_soil.png");
        assert_eq!(
            outcome,
            ActionOutcome::Exported {
                key,
                csv: dir.path().join("max_soil.csv"),
                chart: Some(chart.clone()),
            }
        );
        assert_png(&chart);
    }

    #[test]
    fn test_full_report_with_charts() {
        let dir = TempDir::new().unwrap();

        let outcome = charting_client(&dir)
            .run_action(&sample_series(), Action::FullReport)
            .unwrap();

        let ActionOutcome::FullReport { csv, charts, .. } = outcome else {
            panic!("expected a full report");
        };
        assert!(csv.exists());
        let plots = dir.path().join("plots");
        assert_eq!(
            charts,
            [
                plots.join("avg_temp.png"),
                plots.join("avg_wind.png"),
                plots.join("avg_soil.png"),
            ]
        );
        for chart in &charts {
            assert_png(chart);
        }
    }

    #[test]
    fn test_empty_range_skips_chart_but_keeps_csv() {
        let dir = TempDir::new().unwrap();
        let key: StatKey = "avg_wind".parse().unwrap();

        let outcome = charting_client(&dir)
            .run_action(&RawSeries::default(), Action::Statistic(key))
            .unwrap();

        let csv = dir.path().join("avg_wind.csv");
        assert_eq!(
            outcome,
            ActionOutcome::Exported {
                key,
                csv: csv.clone(),
                chart: None,
            }
        );
        assert_eq!(std::fs::read_to_string(&csv).unwrap().trim(), "Date,avg_wind");
        assert!(!dir.path().join("plots").exists());
    }

    #[test]
    fn test_outcome_display() {
        let outcome = ActionOutcome::Exported {
            key: "avg_wind".parse().unwrap(),
            csv: PathBuf::from("avg_wind.csv"),
            chart: Some(PathBuf::from("plots/avg_wind.png")),
        };
        assert_eq!(
            outcome.to_string(),
            "CSV Exported: avg_wind.csv\nChart saved: plots/avg_wind.png\n"
        );
    }
}
