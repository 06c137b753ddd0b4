mod aggregation;
mod error;
mod meteo_stats;
mod open_meteo;
mod report;
mod types;
mod utils;

pub use error::MeteoStatsError;
pub use meteo_stats::*;

pub use aggregation::aggregator::{
    aggregate, aggregate_named, full_statistics, single_statistic, DayStatistics,
    StatisticsTable,
};
pub use aggregation::extremes::{extreme_dates, ExtremeDates};
pub use aggregation::grouper::{extract_date, group_by_date, DayBucket, DayBuckets};

pub use types::action::Action;
pub use types::raw_series::{HourlySample, RawSeries};
pub use types::signal::{Reducer, Signal, StatKey};

pub use open_meteo::fetcher::OpenMeteoFetcher;
pub use open_meteo::DEFAULT_BASE_URL;

pub use report::chart::{render_chart, render_statistic_chart, ChartSpec, PLOT_DIR};
pub use report::csv_export::{
    statistics_frame, write_frame_csv, write_full_report_csv, write_statistic_csv,
    FULL_REPORT_FILE,
};

pub use aggregation::error::StatsError;
pub use open_meteo::error::FetchError;
pub use report::error::ReportError;
