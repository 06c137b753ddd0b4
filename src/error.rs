use crate::aggregation::error::StatsError;
use crate::open_meteo::error::FetchError;
use crate::report::error::ReportError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeteoStatsError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}
