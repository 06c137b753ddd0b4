use crate::types::signal::{Signal, StatKey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Hourly series '{series}' has {found} entries, expected {expected} to match 'time'")]
    SeriesLengthMismatch {
        series: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Sample index {index} is out of range for a series of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No {signal} readings available for {date}")]
    MissingData { date: String, signal: Signal },

    #[error("Unknown signal '{0}', expected one of temp, wind, soil")]
    UnknownSignal(String),

    #[error("Unknown statistic '{0}', expected <max|min|avg>_<temp|wind|soil>")]
    UnknownStatistic(String),

    #[error("Statistic '{key}' is missing for {date}")]
    MissingKey { date: String, key: StatKey },

    #[error("Cannot find extreme days for '{key}' in an empty statistics table")]
    EmptyTable { key: StatKey },
}
