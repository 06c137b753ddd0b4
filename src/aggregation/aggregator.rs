//! Reduces per-day buckets into per-day statistics.

use crate::aggregation::error::StatsError;
use crate::aggregation::grouper::DayBuckets;
use crate::types::signal::{Reducer, Signal, StatKey};
use indexmap::IndexMap;

/// Statistic values for one date, keyed by statistic.
///
/// Records built by [`single_statistic`] hold one key only; don't assume all nine
/// are present.
pub type DayStatistics = IndexMap<StatKey, f64>;

/// Per-date statistics in the order the dates first appeared in the hourly series.
pub type StatisticsTable = IndexMap<String, DayStatistics>;

/// Applies `reducer` to the `signal` readings of every date.
///
/// # Errors
///
/// Returns [`StatsError::MissingData`] if a date has no readings for `signal`.
pub fn aggregate(
    buckets: &DayBuckets,
    signal: Signal,
    reducer: Reducer,
) -> Result<IndexMap<String, f64>, StatsError> {
    buckets
        .iter()
        .map(|(date, bucket)| {
            reducer
                .apply(bucket.values(signal))
                .map(|value| (date.clone(), value))
                .ok_or_else(|| StatsError::MissingData {
                    date: date.clone(),
                    signal,
                })
        })
        .collect()
}

/// Same as [`aggregate`], with the signal given by name (`temp`, `wind`, `soil`).
///
/// # Errors
///
/// Returns [`StatsError::UnknownSignal`] for any other name, or
/// [`StatsError::MissingData`] as [`aggregate`] does.
pub fn aggregate_named(
    buckets: &DayBuckets,
    signal: &str,
    reducer: Reducer,
) -> Result<IndexMap<String, f64>, StatsError> {
    aggregate(buckets, signal.parse()?, reducer)
}

/// Computes one statistic per date. Each record contains only `key`.
pub fn single_statistic(
    buckets: &DayBuckets,
    key: StatKey,
) -> Result<StatisticsTable, StatsError> {
    Ok(aggregate(buckets, key.signal, key.reducer)?
        .into_iter()
        .map(|(date, value)| (date, DayStatistics::from([(key, value)])))
        .collect())
}

/// Computes all nine statistics (max/min/avg of temperature, wind and soil) per date.
pub fn full_statistics(buckets: &DayBuckets) -> Result<StatisticsTable, StatsError> {
    buckets
        .iter()
        .map(|(date, bucket)| -> Result<(String, DayStatistics), StatsError> {
            let stats = StatKey::all()
                .map(|key| {
                    key.reducer
                        .apply(bucket.values(key.signal))
                        .map(|value| (key, value))
                        .ok_or_else(|| StatsError::MissingData {
                            date: date.clone(),
                            signal: key.signal,
                        })
                })
                .collect::<Result<DayStatistics, _>>()?;
            Ok((date.clone(), stats))
        })
        .collect()
}
