use crate::aggregation::aggregator::StatisticsTable;
use crate::aggregation::error::StatsError;
use crate::types::signal::StatKey;
use ordered_float::OrderedFloat;

/// The dates holding the highest and lowest value of a statistic.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ExtremeDates {
    pub max_date: String,
    pub min_date: String,
}

/// Finds the dates with the maximum and minimum value of `key`.
///
/// When several dates share the extreme value, the first one in table order wins.
///
/// # Errors
///
/// Returns [`StatsError::EmptyTable`] for an empty table, and
/// [`StatsError::MissingKey`] if any record lacks `key`.
pub fn extreme_dates(table: &StatisticsTable, key: StatKey) -> Result<ExtremeDates, StatsError> {
    let mut rows = table.iter().map(|(date, stats)| {
        stats
            .get(&key)
            .map(|value| (date, OrderedFloat(*value)))
            .ok_or_else(|| StatsError::MissingKey {
                date: date.clone(),
                key,
            })
    });

    let first = rows.next().ok_or(StatsError::EmptyTable { key })??;
    let (mut max, mut min) = (first, first);

    for row in rows {
        let (date, value) = row?;
        // Strict comparisons keep the earliest date on ties.
        if value > max.1 {
            max = (date, value);
        }
        if value < min.1 {
            min = (date, value);
        }
    }

    Ok(ExtremeDates {
        max_date: max.0.clone(),
        min_date: min.0.clone(),
    })
}
