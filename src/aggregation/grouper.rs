//! Partitions an hourly series into per-day buckets.

use crate::aggregation::error::StatsError;
use crate::types::raw_series::RawSeries;
use crate::types::signal::Signal;
use indexmap::IndexMap;
use log::debug;

/// The readings collected for one calendar date, in the order they were encountered.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct DayBucket {
    pub temperature: Vec<f64>,
    pub wind_speed: Vec<f64>,
    pub soil_temperature: Vec<f64>,
    /// Number of hourly samples that fell on this date, including ones with gaps.
    pub samples: usize,
}

impl DayBucket {
    pub fn values(&self, signal: Signal) -> &[f64] {
        match signal {
            Signal::Temperature => &self.temperature,
            Signal::Wind => &self.wind_speed,
            Signal::Soil => &self.soil_temperature,
        }
    }
}

/// Buckets keyed by `YYYY-MM-DD`, in first-occurrence order.
pub type DayBuckets = IndexMap<String, DayBucket>;

/// Returns the calendar date part of an ISO-8601 timestamp (everything before `T`).
///
/// # Examples
///
/// ```
/// use meteo_stats::extract_date;
///
/// assert_eq!(extract_date("2024-01-01T12:00"), "2024-01-01");
/// assert_eq!(extract_date("2024-01-01"), "2024-01-01");
/// ```
pub fn extract_date(timestamp: &str) -> &str {
    timestamp
        .split_once('T')
        .map_or(timestamp, |(date, _)| date)
}

/// Groups every sample of `series` into the bucket of its calendar date.
///
/// Within a bucket readings keep their input order; buckets appear in the order their
/// date first occurs. Missing readings count towards [`DayBucket::samples`] but are not
/// appended to the signal's values.
///
/// # Errors
///
/// Returns [`StatsError::IndexOutOfRange`] if the series' sequences are not parallel.
pub fn group_by_date(series: &RawSeries) -> Result<DayBuckets, StatsError> {
    let mut grouped = DayBuckets::new();

    for i in 0..series.len() {
        let sample = series.sample(i)?;
        let date = extract_date(sample.timestamp);

        let bucket = grouped.entry(date.to_string()).or_default();
        bucket.samples += 1;
        bucket.temperature.extend(sample.temperature);
        bucket.wind_speed.extend(sample.wind_speed);
        bucket.soil_temperature.extend(sample.soil_temperature);
    }

    debug!(
        "Grouped {} hourly samples into {} days",
        series.len(),
        grouped.len()
    );
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::fixtures::sample_series;

    #[test]
    fn test_group_by_date() {
        let grouped = group_by_date(&sample_series()).unwrap();

        assert_eq!(
            grouped.keys().collect::<Vec<_>>(),
            ["2024-01-01", "2024-01-02"]
        );
        assert_eq!(grouped["2024-01-01"].temperature, [10.0, 12.0]);
        assert_eq!(grouped["2024-01-01"].wind_speed, [2.0, 3.0]);
        assert_eq!(grouped["2024-01-02"].temperature, [5.0]);
        assert_eq!(grouped["2024-01-02"].soil_temperature, [3.0]);
    }

    #[test]
    fn test_every_sample_lands_in_one_bucket() {
        let times: Vec<String> = (0..72)
            .map(|h| format!("2024-03-{:02}T{:02}:00", 10 + h / 24, h % 24))
            .collect();
        let values: Vec<f64> = (0..72).map(|h| h as f64 * 0.5).collect();
        let series = RawSeries::from_values(
            times,
            values.clone(),
            values.clone(),
            values.clone(),
        )
        .unwrap();

        let grouped = group_by_date(&series).unwrap();

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped.values().map(|b| b.samples).sum::<usize>(), 72);
        assert_eq!(
            grouped.values().map(|b| b.temperature.len()).sum::<usize>(),
            72
        );
        // Within-day order is preserved.
        assert_eq!(grouped["2024-03-11"].temperature[0], 12.0);
        assert_eq!(grouped["2024-03-11"].temperature[23], 23.5);
    }

    #[test]
    fn test_first_occurrence_order_is_kept() {
        let series = RawSeries::from_values(
            vec![
                "2024-01-05T00:00".into(),
                "2024-01-03T00:00".into(),
                "2024-01-05T01:00".into(),
                "2024-01-04T00:00".into(),
            ],
            vec![1.0, 2.0, 3.0, 4.0],
            vec![0.0; 4],
            vec![0.0; 4],
        )
        .unwrap();

        let grouped = group_by_date(&series).unwrap();

        assert_eq!(
            grouped.keys().collect::<Vec<_>>(),
            ["2024-01-05", "2024-01-03", "2024-01-04"]
        );
        assert_eq!(grouped["2024-01-05"].temperature, [1.0, 3.0]);
    }

    #[test]
    fn test_missing_readings_are_counted_but_not_stored() {
        let series = RawSeries::new(
            vec!["2024-01-01T00:00".into(), "2024-01-01T01:00".into()],
            vec![Some(1.0), None],
            vec![None, None],
            vec![Some(2.0), Some(3.0)],
        )
        .unwrap();

        let grouped = group_by_date(&series).unwrap();
        let bucket = &grouped["2024-01-01"];

        assert_eq!(bucket.samples, 2);
        assert_eq!(bucket.values(Signal::Temperature), [1.0]);
        assert!(bucket.values(Signal::Wind).is_empty());
        assert_eq!(bucket.values(Signal::Soil), [2.0, 3.0]);
    }

    #[test]
    fn test_empty_series() {
        let grouped = group_by_date(&RawSeries::default()).unwrap();
        assert!(grouped.is_empty());
    }
}
