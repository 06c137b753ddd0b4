//! CSV export of statistics tables through polars.

use crate::aggregation::aggregator::StatisticsTable;
use crate::aggregation::error::StatsError;
use crate::report::error::ReportError;
use crate::types::signal::StatKey;
use crate::utils::ensure_output_dir_exists;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DATE_COLUMN: &str = "Date";
pub const FULL_REPORT_FILE: &str = "weather_data.csv";

/// Builds a frame with a `Date` column followed by one column per `(key, header)`.
///
/// # Errors
///
/// Returns [`StatsError::MissingKey`] (wrapped) if a record lacks one of the keys.
pub fn statistics_frame(
    table: &StatisticsTable,
    columns: &[(StatKey, String)],
) -> Result<DataFrame, ReportError> {
    let dates: Vec<String> = table.keys().cloned().collect();
    let mut frame_columns = Vec::with_capacity(columns.len() + 1);
    frame_columns.push(Column::new(DATE_COLUMN.into(), dates));

    for (key, header) in columns {
        let values = table
            .iter()
            .map(|(date, stats)| {
                stats.get(key).copied().ok_or_else(|| StatsError::MissingKey {
                    date: date.clone(),
                    key: *key,
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        frame_columns.push(Column::new(header.as_str().into(), values));
    }

    DataFrame::new(frame_columns).map_err(ReportError::DataFrame)
}

/// Writes `frame` to `path`, replacing any existing file only once the whole table has
/// been written.
pub fn write_frame_csv(frame: &mut DataFrame, path: &Path) -> Result<(), ReportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    ensure_output_dir_exists(&dir)?;

    let mut temp_file =
        NamedTempFile::new_in(&dir).map_err(|e| ReportError::TempFile(dir.clone(), e))?;
    CsvWriter::new(&mut temp_file)
        .include_header(true)
        .finish(frame)
        .map_err(|e| ReportError::CsvWrite(path.to_path_buf(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| ReportError::Persist(path.to_path_buf(), e.error))?;
    Ok(())
}

/// Exports one statistic as `<dir>/<key>.csv` with columns `Date,<key>`.
pub fn write_statistic_csv(
    table: &StatisticsTable,
    key: StatKey,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(format!("{key}.csv"));
    let mut frame = statistics_frame(table, &[(key, key.to_string())])?;
    write_frame_csv(&mut frame, &path)?;
    info!("Exported {} rows of {} to {:?}", frame.height(), key, path);
    Ok(path)
}

/// Exports all nine statistics as `<dir>/weather_data.csv`, headed
/// `Date,Max Temp,Min Temp,Avg Temp,...`.
pub fn write_full_report_csv(table: &StatisticsTable, dir: &Path) -> Result<PathBuf, ReportError> {
    let path = dir.join(FULL_REPORT_FILE);
    let columns: Vec<(StatKey, String)> =
        StatKey::all().map(|key| (key, key.column_label())).collect();
    let mut frame = statistics_frame(table, &columns)?;
    write_frame_csv(&mut frame, &path)?;
    info!("Exported {} rows to {:?}", frame.height(), path);
    Ok(path)
}
