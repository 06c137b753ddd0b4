use crate::aggregation::error::StatsError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Output path exists but is not a directory: '{0}'")]
    OutputPathNotDir(PathBuf),

    #[error("Failed to create temporary file in '{0}'")]
    TempFile(PathBuf, #[source] std::io::Error),

    #[error("Failed to move finished file into place at '{0}'")]
    Persist(PathBuf, #[source] std::io::Error),

    #[error("Failed to build table for export")]
    DataFrame(#[source] PolarsError),

    #[error("Failed to write CSV file '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Nothing to plot for '{0}'")]
    NothingToPlot(String),

    #[error("Failed to render chart '{path}': {message}")]
    ChartRender { path: PathBuf, message: String },
}
