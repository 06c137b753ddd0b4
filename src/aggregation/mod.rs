//! The aggregation pipeline: hourly series -> day buckets -> per-day statistics ->
//! extreme days.

pub mod aggregator;
pub mod error;
pub mod extremes;
pub mod grouper;
