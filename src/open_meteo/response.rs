//! Serde model of the Open-Meteo forecast response.

use crate::aggregation::error::StatsError;
use crate::types::raw_series::RawSeries;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: HourlyBlock,
}

/// The `hourly` object: one array per requested variable, parallel to `time`.
/// Gaps are encoded as `null`.
#[derive(Debug, Deserialize)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub soil_temperature_0cm: Vec<Option<f64>>,
}

impl TryFrom<HourlyBlock> for RawSeries {
    type Error = StatsError;

    fn try_from(block: HourlyBlock) -> Result<Self, Self::Error> {
        RawSeries::new(
            block.time,
            block.temperature_2m,
            block.wind_speed_10m,
            block.soil_temperature_0cm,
        )
    }
}
