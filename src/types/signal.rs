//! Defines the measured quantities ([`Signal`]), the per-day reductions applied to them
//! ([`Reducer`]) and the statistic keys ([`StatKey`]) that combine the two.

use crate::aggregation::error::StatsError;
use ordered_float::OrderedFloat;
use std::fmt;
use std::str::FromStr;

/// One of the hourly quantities requested from the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Air temperature at 2 m, in °C.
    Temperature,
    /// Wind speed at 10 m, in km/h.
    Wind,
    /// Soil temperature at 0 cm, in °C.
    Soil,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::Temperature, Signal::Wind, Signal::Soil];

    /// Short name used inside statistic keys (`temp`, `wind`, `soil`).
    pub fn short_name(&self) -> &'static str {
        match self {
            Signal::Temperature => "temp",
            Signal::Wind => "wind",
            Signal::Soil => "soil",
        }
    }

    /// Name of the hourly variable in the Open-Meteo API.
    pub fn api_variable(&self) -> &'static str {
        match self {
            Signal::Temperature => "temperature_2m",
            Signal::Wind => "wind_speed_10m",
            Signal::Soil => "soil_temperature_0cm",
        }
    }

    /// Human readable name, e.g. for "Max Soil Temp on: ..." lines.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Temperature => "Temp",
            Signal::Wind => "Wind",
            Signal::Soil => "Soil Temp",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Signal::Temperature => "Temperature",
            Signal::Wind => "Wind Speed",
            Signal::Soil => "Soil Temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Signal::Temperature | Signal::Soil => "°C",
            Signal::Wind => "km/h",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Parses a signal name. Accepts the short names used in statistic keys as well as the
/// long forms.
///
/// # Examples
///
/// ```
/// use meteo_stats::Signal;
///
/// assert_eq!("temp".parse::<Signal>().unwrap(), Signal::Temperature);
/// assert_eq!("wind_speed".parse::<Signal>().unwrap(), Signal::Wind);
/// assert!("humidity".parse::<Signal>().is_err());
/// ```
impl FromStr for Signal {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "temp" | "temperature" => Ok(Signal::Temperature),
            "wind" | "wind_speed" => Ok(Signal::Wind),
            "soil" | "soil_temperature" => Ok(Signal::Soil),
            _ => Err(StatsError::UnknownSignal(s.to_string())),
        }
    }
}

/// A scalar reduction of one day's readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reducer {
    Max,
    Min,
    /// Arithmetic mean: sum divided by count, unrounded.
    Avg,
}

impl Reducer {
    pub const ALL: [Reducer; 3] = [Reducer::Max, Reducer::Min, Reducer::Avg];

    pub fn name(&self) -> &'static str {
        match self {
            Reducer::Max => "max",
            Reducer::Min => "min",
            Reducer::Avg => "avg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Reducer::Max => "Max",
            Reducer::Min => "Min",
            Reducer::Avg => "Avg",
        }
    }

    /// Applies the reduction. Returns `None` for an empty slice, never `0` or `NaN`.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        match self {
            Reducer::Max => values.iter().copied().map(OrderedFloat).max().map(|v| v.0),
            Reducer::Min => values.iter().copied().map(OrderedFloat).min().map(|v| v.0),
            Reducer::Avg => Some(values.iter().sum::<f64>() / values.len() as f64),
        }
    }
}

impl FromStr for Reducer {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "max" => Ok(Reducer::Max),
            "min" => Ok(Reducer::Min),
            "avg" => Ok(Reducer::Avg),
            _ => Err(StatsError::UnknownStatistic(s.to_string())),
        }
    }
}

/// Identifies one per-day statistic, e.g. `max_temp` or `avg_soil`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatKey {
    pub reducer: Reducer,
    pub signal: Signal,
}

impl StatKey {
    pub fn new(reducer: Reducer, signal: Signal) -> Self {
        Self { reducer, signal }
    }

    /// All nine keys, grouped by signal in the column order of the full report.
    pub fn all() -> impl Iterator<Item = StatKey> {
        Signal::ALL
            .into_iter()
            .flat_map(|signal| Reducer::ALL.into_iter().map(move |r| StatKey::new(r, signal)))
    }

    /// Column header used by the full report, e.g. "Max Temp".
    pub fn column_label(&self) -> String {
        let signal = match self.signal {
            Signal::Temperature => "Temp",
            Signal::Wind => "Wind",
            Signal::Soil => "Soil",
        };
        format!("{} {}", self.reducer.label(), signal)
    }

    /// Y-axis label for charts, e.g. "Avg Wind Speed (km/h)".
    pub fn axis_label(&self) -> String {
        format!(
            "{} {} ({})",
            self.reducer.label(),
            self.signal.description(),
            self.signal.unit()
        )
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.reducer.name(), self.signal.short_name())
    }
}

/// Parses `<reducer>_<signal>` keys.
///
/// # Examples
///
/// ```
/// use meteo_stats::{Reducer, Signal, StatKey};
///
/// let key: StatKey = "avg_wind".parse().unwrap();
/// assert_eq!(key, StatKey::new(Reducer::Avg, Signal::Wind));
/// assert_eq!(key.to_string(), "avg_wind");
/// ```
impl FromStr for StatKey {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (reducer, signal) = s
            .split_once('_')
            .ok_or_else(|| StatsError::UnknownStatistic(s.to_string()))?;
        let reducer = reducer
            .parse::<Reducer>()
            .map_err(|_| StatsError::UnknownStatistic(s.to_string()))?;
        Ok(StatKey::new(reducer, signal.parse()?))
    }
}
