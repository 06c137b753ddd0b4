use crate::error::MeteoStatsError;
use crate::types::signal::{Signal, StatKey};
use std::fmt;
use std::str::FromStr;

/// An operation the reporting CLI can perform on the fetched range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Export one per-day statistic as CSV and chart.
    Statistic(StatKey),
    /// Print the days with the highest and lowest daily average of a signal.
    ExtremeDate(Signal),
    /// Export all nine statistics, print every extreme date and chart the averages.
    FullReport,
}

impl Action {
    /// Every action name accepted on the command line.
    pub const ALL_NAMES: [&'static str; 13] = [
        "max_temp",
        "min_temp",
        "avg_temp",
        "max_wind",
        "min_wind",
        "avg_wind",
        "max_soil",
        "min_soil",
        "avg_soil",
        "extreme_temp_date",
        "extreme_wind_date",
        "extreme_soil_date",
        "full_report",
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Statistic(key) => write!(f, "{key}"),
            Action::ExtremeDate(signal) => write!(f, "extreme_{}_date", signal.short_name()),
            Action::FullReport => write!(f, "full_report"),
        }
    }
}

/// # Examples
///
/// ```
/// use meteo_stats::{Action, Signal};
///
/// assert_eq!(
///     "extreme_wind_date".parse::<Action>().unwrap(),
///     Action::ExtremeDate(Signal::Wind)
/// );
/// assert!("max_rain".parse::<Action>().is_err());
/// ```
impl FromStr for Action {
    type Err = MeteoStatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || MeteoStatsError::UnknownAction(s.to_string());

        if s == "full_report" {
            return Ok(Action::FullReport);
        }
        if let Some(signal) = s
            .strip_prefix("extreme_")
            .and_then(|rest| rest.strip_suffix("_date"))
        {
            return match signal {
                "temp" => Ok(Action::ExtremeDate(Signal::Temperature)),
                "wind" => Ok(Action::ExtremeDate(Signal::Wind)),
                "soil" => Ok(Action::ExtremeDate(Signal::Soil)),
                _ => Err(unknown()),
            };
        }
        // Only the short signal names are valid inside action names.
        if !matches!(s.rsplit_once('_'), Some((_, "temp" | "wind" | "soil"))) {
            return Err(unknown());
        }
        s.parse::<StatKey>()
            .map(Action::Statistic)
            .map_err(|_| unknown())
    }
}
