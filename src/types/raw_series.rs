use crate::aggregation::error::StatsError;

/// One hourly observation. Readings are `None` where the data source reported a gap.
#[derive(Debug, PartialEq, Clone)]
pub struct HourlySample<'a> {
    pub timestamp: &'a str,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub soil_temperature: Option<f64>,
}

/// Hourly observations as four parallel sequences.
///
/// Index `i` of every sequence refers to the same instant. The sequences are
/// guaranteed to have equal length; [`RawSeries::new`] is the only way to build one.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct RawSeries {
    time: Vec<String>,
    temperature: Vec<Option<f64>>,
    wind_speed: Vec<Option<f64>>,
    soil_temperature: Vec<Option<f64>>,
}

impl RawSeries {
    /// Builds a series from parallel sequences.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::SeriesLengthMismatch`] when the sequences differ in length.
    pub fn new(
        time: Vec<String>,
        temperature: Vec<Option<f64>>,
        wind_speed: Vec<Option<f64>>,
        soil_temperature: Vec<Option<f64>>,
    ) -> Result<Self, StatsError> {
        let expected = time.len();
        for (name, len) in [
            ("temperature", temperature.len()),
            ("wind_speed", wind_speed.len()),
            ("soil_temperature", soil_temperature.len()),
        ] {
            if len != expected {
                return Err(StatsError::SeriesLengthMismatch {
                    series: name,
                    expected,
                    found: len,
                });
            }
        }
        Ok(Self {
            time,
            temperature,
            wind_speed,
            soil_temperature,
        })
    }

    /// Convenience constructor for fully populated readings.
    pub fn from_values(
        time: Vec<String>,
        temperature: Vec<f64>,
        wind_speed: Vec<f64>,
        soil_temperature: Vec<f64>,
    ) -> Result<Self, StatsError> {
        let wrap = |v: Vec<f64>| v.into_iter().map(Some).collect();
        Self::new(
            time,
            wrap(temperature),
            wrap(wind_speed),
            wrap(soil_temperature),
        )
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns the sample at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::IndexOutOfRange`] if any sequence has no entry at `index`.
    pub fn sample(&self, index: usize) -> Result<HourlySample<'_>, StatsError> {
        let out_of_range = || StatsError::IndexOutOfRange {
            index,
            len: self.time.len(),
        };
        Ok(HourlySample {
            timestamp: self.time.get(index).ok_or_else(out_of_range)?,
            temperature: *self.temperature.get(index).ok_or_else(out_of_range)?,
            wind_speed: *self.wind_speed.get(index).ok_or_else(out_of_range)?,
            soil_temperature: *self.soil_temperature.get(index).ok_or_else(out_of_range)?,
        })
    }
}
