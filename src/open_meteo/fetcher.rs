use crate::open_meteo::error::FetchError;
use crate::open_meteo::response::ForecastResponse;
use crate::types::raw_series::RawSeries;
use crate::types::signal::Signal;
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

/// Downloads hourly series from an Open-Meteo compatible endpoint.
pub struct OpenMeteoFetcher {
    base_url: String,
    client: Client,
}

impl OpenMeteoFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<OpenMeteoFetcher, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(OpenMeteoFetcher {
            base_url: base_url.to_string(),
            client,
        })
    }

    /// Fetches temperature, wind speed and soil temperature for every hour between
    /// `start` and `end` (inclusive) at the given coordinates.
    pub async fn hourly(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawSeries, FetchError> {
        let hourly = Signal::ALL.map(|s| s.api_variable()).join(",");
        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", hourly),
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
            ])
            .build()
            .map_err(|e| FetchError::NetworkRequest(self.base_url.clone(), e))?;
        let url = request.url().to_string();
        info!("Requesting URL: {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url, e)
                });
            }
        };

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(url.clone(), e))?;
        let series = RawSeries::try_from(body.hourly)
            .map_err(|source| FetchError::MalformedSeries { url, source })?;

        info!("Received {} hourly samples", series.len());
        Ok(series)
    }
}
