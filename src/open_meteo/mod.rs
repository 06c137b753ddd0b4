//! Client side of the Open-Meteo hourly forecast API.

pub mod error;
pub mod fetcher;
pub mod response;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
