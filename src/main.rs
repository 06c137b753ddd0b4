use chrono::NaiveDate;
use clap::Parser;
use env_logger::Env;
use meteo_stats::{Action, LatLon, MeteoStats, MeteoStatsError, DEFAULT_BASE_URL};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Weather Analyzer using the Open-Meteo API
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Latitude of the location
    #[arg(long, default_value_t = 52.52, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude of the location
    #[arg(long, default_value_t = 13.41, allow_negative_numbers = true)]
    lon: f64,

    /// Start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    start_date: NaiveDate,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    end_date: NaiveDate,

    /// Action to perform: max_temp, min_temp, avg_temp, max_wind, min_wind, avg_wind,
    /// max_soil, min_soil, avg_soil, extreme_temp_date, extreme_wind_date,
    /// extreme_soil_date or full_report
    #[arg(long)]
    action: String,

    /// Directory for CSV files; charts go to its "plots" subdirectory
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Only write CSV files
    #[arg(long)]
    no_charts: bool,

    /// Forecast endpoint to query
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let action: Action = match cli.action.parse() {
        Ok(action) => action,
        Err(e) => {
            println!("{e}");
            return ExitCode::SUCCESS;
        }
    };

    match run(&cli, action).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(MeteoStatsError::Fetch(e)) => {
            match e.status() {
                Some(status) => {
                    eprintln!("Failed to fetch data. Status code: {}", status.as_u16())
                }
                None => eprintln!("Failed to fetch data: {e}"),
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, action: Action) -> Result<(), MeteoStatsError> {
    let client = MeteoStats::builder()
        .base_url(cli.base_url.clone())
        .timeout(Duration::from_secs(cli.timeout_secs))
        .output_dir(cli.output_dir.clone())
        .render_charts(!cli.no_charts)
        .build()?;

    println!("Fetching weather data...");
    let outcome = client
        .report()
        .location(LatLon(cli.lat, cli.lon))
        .start_date(cli.start_date)
        .end_date(cli.end_date)
        .action(action)
        .call()
        .await?;

    print!("{outcome}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 7] = [
        "meteo_stats",
        "--start-date",
        "2024-01-01",
        "--end-date",
        "2024-01-07",
        "--action",
        "avg_temp",
    ];

    #[test]
    fn test_default_arguments() {
        let cli = Cli::try_parse_from(REQUIRED).unwrap();

        assert_eq!(cli.lat, 52.52);
        assert_eq!(cli.lon, 13.41);
        assert_eq!(cli.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(cli.end_date, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(cli.action, "avg_temp");
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.timeout_secs, 30);
        assert!(!cli.no_charts);
    }

    #[test]
    fn test_custom_coordinates() {
        let args = REQUIRED
            .iter()
            .copied()
            .chain(["--lat", "40.0", "--lon", "-70.5"]);

        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.lat, 40.0);
        assert_eq!(cli.lon, -70.5);
    }

    #[test]
    fn test_partial_coordinates() {
        let args = REQUIRED.iter().copied().chain(["--lat", "25.5"]);

        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.lat, 25.5);
        assert_eq!(cli.lon, 13.41);
    }

    #[test]
    fn test_required_arguments() {
        assert!(Cli::try_parse_from(["meteo_stats", "--action", "avg_temp"]).is_err());
        assert!(Cli::try_parse_from(&REQUIRED[..5]).is_err());
    }

    #[test]
    fn test_invalid_date() {
        let mut args = REQUIRED;
        args[2] = "2024-13-01";
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_unknown_action_is_accepted_by_parser() {
        let mut args = REQUIRED;
        args[6] = "max_rain";

        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(
            cli.action.parse::<Action>().unwrap_err().to_string(),
            "Unknown action: max_rain"
        );
    }
}
