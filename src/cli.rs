mod dashboard;
mod history;
mod prices;
mod rating;

use std::{
    num::{NonZeroU32, NonZeroUsize},
    time::Duration,
};

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use reqwest::Url;

pub use self::{dashboard::dashboard, history::history, prices::prices, rating::rating};
use crate::{
    api::prices::Api as PricesApi,
    core::summary::Analyst,
    prelude::*,
    quantity::rate::KilowattHourRate,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub api: ApiArgs,

    #[clap(flatten)]
    pub analytics: AnalyticsArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: current, average, minimum, and maximum prices with the day ratings.
    #[clap(name = "dashboard")]
    Dashboard(DashboardArgs),

    /// Hourly prices of a single day with the cheapest and most expensive hours.
    #[clap(name = "prices")]
    Prices(DayArgs),

    /// Daily averages of the trailing days.
    #[clap(name = "history")]
    History(HistoryArgs),

    /// Rate a single day against the recent days.
    #[clap(name = "rating")]
    Rating(DayArgs),
}

#[derive(Parser)]
pub struct ApiArgs {
    /// Price API endpoint. For example: `https://example.com/api/v1/price`.
    #[clap(long = "prices-api", env = "PRICES_API", global = true)]
    pub endpoint: Option<Url>,

    /// Per-request timeout.
    #[clap(long = "timeout", env = "PRICES_API_TIMEOUT", default_value = "10s", global = true)]
    pub timeout: humantime::Duration,
}

impl ApiArgs {
    pub fn new_client(&self) -> Result<PricesApi> {
        let timeout: Duration = self.timeout.into();
        Ok(PricesApi::new(self.endpoint.clone(), timeout)?)
    }
}

#[derive(Copy, Clone, Parser)]
pub struct AnalyticsArgs {
    /// Tolerance around the rolling baseline, within which a day is rated normal.
    #[clap(long, env = "RATING_VARIANCE", default_value = "0.02", global = true)]
    pub variance: KilowattHourRate,

    /// Number of days in the rolling baseline and the trailing average.
    #[clap(long, env = "BASELINE_DAYS", default_value = "30", global = true)]
    pub baseline_days: NonZeroU32,

    /// Length of the cheapest and the most expensive windows.
    #[clap(long, env = "WINDOW_HOURS", default_value = "3", global = true)]
    pub window_hours: NonZeroUsize,
}

impl AnalyticsArgs {
    pub fn analyst<S>(self, source: &S, now: NaiveDateTime) -> Analyst<'_, S> {
        Analyst::builder()
            .source(source)
            .now(now)
            .variance(self.variance)
            .baseline_days(self.baseline_days)
            .window_hours(self.window_hours)
            .build()
    }
}

#[derive(Parser)]
pub struct DashboardArgs {
    /// Print the dashboard as JSON instead of the tables.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct DayArgs {
    /// Date to look at, defaults to today.
    #[clap(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct HistoryArgs {
    /// Number of the trailing days to show, today excluded.
    #[clap(long, env = "HISTORY_DAYS", default_value = "30")]
    pub days: NonZeroU32,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::core::rating::DEFAULT_VARIANCE;

    #[test]
    fn test_verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_dashboard() {
        let args = Args::try_parse_from([
            "voltio",
            "--prices-api",
            "http://localhost:8080/api/v1/price",
            "dashboard",
            "--json",
        ])
        .unwrap();
        assert!(matches!(args.command, Command::Dashboard(DashboardArgs { json: true })));
        assert_eq!(args.analytics.baseline_days.get(), 30);
        assert_eq!(args.analytics.window_hours.get(), 3);
        assert_eq!(args.analytics.variance, DEFAULT_VARIANCE);
        assert!(args.api.endpoint.is_some());
    }

    #[test]
    fn test_parse_prices_date() {
        let args = Args::try_parse_from(["voltio", "prices", "--date", "2023-05-13"]).unwrap();
        let Command::Prices(DayArgs { date }) = args.command else {
            panic!("unexpected command");
        };
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 5, 13));
    }

    #[test]
    fn test_parse_variance() {
        let args = Args::try_parse_from(["voltio", "--variance", "0.05", "rating"]).unwrap();
        assert_eq!(args.analytics.variance, KilowattHourRate(0.05));
        assert!(Args::try_parse_from(["voltio", "--variance", "cheap", "rating"]).is_err());
    }

    #[test]
    fn test_missing_endpoint_is_configuration_error() {
        let args = Args::try_parse_from(["voltio", "--timeout", "1s", "history"]).unwrap();
        let api = ApiArgs { endpoint: None, ..args.api };
        assert!(api.new_client().is_err());
    }
}
