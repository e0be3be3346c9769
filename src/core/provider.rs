use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use crate::core::{error::Result, series::PriceSeries};

/// Source of the raw hourly prices.
///
/// An empty series is a valid answer: the provider simply has no data for the range yet,
/// for example tomorrow's prices before they are published in the evening.
#[async_trait]
pub trait PriceDataSource: Sync {
    /// Fetch all the prices within the inclusive date range.
    async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries>;

    async fn fetch_today(&self, today: NaiveDate) -> Result<PriceSeries> {
        self.fetch(today, today).await
    }

    /// Empty series means «not yet published».
    async fn fetch_tomorrow(&self, today: NaiveDate) -> Result<PriceSeries> {
        let tomorrow = today + Days::new(1);
        self.fetch(tomorrow, tomorrow).await
    }

    async fn fetch_days_ago(&self, today: NaiveDate, n_days: u32) -> Result<PriceSeries> {
        let on = today - Days::new(u64::from(n_days));
        self.fetch(on, on).await
    }
}
