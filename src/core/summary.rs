use std::num::{NonZeroU32, NonZeroUsize};

use bon::Builder;
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::{
    core::{
        aggregate::{average, current_price, max_price, min_price},
        error::Result,
        history::{DailyAverage, daily_averages},
        point::PricePoint,
        provider::PriceDataSource,
        rating::{DEFAULT_VARIANCE, DayRating, day_rating, rolling_cheap_average},
        series::PriceSeries,
        window::{CheapestWindow, Window, most_expensive_window, two_cheapest_windows},
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
};

pub const DEFAULT_BASELINE_DAYS: NonZeroU32 = NonZeroU32::new(30).unwrap();
pub const DEFAULT_WINDOW_HOURS: NonZeroUsize = NonZeroUsize::new(3).unwrap();

/// Everything worth knowing about a single day with published prices.
#[derive(Clone, Debug, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,

    /// Chronologically sorted.
    pub prices: Vec<PricePoint>,

    pub average: KilowattHourRate,
    pub min: PricePoint,
    pub max: PricePoint,

    pub cheapest: Option<CheapestWindow>,

    /// Second cheapest window which does not overlap the cheapest one and is nearly as cheap.
    pub runner_up: Option<Window>,

    pub most_expensive: Option<Window>,

    /// Rolling baseline the rating was calculated against.
    pub baseline: KilowattHourRate,

    /// Absent when the day has fewer points than the window.
    pub rating: Option<DayRating>,
}

impl DaySummary {
    /// Summarize the series, or return `None` if the series is empty.
    pub fn try_new(
        series: &PriceSeries,
        baseline: KilowattHourRate,
        window_hours: NonZeroUsize,
        variance: KilowattHourRate,
    ) -> Result<Option<Self>> {
        if series.is_empty() {
            return Ok(None);
        }
        let (cheapest, runner_up) = match two_cheapest_windows(series, window_hours, variance) {
            Some((cheapest, runner_up)) => (Some(cheapest), runner_up),
            None => (None, None),
        };
        let rating =
            cheapest.as_ref().map(|cheapest| day_rating(cheapest.average(), baseline, variance));
        Ok(Some(Self {
            date: series.start,
            prices: series.sorted(),
            average: average(series)?,
            min: min_price(series)?,
            max: max_price(series)?,
            most_expensive: most_expensive_window(series, window_hours),
            cheapest,
            runner_up,
            baseline,
            rating,
        }))
    }
}

/// Full picture for the current moment.
#[derive(Clone, Debug, Serialize)]
pub struct Dashboard {
    pub now: NaiveDateTime,

    /// Average over the whole trailing period, today included.
    pub trailing_average: Option<KilowattHourRate>,

    pub current: Option<PricePoint>,
    pub baseline: KilowattHourRate,
    pub today: Option<DaySummary>,

    /// `None` until the next-day prices are published.
    pub tomorrow: Option<DaySummary>,

    pub history: Vec<DailyAverage>,
}

impl Dashboard {
    /// Difference from the trailing average.
    #[must_use]
    pub fn delta(&self, value: KilowattHourRate) -> Option<KilowattHourRate> {
        self.trailing_average.map(|average| value - average)
    }
}

/// Entry point of the analytics: binds the source, the current time, and the settings.
#[derive(Builder)]
pub struct Analyst<'a, S> {
    source: &'a S,
    now: NaiveDateTime,

    #[builder(default = DEFAULT_VARIANCE)]
    variance: KilowattHourRate,

    #[builder(default = DEFAULT_BASELINE_DAYS)]
    baseline_days: NonZeroU32,

    #[builder(default = DEFAULT_WINDOW_HOURS)]
    window_hours: NonZeroUsize,
}

impl<S: PriceDataSource> Analyst<'_, S> {
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub async fn baseline(&self) -> Result<KilowattHourRate> {
        rolling_cheap_average(self.source, self.today(), self.baseline_days, self.window_hours)
            .await
    }

    /// Summarize the specified day, `None` if there are no prices for it.
    #[instrument(skip_all, fields(%date))]
    pub async fn day(&self, date: NaiveDate) -> Result<Option<DaySummary>> {
        let (series, baseline) = tokio::try_join!(self.source.fetch(date, date), self.baseline())?;
        self.summarize(&series, baseline)
    }

    pub async fn history(&self, n_days: NonZeroU32) -> Result<Vec<DailyAverage>> {
        daily_averages(self.source, self.today(), n_days).await
    }

    #[instrument(skip_all, fields(now = %self.now))]
    pub async fn dashboard(&self) -> Result<Dashboard> {
        let today = self.today();
        let trailing_start = today - Days::new(u64::from(self.baseline_days.get()));
        let (trailing, today_series, tomorrow_series, baseline, history) = tokio::try_join!(
            self.source.fetch(trailing_start, today),
            self.source.fetch_today(today),
            self.source.fetch_tomorrow(today),
            self.baseline(),
            self.history(self.baseline_days),
        )?;
        if tomorrow_series.is_empty() {
            info!("tomorrow's prices are not yet published");
        }
        Ok(Dashboard {
            now: self.now,
            trailing_average: if trailing.is_empty() { None } else { Some(average(&trailing)?) },
            current: current_price(&today_series, &self.now),
            baseline,
            today: self.summarize(&today_series, baseline)?,
            tomorrow: self.summarize(&tomorrow_series, baseline)?,
            history,
        })
    }

    fn summarize(
        &self,
        series: &PriceSeries,
        baseline: KilowattHourRate,
    ) -> Result<Option<DaySummary>> {
        DaySummary::try_new(series, baseline, self.window_hours, self.variance)
    }
}
