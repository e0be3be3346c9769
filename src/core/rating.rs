use std::{
    fmt::{Display, Formatter},
    num::{NonZeroU32, NonZeroUsize},
};

use chrono::NaiveDate;
use futures_util::future::try_join_all;
use serde::Serialize;

use crate::{
    core::{
        error::{Error, Result},
        provider::PriceDataSource,
        window::cheapest_window,
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
};

/// Tolerance which keeps the rating from flapping on noise.
pub const DEFAULT_VARIANCE: KilowattHourRate = KilowattHourRate(0.02);

/// How favourable the day is compared to the recent days.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayRating {
    Good,
    Normal,
    Bad,
}

impl Display for DayRating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => f.write_str("good"),
            Self::Normal => f.write_str("normal"),
            Self::Bad => f.write_str("bad"),
        }
    }
}

/// Compare the day's cheapest-window average against the rolling baseline.
pub fn day_rating(
    cheapest_average: KilowattHourRate,
    baseline: KilowattHourRate,
    variance: KilowattHourRate,
) -> DayRating {
    let margin = baseline - cheapest_average;
    if margin > variance {
        DayRating::Good
    } else if margin < -variance {
        DayRating::Bad
    } else {
        DayRating::Normal
    }
}

/// Mean of the cheapest-window averages over the last `n_days` days, today included.
///
/// Days without data, or with fewer points than the window, still count
/// towards the denominator. The days are fetched concurrently.
#[instrument(skip_all, fields(%today, %n_days, %window_hours))]
pub async fn rolling_cheap_average<S>(
    source: &S,
    today: NaiveDate,
    n_days: NonZeroU32,
    window_hours: NonZeroUsize,
) -> Result<KilowattHourRate>
where
    S: PriceDataSource + ?Sized,
{
    let averages = try_join_all((0..n_days.get()).map(|n_days_ago| async move {
        let series = source.fetch_days_ago(today, n_days_ago).await?;
        let average = cheapest_window(&series, window_hours).map(|window| window.average());
        if average.is_none() {
            debug!(n_days_ago, n_points = series.len(), "no cheapest window");
        }
        Ok::<_, Error>(average)
    }))
    .await?;
    let n_available = averages.iter().flatten().count();
    let total: KilowattHourRate = averages.into_iter().flatten().sum();
    let baseline = total / f64::from(n_days.get());
    info!(n_available, %baseline, "calculated the rolling baseline");
    Ok(baseline)
}
