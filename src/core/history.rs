use std::num::NonZeroU32;

use chrono::{Days, NaiveDate};
use futures_util::future::try_join_all;
use serde::Serialize;

use crate::{
    core::{
        aggregate::average,
        error::{Error, Result},
        provider::PriceDataSource,
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
};

/// Average price of a single calendar day, absent when the provider had no data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    pub average: Option<KilowattHourRate>,
}

/// Daily averages of the trailing `n_days` days, oldest first and today excluded.
#[instrument(skip_all, fields(%today, %n_days))]
pub async fn daily_averages<S>(
    source: &S,
    today: NaiveDate,
    n_days: NonZeroU32,
) -> Result<Vec<DailyAverage>>
where
    S: PriceDataSource + ?Sized,
{
    let averages = try_join_all((1..=n_days.get()).rev().map(|n_days_ago| async move {
        let series = source.fetch_days_ago(today, n_days_ago).await?;
        let date = today - Days::new(u64::from(n_days_ago));
        let average = if series.is_empty() {
            warn!(%date, "no prices");
            None
        } else {
            Some(average(&series)?)
        };
        Ok::<_, Error>(DailyAverage { date, average })
    }))
    .await?;
    info!(n_available = averages.iter().filter(|day| day.average.is_some()).count(), "fetched");
    Ok(averages)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::{
        point::{Hour, PricePoint},
        provider::tests::StaticSource,
    };

    #[tokio::test]
    async fn test_daily_averages() -> Result<()> {
        let today = NaiveDate::from_ymd_opt(2023, 5, 13).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2023, 5, 12).unwrap();
        let point = |date, hour: u32, value| {
            PricePoint::new(date, Hour::try_from(hour).unwrap(), KilowattHourRate(value))
        };
        let source = StaticSource::default()
            .with_day(vec![point(today, 0, 1.0)])
            .with_day(vec![point(yesterday, 0, 0.10), point(yesterday, 1, 0.20)]);

        let averages = daily_averages(&source, today, NonZeroU32::new(3).unwrap()).await?;

        let dates: Vec<_> = averages.iter().map(|day| day.date.to_string()).collect();
        assert_eq!(dates, ["2023-05-10", "2023-05-11", "2023-05-12"]);
        assert_eq!(averages[0].average, None);
        assert_eq!(averages[1].average, None);
        assert_abs_diff_eq!(averages[2].average.unwrap().0, 0.15, epsilon = 1e-12);
        Ok(())
    }
}
