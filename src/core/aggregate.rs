use average::Mean;
use chrono::Timelike;

use crate::{
    core::{
        error::{Error, Result},
        point::{Hour, PricePoint},
    },
    quantity::rate::KilowattHourRate,
};

/// Arithmetic mean of all the point values.
pub fn average(points: &[PricePoint]) -> Result<KilowattHourRate> {
    if points.is_empty() {
        return Err(Error::EmptySeries);
    }
    let estimate: Mean = points.iter().map(|point| point.value.0).collect();
    Ok(KilowattHourRate(estimate.mean()))
}

/// The cheapest point, the first one wins ties.
pub fn min_price(points: &[PricePoint]) -> Result<PricePoint> {
    points
        .iter()
        .copied()
        .reduce(|min, point| if point.value < min.value { point } else { min })
        .ok_or(Error::EmptySeries)
}

/// The most expensive point, the first one wins ties.
pub fn max_price(points: &[PricePoint]) -> Result<PricePoint> {
    points
        .iter()
        .copied()
        .reduce(|max, point| if point.value > max.value { point } else { max })
        .ok_or(Error::EmptySeries)
}

/// The first point covering the specified hour of the day, regardless of its date.
#[must_use]
pub fn price_at_hour(points: &[PricePoint], hour: Hour) -> Option<PricePoint> {
    points.iter().find(|point| point.hour == hour).copied()
}

/// The point covering the hour of `now`.
#[must_use]
pub fn current_price(points: &[PricePoint], now: &impl Timelike) -> Option<PricePoint> {
    price_at_hour(points, Hour::of(now))
}

#[cfg(test)]
pub mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, NaiveTime};
    use itertools::Itertools;

    use super::*;

    pub fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 13).unwrap()
    }

    pub fn point(hour: u32, value: f64) -> PricePoint {
        PricePoint::new(date(), Hour::try_from(hour).unwrap(), KilowattHourRate(value))
    }

    fn sample() -> Vec<PricePoint> {
        vec![point(3, 0.20), point(0, 0.10), point(2, 0.09), point(1, 0.08), point(4, 0.20)]
    }

    #[test]
    fn test_average() -> Result<()> {
        assert_abs_diff_eq!(average(&sample())?.0, 0.134, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_average_is_order_independent() -> Result<()> {
        let points = sample();
        let expected = average(&points)?;
        for permutation in points.iter().copied().permutations(points.len()) {
            assert_abs_diff_eq!(average(&permutation)?.0, expected.0, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_min_and_max_bound_average() -> Result<()> {
        let points = sample();
        assert!(min_price(&points)?.value <= average(&points)?);
        assert!(average(&points)? <= max_price(&points)?.value);
        Ok(())
    }

    #[test]
    fn test_min_price() -> Result<()> {
        assert_eq!(min_price(&sample())?, point(1, 0.08));
        Ok(())
    }

    #[test]
    fn test_max_price_first_wins() -> Result<()> {
        assert_eq!(max_price(&sample())?, point(3, 0.20));
        Ok(())
    }

    #[test]
    fn test_min_price_first_wins() -> Result<()> {
        let points = vec![point(5, 0.05), point(1, 0.05)];
        assert_eq!(min_price(&points)?, point(5, 0.05));
        Ok(())
    }

    #[test]
    fn test_empty_series() {
        assert!(matches!(average(&[]), Err(Error::EmptySeries)));
        assert!(matches!(min_price(&[]), Err(Error::EmptySeries)));
        assert!(matches!(max_price(&[]), Err(Error::EmptySeries)));
    }

    #[test]
    fn test_price_at_hour() {
        let points = sample();
        assert_eq!(price_at_hour(&points, Hour::try_from(2).unwrap()), Some(point(2, 0.09)));
        assert_eq!(price_at_hour(&points, Hour::try_from(17).unwrap()), None);
    }

    #[test]
    fn test_current_price() {
        let points = sample();
        let now = NaiveTime::from_hms_opt(1, 59, 59).unwrap();
        assert_eq!(current_price(&points, &now), Some(point(1, 0.08)));

        let now = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(current_price(&points, &now), None);
    }

    #[test]
    fn test_current_price_ignores_date() {
        let points = sample();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 30, 0).unwrap();
        assert_eq!(current_price(&points, &now), Some(point(0, 0.10)));
    }
}
