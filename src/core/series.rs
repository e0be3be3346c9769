use chrono::NaiveDate;
use itertools::Itertools;

use crate::core::point::PricePoint;

/// Prices fetched for the inclusive date range `start..=end`.
///
/// Points keep the provider order, which is not necessarily chronological.
#[must_use]
#[derive(Clone, Debug, derive_more::Deref)]
pub struct PriceSeries {
    pub start: NaiveDate,
    pub end: NaiveDate,

    #[deref]
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub const fn new(start: NaiveDate, end: NaiveDate, points: Vec<PricePoint>) -> Self {
        Self { start, end, points }
    }

    /// Series with a single day range.
    pub const fn on(date: NaiveDate, points: Vec<PricePoint>) -> Self {
        Self::new(date, date, points)
    }

    /// Copy of the points in chronological order. Equal timestamps keep their relative order.
    #[must_use]
    pub fn sorted(&self) -> Vec<PricePoint> {
        sorted_by_time(&self.points)
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

pub fn sorted_by_time(points: &[PricePoint]) -> Vec<PricePoint> {
    points.iter().copied().sorted_by_key(PricePoint::time).collect()
}
