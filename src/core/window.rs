use std::num::NonZeroUsize;

use serde::Serialize;

use crate::{
    core::{point::PricePoint, series::sorted_by_time},
    quantity::rate::KilowattHourRate,
};

/// Contiguous run of consecutive points taken from the chronologically sorted series.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Window {
    points: Vec<PricePoint>,
    sum: KilowattHourRate,
}

/// The contiguous n-hour span with the lowest total price.
pub type CheapestWindow = Window;

impl Window {
    fn new(points: Vec<PricePoint>) -> Self {
        debug_assert!(!points.is_empty());
        let sum = points.iter().map(|point| point.value).sum();
        Self { points, sum }
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub const fn sum(&self) -> KilowattHourRate {
        self.sum
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn average(&self) -> KilowattHourRate {
        self.sum() / self.points.len() as f64
    }

    pub fn first(&self) -> PricePoint {
        self.points[0]
    }

    pub fn last(&self) -> PricePoint {
        self.points[self.points.len() - 1]
    }

    #[must_use]
    pub fn contains(&self, point: &PricePoint) -> bool {
        self.points.iter().any(|inner| inner.time() == point.time())
    }
}

/// Find the `n`-point window with the minimal sum.
///
/// The earliest window wins ties. Returns `None` when there are fewer than `n` points.
pub fn cheapest_window(points: &[PricePoint], n: NonZeroUsize) -> Option<CheapestWindow> {
    find_window(points, n, |sum, best| sum < best - SUM_TOLERANCE)
}

/// Find the `n`-point window with the maximal sum, the earliest one wins ties.
pub fn most_expensive_window(points: &[PricePoint], n: NonZeroUsize) -> Option<Window> {
    find_window(points, n, |sum, best| sum > best + SUM_TOLERANCE)
}

/// Find the cheapest window and, optionally, the runner-up which does not overlap it.
///
/// The runner-up is searched among the points strictly before and strictly after the cheapest
/// window, the cheaper side wins. It is only returned when its average stays within `variance`
/// from the cheapest window average.
pub fn two_cheapest_windows(
    points: &[PricePoint],
    n: NonZeroUsize,
    variance: KilowattHourRate,
) -> Option<(CheapestWindow, Option<Window>)> {
    let cheapest = cheapest_window(points, n)?;
    let (start, end) = {
        let (first, last) = (cheapest.first(), cheapest.last());
        ((first.date, first.hour), (last.date, last.hour))
    };

    let before: Vec<_> =
        points.iter().filter(|point| (point.date, point.hour) < start).copied().collect();
    let after: Vec<_> =
        points.iter().filter(|point| (point.date, point.hour) > end).copied().collect();

    let runner_up = match (cheapest_window(&before, n), cheapest_window(&after, n)) {
        (Some(before), Some(after)) => {
            Some(if before.average() < after.average() { before } else { after })
        }
        (before, after) => before.or(after),
    }
    .filter(|runner_up| (cheapest.average() - runner_up.average()).abs() <= variance);

    Some((cheapest, runner_up))
}

/// Running sums drift by a few ULPs: a later window only wins by more than this.
const SUM_TOLERANCE: f64 = 1e-9;

/// Slide the window over the sorted points while keeping the running sum.
fn find_window(
    points: &[PricePoint],
    n: NonZeroUsize,
    is_better: impl Fn(f64, f64) -> bool,
) -> Option<Window> {
    let n = n.get();
    if points.len() < n {
        return None;
    }
    let sorted = sorted_by_time(points);

    let mut sum: f64 = sorted[..n].iter().map(|point| point.value.0).sum();
    let (mut best_start, mut best_sum) = (0, sum);
    for start in 1..=(sorted.len() - n) {
        sum += sorted[start + n - 1].value.0 - sorted[start - 1].value.0;
        if is_better(sum, best_sum) {
            best_start = start;
            best_sum = sum;
        }
    }

    Some(Window::new(sorted[best_start..best_start + n].to_vec()))
}
