use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use ordered_float::OrderedFloat;
use serde::Serialize;

/// Euro per kilowatt-hour.
#[repr(transparent)]
#[derive(
    Clone,
    Copy,
    Default,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct KilowattHourRate(pub f64);

impl KilowattHourRate {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl Div<f64> for KilowattHourRate {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl PartialEq for KilowattHourRate {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.0).eq(&OrderedFloat(other.0))
    }
}

impl Eq for KilowattHourRate {}

impl PartialOrd for KilowattHourRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KilowattHourRate {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.0).cmp(&OrderedFloat(other.0))
    }
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} €/kWh", self.0)
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}€/kWh", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(KilowattHourRate(0.08) < KilowattHourRate(0.09));
        assert_eq!(
            KilowattHourRate(0.1).max(KilowattHourRate(-0.2)),
            KilowattHourRate(0.1),
        );
    }

    #[test]
    fn test_sum_and_divide() {
        let sum: KilowattHourRate =
            [KilowattHourRate(0.5), KilowattHourRate(0.25), KilowattHourRate(0.75)]
                .into_iter()
                .sum();
        assert_eq!(sum / 3.0, KilowattHourRate(0.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(KilowattHourRate(0.12345).to_string(), "0.123 €/kWh");
    }
}
