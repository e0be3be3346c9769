use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::Serialize;

use crate::{fmt::FormattedEuro, quantity::rate::KilowattHourRate};

/// Hour of the day, always within `0..=23`.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(into = "u32")]
pub struct Hour(u32);

#[derive(Debug, thiserror::Error)]
#[error("hour `{0}` is out of range `0..=23`")]
pub struct InvalidHour(String);

impl Hour {
    /// Hour of the wall-clock time, truncated.
    pub fn of(time: &impl Timelike) -> Self {
        Self(time.hour())
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn start_time(self) -> NaiveTime {
        NaiveTime::MIN + TimeDelta::hours(i64::from(self.0))
    }
}

impl TryFrom<u32> for Hour {
    type Error = InvalidHour;

    fn try_from(hour: u32) -> Result<Self, Self::Error> {
        if hour < 24 { Ok(Self(hour)) } else { Err(InvalidHour(hour.to_string())) }
    }
}

impl From<Hour> for u32 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

impl Display for Hour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// One hourly price observation.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub hour: Hour,
    pub value: KilowattHourRate,
}

impl PricePoint {
    pub const fn new(date: NaiveDate, hour: Hour, value: KilowattHourRate) -> Self {
        Self { date, hour, value }
    }

    /// Build the point from a timestamp, truncating it to the hour.
    pub fn at(time: NaiveDateTime, value: KilowattHourRate) -> Self {
        Self::new(time.date(), Hour::of(&time), value)
    }

    /// Start of the hour this point covers.
    #[must_use]
    pub fn time(&self) -> NaiveDateTime {
        self.date.and_time(self.hour.start_time())
    }
}

impl Display for PricePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:00", FormattedEuro::from(self.value), self.hour)
    }
}
