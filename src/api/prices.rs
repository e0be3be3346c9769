//! Day-ahead price API client.
//!
//! `GET <endpoint>?start=YYYY-MM-DD&end=YYYY-MM-DD` returns an array of `{price, dateTime}`.

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::{Client, Url};
use serde::{Deserialize, Deserializer, de};

use crate::{
    api::client,
    core::{
        error::{Error, Result},
        point::PricePoint,
        provider::PriceDataSource,
        series::PriceSeries,
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
};

pub struct Api {
    client: Client,
    endpoint: Url,
}

impl Api {
    /// Fails with [`Error::Configuration`] when no endpoint is specified.
    pub fn new(endpoint: Option<Url>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.ok_or(Error::Configuration)?;
        let client = client::try_new(timeout)
            .map_err(|error| Error::unavailable("failed to build the HTTP client", error))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl PriceDataSource for Api {
    #[instrument(skip_all, fields(%start, %end))]
    async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        debug!("fetching…");
        let records = self
            .client
            .get(self.endpoint.clone())
            .query(&[("start", start), ("end", end)])
            .send()
            .await
            .map_err(|error| Error::unavailable("failed to call", error))?
            .error_for_status()
            .map_err(|error| Error::unavailable("request failed", error))?
            .json::<Vec<Record>>()
            .await
            .map_err(|error| Error::unavailable("failed to deserialize the response", error))?;
        info!(n_points = records.len(), "fetched");
        let points = records.into_iter().map(PricePoint::from).collect();
        Ok(PriceSeries::new(start, end, points))
    }
}

#[derive(Deserialize)]
struct Record {
    price: f64,

    #[serde(rename = "dateTime", deserialize_with = "Record::deserialize_date_time")]
    date_time: NaiveDateTime,
}

impl Record {
    /// Keep the wall-clock time as published. Accepted forms:
    ///
    /// - RFC 3339: `2023-05-13T12:00:00+02:00`, `2023-05-13T10:00:00Z`
    /// - basic offset: `2023-05-13T12:00:00+0200`
    /// - naive: `2023-05-13T12:00:00`, `2023-05-13T12:00:00.000`
    /// - date only, meaning midnight: `2023-05-13`
    fn deserialize_date_time<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_date_time(&text).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&text), &"an ISO 8601 timestamp")
        })
    }

    fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(text)
            .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z"))
            .map(|date_time| date_time.naive_local())
            .or_else(|_| NaiveDateTime::from_str(text))
            .or_else(|_| NaiveDate::from_str(text).map(|date| date.and_time(NaiveTime::MIN)))
            .ok()
    }
}

impl From<Record> for PricePoint {
    fn from(record: Record) -> Self {
        Self::at(record.date_time, KilowattHourRate(record.price))
    }
}
