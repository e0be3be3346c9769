use std::error::Error as StdError;

/// Failures of the price data source and the aggregates built on top of it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No provider endpoint is configured, not recoverable at runtime.
    #[error("no price endpoint is configured, set `PRICES_API`")]
    Configuration,

    /// The provider could not be reached, timed out, or returned a malformed payload.
    #[error("price data is unavailable: {context}")]
    Unavailable {
        context: &'static str,

        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// An aggregate was asked to summarize zero points.
    #[error("cannot summarize an empty price series")]
    EmptySeries,
}

impl Error {
    pub fn unavailable(
        context: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Unavailable { context, source: source.into() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
