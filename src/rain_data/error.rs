use crate::rain_data::dataset::Dataset;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("authentication rejected for {url} (HTTP {status}); check the bearer token")]
    Auth { url: String, status: StatusCode },

    #[error("failed to connect to {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("network request failed for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("page limit of {max_pages} reached at offset {offset}; the server never returned a short page")]
    PageLimitReached { max_pages: u32, offset: u64 },
}

/// A paginated fetch that failed part-way through.
///
/// Pages fetched before the failure are not discarded: `partial` holds every
/// record retrieved so far, so callers can render what succeeded next to the
/// error message.
#[derive(Debug, Error)]
#[error("paginated fetch failed at offset {offset} with {fetched} records already fetched", fetched = .partial.len())]
pub struct PaginatedFetchError {
    /// Offset of the page request that failed.
    pub offset: u64,
    /// Everything fetched before the failure, in fetch order.
    pub partial: Dataset,
    /// The underlying failure.
    #[source]
    pub source: FetchError,
}
