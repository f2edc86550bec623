use crate::config::ConfigError;
use crate::object_store::error::ObjectStoreError;
use crate::rain_data::error::{FetchError, PaginatedFetchError};
use crate::types::radar::{RadarQuality, RadarRegion};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeavyRainError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    PaginatedFetch(#[from] Box<PaginatedFetchError>),

    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("query matched no records")]
    EmptyResult,

    #[error("DataFrame construction failed")]
    DataFrame(#[from] polars::error::PolarsError),

    #[error("{0} object store is not configured; set MINIO_ENDPOINT and its credentials")]
    StoreNotConfigured(&'static str),

    #[error("unsupported radar product {region} {quality}")]
    UnsupportedRadarProduct {
        region: RadarRegion,
        quality: RadarQuality,
    },

    #[error("failed to construct HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to determine a download directory")]
    DownloadDirResolution,
}

impl From<PaginatedFetchError> for HeavyRainError {
    fn from(err: PaginatedFetchError) -> Self {
        HeavyRainError::PaginatedFetch(Box::new(err))
    }
}
