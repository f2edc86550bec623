mod clients;
mod config;
mod error;
mod heavyrain;
mod object_store;
mod rain_data;
mod types;
mod utils;

pub use error::HeavyRainError;
pub use heavyrain::*;

pub use clients::iot_client::*;
pub use clients::radar_client::*;
pub use clients::satellite_client::*;

pub use config::{ApiConfig, Config, ConfigError, RadarConfig, SatelliteConfig, StoreConfig};

pub use types::query::Order;
pub use types::radar::{RadarQuality, RadarRegion, RadarScan};
pub use types::reading::{MaybeNumber, RainReading};
pub use types::satellite::{SatelliteRegion, SatelliteScene};

pub use rain_data::dataset::Dataset;
pub use rain_data::error::{FetchError, PaginatedFetchError};
pub use rain_data::pagination::{fetch_all_pages, PageSource};

pub use object_store::error::ObjectStoreError;
pub use object_store::{ObjectStore, StoredObject};
