//! This module provides the main entry point for interacting with the
//! heavyRAIN data platform. It hands out per-domain sub-clients for IoT
//! rain-gauge readings, radar scans and satellite scenes, all sharing one
//! configuration and one HTTP connection pool.

use crate::clients::iot_client::IotClient;
use crate::clients::radar_client::RadarClient;
use crate::clients::satellite_client::SatelliteClient;
use crate::config::Config;
use crate::error::HeavyRainError;
use std::time::Duration;

/// Timeout applied to every outbound request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The main client struct for accessing heavyRAIN data.
///
/// Holds the immutable [`Config`] (base URLs, tokens, object-storage
/// credentials) and the shared `reqwest::Client`. All queries go through the
/// sub-clients returned by [`iot()`](HeavyRain::iot),
/// [`radar()`](HeavyRain::radar) and [`satellite()`](HeavyRain::satellite).
///
/// Requests run sequentially: each fetch awaits one response before issuing
/// the next request. Cancellation is external: drop the future.
///
/// # Examples
///
/// ```no_run
/// use heavyrain::{HeavyRain, HeavyRainError};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), HeavyRainError> {
/// // Reads `.env` / the process environment once.
/// let client = HeavyRain::new()?;
///
/// let data = client
///     .iot()
///     .fetch()
///     .city("Dortmund")
///     .hours(72)
///     .call()
///     .await?;
///
/// println!("{}", data.plot_frame()?);
/// # Ok(())
/// # }
/// ```
pub struct HeavyRain {
    config: Config,
    http: reqwest::Client,
}

impl HeavyRain {
    /// Creates a client from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HeavyRainError::Config`] for malformed environment values
    /// and [`HeavyRainError::HttpClient`] if the HTTP client cannot be
    /// constructed. A *missing* token is not an error here; the remote API
    /// will answer with 401/403 when the first request goes out.
    pub fn new() -> Result<Self, HeavyRainError> {
        Self::with_config(Config::from_dotenv()?)
    }

    /// Creates a client from an explicit, already-built configuration.
    ///
    /// Use this to point the client at a non-default deployment without
    /// touching the environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use heavyrain::{Config, HeavyRain, HeavyRainError};
    ///
    /// # fn run() -> Result<(), HeavyRainError> {
    /// let mut config = Config::from_env()?;
    /// config.iot.base_url = "https://rain.example.org/api".to_string();
    /// let client = HeavyRain::with_config(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: Config) -> Result<Self, HeavyRainError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(HeavyRainError::HttpClient)?;
        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Sub-client for paginated IoT rain-gauge queries.
    pub fn iot(&self) -> IotClient<'_> {
        IotClient::new(self)
    }

    /// Sub-client for radar metadata queries and `.scu` downloads.
    pub fn radar(&self) -> RadarClient<'_> {
        RadarClient::new(self)
    }

    /// Sub-client for satellite metadata queries and GeoTIFF downloads.
    pub fn satellite(&self) -> SatelliteClient<'_> {
        SatelliteClient::new(self)
    }
}
