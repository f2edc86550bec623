//! Provides the `SatelliteClient` for querying satellite scene metadata and
//! fetching the raw GeoTIFFs from object storage.
//!
//! Mirrors the radar client: `GET /satellite` for metadata rows, the
//! satellite bucket for the binaries, addressed by key or by (region, date)
//! prefix.

use crate::error::HeavyRainError;
use crate::heavyrain::HeavyRain;
use crate::object_store::{ObjectStore, StoredObject};
use crate::rain_data::error::FetchError;
use crate::rain_data::http::get_json;
use crate::types::query::Order;
use crate::types::satellite::{self, SatelliteRegion, SatelliteScene};
use crate::utils::{default_download_dir, to_utc_iso};
use bon::bon;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

// Scenes arrive far less often than gauge readings; a day of history is the
// usual notebook window.
const DEFAULT_HOURS: u32 = 24;
const DEFAULT_LIMIT: u32 = 1000;

/// A client builder for satellite metadata and downloads.
///
/// Instances are created by calling
/// [`HeavyRain::satellite()`](crate::HeavyRain::satellite).
pub struct SatelliteClient<'a> {
    client: &'a HeavyRain,
}

#[bon]
impl<'a> SatelliteClient<'a> {
    pub(crate) fn new(client: &'a HeavyRain) -> Self {
        Self { client }
    }

    /// Lists satellite scene metadata from `GET /satellite`.
    ///
    /// Either give an explicit `.from_ts()`/`.to_ts()` range or let the
    /// server window to the last `.hours(n)` (default 24).
    ///
    /// # Errors
    ///
    /// Same surface as the radar listing: [`FetchError::Auth`],
    /// [`FetchError::Connection`], [`FetchError::HttpStatus`],
    /// [`FetchError::Decode`].
    #[builder]
    pub async fn list(
        &self,
        from_ts: Option<DateTime<Utc>>,
        to_ts: Option<DateTime<Utc>>,
        hours: Option<u32>,
        region: Option<SatelliteRegion>,
        limit: Option<u32>,
        offset: Option<u64>,
        order: Option<Order>,
    ) -> Result<Vec<SatelliteScene>, FetchError> {
        let api = &self.client.config().satellite.api;
        let url = format!("{}/satellite", api.base_url);
        let params = list_params(
            from_ts,
            to_ts,
            hours.unwrap_or(DEFAULT_HOURS),
            region,
            limit.unwrap_or(DEFAULT_LIMIT),
            offset.unwrap_or(0),
            order.unwrap_or_default(),
        );
        get_json(self.client.http(), &url, api.token.as_deref(), &params).await
    }

    /// Downloads GeoTIFFs by object key (as returned in
    /// [`SatelliteScene::location`]) into `destination`, defaulting to the
    /// system cache directory.
    #[builder]
    pub async fn download(
        &self,
        locations: Vec<String>,
        destination: Option<PathBuf>,
    ) -> Result<Vec<PathBuf>, HeavyRainError> {
        let destination = match destination {
            Some(dir) => dir,
            None => default_download_dir("satellite")?,
        };
        let store = self.store()?;
        Ok(store.download_all(&locations, &destination).await?)
    }

    /// Lists the scene objects of one region for one day without
    /// downloading them.
    #[builder]
    pub async fn objects_for_date(
        &self,
        region: SatelliteRegion,
        date: DateTime<Utc>,
    ) -> Result<Vec<StoredObject>, HeavyRainError> {
        let prefix = self.date_prefix(region, date);
        Ok(self.store()?.list(&prefix).await?)
    }

    /// Downloads every scene of one region for one day.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::{TimeZone, Utc};
    /// use heavyrain::{HeavyRain, HeavyRainError, SatelliteRegion};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), HeavyRainError> {
    /// let client = HeavyRain::new()?;
    /// let files = client
    ///     .satellite()
    ///     .download_for_date()
    ///     .region(SatelliteRegion::Nrw)
    ///     .date(Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap())
    ///     .call()
    ///     .await?;
    /// println!("downloaded {} scenes", files.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn download_for_date(
        &self,
        region: SatelliteRegion,
        date: DateTime<Utc>,
        destination: Option<PathBuf>,
    ) -> Result<Vec<PathBuf>, HeavyRainError> {
        let destination = match destination {
            Some(dir) => dir,
            None => default_download_dir("satellite")?,
        };
        let prefix = self.date_prefix(region, date);
        let store = self.store()?;
        let objects = store.list(&prefix).await?;

        let mut paths = Vec::with_capacity(objects.len());
        for object in &objects {
            paths.push(store.download(&object.key, &destination).await?);
        }
        Ok(paths)
    }

    fn store(&self) -> Result<ObjectStore, HeavyRainError> {
        let config = &self.client.config().satellite;
        let store = config
            .store
            .as_ref()
            .ok_or(HeavyRainError::StoreNotConfigured("satellite"))?;
        Ok(ObjectStore::connect(store, config.bucket.clone()))
    }

    fn date_prefix(&self, region: SatelliteRegion, date: DateTime<Utc>) -> String {
        satellite::storage_prefix(&self.client.config().satellite.prefix, region, date)
    }
}

fn list_params(
    from_ts: Option<DateTime<Utc>>,
    to_ts: Option<DateTime<Utc>>,
    hours: u32,
    region: Option<SatelliteRegion>,
    limit: u32,
    offset: u64,
    order: Order,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
        ("order", order.as_param().to_string()),
    ];
    if let Some(from_ts) = &from_ts {
        params.push(("from_ts", to_utc_iso(from_ts)));
    }
    if let Some(to_ts) = &to_ts {
        params.push(("to_ts", to_utc_iso(to_ts)));
    }
    if from_ts.is_none() && to_ts.is_none() {
        params.push(("hours", hours.to_string()));
    }
    if let Some(region) = region {
        params.push(("region", region.as_param().to_string()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn get<'a>(params: &'a [(&str, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn default_listing_windows_to_a_day() {
        let params = list_params(None, None, 24, None, 1000, 0, Order::Desc);

        assert_eq!(get(&params, "hours"), Some("24"));
        assert_eq!(get(&params, "region"), None);
    }

    #[test]
    fn region_filter_uses_server_spelling() {
        let from = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let params = list_params(
            Some(from),
            None,
            24,
            Some(SatelliteRegion::Boo),
            100,
            0,
            Order::Asc,
        );

        assert_eq!(get(&params, "region"), Some("BOO"));
        assert_eq!(get(&params, "from_ts"), Some("2025-12-01T00:00:00Z"));
        assert_eq!(get(&params, "hours"), None);
    }
}
