//! Provides the `RadarClient` for querying radar scan metadata and fetching
//! the `.scu` files behind it from object storage.
//!
//! Metadata comes from `GET /radar` (one row per scan, carrying the object
//! key); the binary artifacts are listed and downloaded straight from the
//! radar bucket, either by key or by (region, quality, date) prefix.

use crate::error::HeavyRainError;
use crate::heavyrain::HeavyRain;
use crate::object_store::{ObjectStore, StoredObject};
use crate::rain_data::error::FetchError;
use crate::rain_data::http::get_json;
use crate::types::query::Order;
use crate::types::radar::{self, RadarQuality, RadarRegion, RadarScan};
use crate::utils::{default_download_dir, to_utc_iso};
use bon::bon;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

const DEFAULT_HOURS: u32 = 168;
const DEFAULT_LIMIT: u32 = 1000;

/// A client builder for radar metadata and downloads.
///
/// Instances are created by calling
/// [`HeavyRain::radar()`](crate::HeavyRain::radar).
pub struct RadarClient<'a> {
    client: &'a HeavyRain,
}

#[bon]
impl<'a> RadarClient<'a> {
    pub(crate) fn new(client: &'a HeavyRain) -> Self {
        Self { client }
    }

    /// Lists radar scan metadata from `GET /radar`.
    ///
    /// Either give an explicit `.from_ts()`/`.to_ts()` range or let the
    /// server window to the last `.hours(n)` (default 168). Results carry
    /// the object key of each `.scu` file.
    ///
    /// # Errors
    ///
    /// [`FetchError::Auth`] on 401/403, [`FetchError::Connection`] when the
    /// host is unreachable, [`FetchError::HttpStatus`] for other non-2xx
    /// responses.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use heavyrain::{HeavyRain, HeavyRainError, RadarQuality, RadarRegion};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), HeavyRainError> {
    /// let client = HeavyRain::new()?;
    /// let scans = client
    ///     .radar()
    ///     .list()
    ///     .hours(24)
    ///     .region(RadarRegion::Nrw)
    ///     .quality(RadarQuality::Q1)
    ///     .call()
    ///     .await?;
    /// println!("{} scans in the last 24h", scans.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn list(
        &self,
        from_ts: Option<DateTime<Utc>>,
        to_ts: Option<DateTime<Utc>>,
        hours: Option<u32>,
        region: Option<RadarRegion>,
        quality: Option<RadarQuality>,
        limit: Option<u32>,
        offset: Option<u64>,
        order: Option<Order>,
    ) -> Result<Vec<RadarScan>, FetchError> {
        let api = &self.client.config().radar.api;
        let url = format!("{}/radar", api.base_url);
        let params = list_params(
            from_ts,
            to_ts,
            hours.unwrap_or(DEFAULT_HOURS),
            region,
            quality,
            limit.unwrap_or(DEFAULT_LIMIT),
            offset.unwrap_or(0),
            order.unwrap_or_default(),
        );
        get_json(self.client.http(), &url, api.token.as_deref(), &params).await
    }

    /// Downloads `.scu` files by object key (as returned in
    /// [`RadarScan::file_name`]) into `destination`, defaulting to the
    /// system cache directory.
    ///
    /// # Errors
    ///
    /// [`HeavyRainError::StoreNotConfigured`] when `MINIO_ENDPOINT` is not
    /// set; [`HeavyRainError::ObjectStore`] for listing/download failures.
    #[builder]
    pub async fn download(
        &self,
        file_names: Vec<String>,
        destination: Option<PathBuf>,
    ) -> Result<Vec<PathBuf>, HeavyRainError> {
        let destination = match destination {
            Some(dir) => dir,
            None => default_download_dir("radar")?,
        };
        let store = self.store()?;
        Ok(store.download_all(&file_names, &destination).await?)
    }

    /// Lists the objects of one radar product for one day without
    /// downloading them.
    #[builder]
    pub async fn objects_for_date(
        &self,
        region: RadarRegion,
        quality: RadarQuality,
        date: DateTime<Utc>,
    ) -> Result<Vec<StoredObject>, HeavyRainError> {
        let prefix = self.date_prefix(region, quality, date)?;
        Ok(self.store()?.list(&prefix).await?)
    }

    /// Downloads every scan of one radar product for one day.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::{TimeZone, Utc};
    /// use heavyrain::{HeavyRain, HeavyRainError, RadarQuality, RadarRegion};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), HeavyRainError> {
    /// let client = HeavyRain::new()?;
    /// let files = client
    ///     .radar()
    ///     .download_for_date()
    ///     .region(RadarRegion::Nrw)
    ///     .quality(RadarQuality::Q1)
    ///     .date(Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap())
    ///     .call()
    ///     .await?;
    /// println!("downloaded {} files", files.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn download_for_date(
        &self,
        region: RadarRegion,
        quality: RadarQuality,
        date: DateTime<Utc>,
        destination: Option<PathBuf>,
    ) -> Result<Vec<PathBuf>, HeavyRainError> {
        let destination = match destination {
            Some(dir) => dir,
            None => default_download_dir("radar")?,
        };
        let prefix = self.date_prefix(region, quality, date)?;
        let store = self.store()?;
        let objects = store.list(&prefix).await?;

        let mut paths = Vec::with_capacity(objects.len());
        for object in &objects {
            paths.push(store.download(&object.key, &destination).await?);
        }
        Ok(paths)
    }

    fn store(&self) -> Result<ObjectStore, HeavyRainError> {
        let config = &self.client.config().radar;
        let store = config
            .store
            .as_ref()
            .ok_or(HeavyRainError::StoreNotConfigured("radar"))?;
        Ok(ObjectStore::connect(store, config.bucket.clone()))
    }

    fn date_prefix(
        &self,
        region: RadarRegion,
        quality: RadarQuality,
        date: DateTime<Utc>,
    ) -> Result<String, HeavyRainError> {
        radar::storage_prefix(&self.client.config().radar.prefix, region, quality, date)
            .ok_or(HeavyRainError::UnsupportedRadarProduct { region, quality })
    }
}

#[allow(clippy::too_many_arguments)]
fn list_params(
    from_ts: Option<DateTime<Utc>>,
    to_ts: Option<DateTime<Utc>>,
    hours: u32,
    region: Option<RadarRegion>,
    quality: Option<RadarQuality>,
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
    if let Some(quality) = quality {
        params.push(("quality", quality.as_param().to_string()));
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
    fn default_listing_uses_hours_window() {
        let params = list_params(None, None, 168, None, None, 1000, 0, Order::Desc);

        assert_eq!(get(&params, "hours"), Some("168"));
        assert_eq!(get(&params, "region"), None);
        assert_eq!(get(&params, "quality"), None);
        assert_eq!(get(&params, "order"), Some("desc"));
    }

    #[test]
    fn explicit_range_and_product_filters() {
        let from = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 9, 2, 0, 0, 0).unwrap();
        let params = list_params(
            Some(from),
            Some(to),
            168,
            Some(RadarRegion::Nrw),
            Some(RadarQuality::Q3),
            500,
            500,
            Order::Asc,
        );

        assert_eq!(get(&params, "from_ts"), Some("2025-09-01T00:00:00Z"));
        assert_eq!(get(&params, "to_ts"), Some("2025-09-02T00:00:00Z"));
        assert_eq!(get(&params, "hours"), None);
        assert_eq!(get(&params, "region"), Some("NRW"));
        assert_eq!(get(&params, "quality"), Some("Q3"));
        assert_eq!(get(&params, "limit"), Some("500"));
        assert_eq!(get(&params, "offset"), Some("500"));
        assert_eq!(get(&params, "order"), Some("asc"));
    }
}
