//! Provides the `IotClient` for querying IoT rain-gauge readings.
//!
//! This client is obtained via [`HeavyRain::iot()`](crate::HeavyRain::iot).
//! It exposes one builder-style operation, [`fetch`](IotClient::fetch), which
//! pages through the `/iot` endpoint and returns the concatenated
//! [`Dataset`].

use crate::config::ApiConfig;
use crate::heavyrain::HeavyRain;
use crate::rain_data::dataset::Dataset;
use crate::rain_data::error::{FetchError, PaginatedFetchError};
use crate::rain_data::http::get_json;
use crate::rain_data::pagination::{fetch_all_pages, PageSource};
use crate::types::query::Order;
use crate::types::reading::RainReading;
use crate::utils::to_utc_iso;
use bon::bon;
use chrono::{DateTime, Utc};

const DEFAULT_HOURS: u32 = 168;
const DEFAULT_PAGE_SIZE: u32 = 1000;
const DEFAULT_MAX_PAGES: u32 = 1000;

/// A client builder specifically for fetching rain-gauge readings.
///
/// Instances are created by calling [`HeavyRain::iot()`](crate::HeavyRain::iot).
pub struct IotClient<'a> {
    client: &'a HeavyRain,
}

#[bon]
impl<'a> IotClient<'a> {
    pub(crate) fn new(client: &'a HeavyRain) -> Self {
        Self { client }
    }

    /// Fetches every page of a rain-gauge query and returns the full
    /// [`Dataset`].
    ///
    /// Pages are requested sequentially with increasing offsets. The loop
    /// stops as soon as the server returns fewer records than the page size
    /// (a short or empty page); a result set that is an exact multiple of
    /// the page size therefore costs one extra, empty request. A
    /// configurable page cap guards against a server that never returns a
    /// short page.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.dev_eui(impl Into<String>)`: Optional. Restrict to one device.
    /// * `.city(impl Into<String>)`: Optional. Restrict to one city/station.
    /// * `.from_ts(DateTime<Utc>)` / `.to_ts(DateTime<Utc>)`: Optional.
    ///   Explicit time range, sent as ISO-8601 `Z` timestamps.
    /// * `.hours(u32)`: Optional. "Last N hours" window, sent only when no
    ///   explicit range is given. Defaults to `168`.
    /// * `.only_with_known_location(bool)`: Optional. Defaults to `true`.
    /// * `.source(impl Into<String>)`: Optional ingest path filter.
    ///   Defaults to `"auto"`.
    /// * `.order(Order)`: Optional. Defaults to [`Order::Desc`].
    /// * `.page_size(u32)`: Optional. Records per request. Defaults to `1000`.
    /// * `.max_pages(u32)`: Optional. Safety cap on page requests. Defaults
    ///   to `1000`.
    /// * `.dedup(bool)`: Optional. Collapse records repeated across page
    ///   boundaries. Defaults to `true`.
    ///
    /// # Errors
    ///
    /// Returns a [`PaginatedFetchError`] naming the offset of the failed
    /// page and carrying everything fetched before the failure, so partial
    /// results are never silently discarded. The underlying
    /// [`FetchError`](crate::FetchError) distinguishes auth rejections
    /// (401/403), unreachable hosts, other HTTP failures, and the page cap.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use heavyrain::{HeavyRain, HeavyRainError};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), HeavyRainError> {
    /// let client = HeavyRain::new()?;
    ///
    /// let data = client
    ///     .iot()
    ///     .fetch()
    ///     .city("Dortmund")
    ///     .hours(72)
    ///     .page_size(500)
    ///     .call()
    ///     .await?;
    ///
    /// data.ensure_non_empty()?;
    /// println!("{} readings in {} page(s)", data.len(), data.pages());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn fetch(
        &self,
        #[builder(into)] dev_eui: Option<String>,
        #[builder(into)] city: Option<String>,
        from_ts: Option<DateTime<Utc>>,
        to_ts: Option<DateTime<Utc>>,
        hours: Option<u32>,
        only_with_known_location: Option<bool>,
        #[builder(into)] source: Option<String>,
        order: Option<Order>,
        page_size: Option<u32>,
        max_pages: Option<u32>,
        dedup: Option<bool>,
    ) -> Result<Dataset, PaginatedFetchError> {
        let query = IotQuery {
            dev_eui,
            city,
            from_ts,
            to_ts,
            hours: hours.unwrap_or(DEFAULT_HOURS),
            only_with_known_location: only_with_known_location.unwrap_or(true),
            source: source.unwrap_or_else(|| "auto".to_string()),
            order: order.unwrap_or_default(),
        };
        let pages = HttpPageSource {
            http: self.client.http(),
            api: &self.client.config().iot,
            query,
        };
        fetch_all_pages(
            &pages,
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            max_pages.unwrap_or(DEFAULT_MAX_PAGES),
            dedup.unwrap_or(true),
        )
        .await
    }
}

/// The fixed part of an `/iot` query; offset and limit vary per page.
struct IotQuery {
    dev_eui: Option<String>,
    city: Option<String>,
    from_ts: Option<DateTime<Utc>>,
    to_ts: Option<DateTime<Utc>>,
    hours: u32,
    only_with_known_location: bool,
    source: String,
    order: Order,
}

impl IotQuery {
    fn params(&self, offset: u64, limit: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (
                "only_with_known_location",
                self.only_with_known_location.to_string(),
            ),
            ("source", self.source.clone()),
            ("order", self.order.as_param().to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(from_ts) = &self.from_ts {
            params.push(("from_ts", to_utc_iso(from_ts)));
        }
        if let Some(to_ts) = &self.to_ts {
            params.push(("to_ts", to_utc_iso(to_ts)));
        }
        // "Last N hours" only applies when no explicit range is given.
        if self.from_ts.is_none() && self.to_ts.is_none() {
            params.push(("hours", self.hours.to_string()));
        }
        if let Some(dev_eui) = &self.dev_eui {
            params.push(("dev_eui", dev_eui.clone()));
        }
        if let Some(city) = &self.city {
            params.push(("city", city.clone()));
        }
        params
    }
}

struct HttpPageSource<'a> {
    http: &'a reqwest::Client,
    api: &'a ApiConfig,
    query: IotQuery,
}

impl PageSource for HttpPageSource<'_> {
    async fn fetch_page(&self, offset: u64, limit: u32) -> Result<Vec<RainReading>, FetchError> {
        let url = format!("{}/iot", self.api.base_url);
        get_json(
            self.http,
            &url,
            self.api.token.as_deref(),
            &self.query.params(offset, limit),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn query() -> IotQuery {
        IotQuery {
            dev_eui: None,
            city: None,
            from_ts: None,
            to_ts: None,
            hours: DEFAULT_HOURS,
            only_with_known_location: true,
            source: "auto".to_string(),
            order: Order::Desc,
        }
    }

    fn get<'a>(params: &'a [(&str, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn default_query_sends_hours_window() {
        let params = query().params(0, 1000);

        assert_eq!(get(&params, "hours"), Some("168"));
        assert_eq!(get(&params, "only_with_known_location"), Some("true"));
        assert_eq!(get(&params, "source"), Some("auto"));
        assert_eq!(get(&params, "order"), Some("desc"));
        assert_eq!(get(&params, "limit"), Some("1000"));
        assert_eq!(get(&params, "offset"), Some("0"));
        assert_eq!(get(&params, "dev_eui"), None);
        assert_eq!(get(&params, "city"), None);
    }

    #[test]
    fn explicit_range_suppresses_hours() {
        let mut q = query();
        q.from_ts = Some(Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap());
        q.to_ts = Some(Utc.with_ymd_and_hms(2025, 9, 2, 0, 0, 0).unwrap());

        let params = q.params(500, 500);

        assert_eq!(get(&params, "from_ts"), Some("2025-09-01T00:00:00Z"));
        assert_eq!(get(&params, "to_ts"), Some("2025-09-02T00:00:00Z"));
        assert_eq!(get(&params, "hours"), None);
        assert_eq!(get(&params, "offset"), Some("500"));
    }

    #[test]
    fn half_open_range_still_suppresses_hours() {
        let mut q = query();
        q.from_ts = Some(Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap());

        let params = q.params(0, 1000);

        assert_eq!(get(&params, "from_ts"), Some("2025-09-01T00:00:00Z"));
        assert_eq!(get(&params, "hours"), None);
    }

    #[test]
    fn filters_are_passed_through() {
        let mut q = query();
        q.dev_eui = Some("a81758fffe051d02".to_string());
        q.city = Some("Dortmund".to_string());
        q.only_with_known_location = false;

        let params = q.params(0, 100);

        assert_eq!(get(&params, "dev_eui"), Some("a81758fffe051d02"));
        assert_eq!(get(&params, "city"), Some("Dortmund"));
        assert_eq!(get(&params, "only_with_known_location"), Some("false"));
    }
}
