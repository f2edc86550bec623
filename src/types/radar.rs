//! Types describing radar products: the metadata rows returned by `/radar`
//! and the (region, quality) matrix that maps onto object-storage key folders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One radar metadata row returned by `GET /radar`.
///
/// `file_name` is the object-storage key of the corresponding `.scu` file and
/// can be passed directly to [`crate::RadarClient`]'s download methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarScan {
    /// Object key of the `.scu` file inside the radar bucket.
    pub file_name: String,
    /// Start of the sensing interval (UTC).
    pub sensing_start: DateTime<Utc>,
    /// End of the sensing interval (UTC).
    pub sensing_end: DateTime<Utc>,
    /// Producing region, `"NRW"` or `"LfU"`.
    pub region: String,
}

/// Radar network the product originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadarRegion {
    /// North Rhine-Westphalia composite.
    Nrw,
    /// Bavarian LfU composite.
    Lfu,
}

impl RadarRegion {
    pub(crate) fn as_param(&self) -> &'static str {
        match self {
            RadarRegion::Nrw => "NRW",
            RadarRegion::Lfu => "LfU",
        }
    }
}

impl fmt::Display for RadarRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// Processing quality level of a radar product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadarQuality {
    /// Near-realtime product.
    Q1,
    /// Quality-controlled product.
    Q3,
}

impl RadarQuality {
    pub(crate) fn as_param(&self) -> &'static str {
        match self {
            RadarQuality::Q1 => "Q1",
            RadarQuality::Q3 => "Q3",
        }
    }
}

impl fmt::Display for RadarQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// Maps (region, quality) to the key folder under the radar root.
///
/// Only NRW×Q1, NRW×Q3 and LfU×Q3 exist in the bucket; other combinations
/// return `None` so callers can reject them before listing a prefix that can
/// never match anything.
pub(crate) fn product_folder(region: RadarRegion, quality: RadarQuality) -> Option<&'static str> {
    match (region, quality) {
        (RadarRegion::Nrw, RadarQuality::Q1) => Some("NRW_Q1"),
        (RadarRegion::Nrw, RadarQuality::Q3) => Some("NRW_Q3"),
        (RadarRegion::Lfu, RadarQuality::Q3) => Some("LFU_Q3"),
        (RadarRegion::Lfu, RadarQuality::Q1) => None,
    }
}

/// Builds the object-storage prefix for all scans of one product on one day.
///
/// Layout inside the bucket: `<root>/<REGION>_<QUALITY>/<YYMMDD>/`, e.g.
/// `radar/NRW_Q1/250901/`.
pub(crate) fn storage_prefix(
    root: &str,
    region: RadarRegion,
    quality: RadarQuality,
    ts: DateTime<Utc>,
) -> Option<String> {
    let folder = product_folder(region, quality)?;
    let date_folder = ts.format("%y%m%d");
    Some(format!(
        "{}/{}/{}/",
        root.trim_end_matches('/'),
        folder,
        date_folder
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn prefix_matches_bucket_layout() {
        let ts = Utc.with_ymd_and_hms(2025, 9, 1, 14, 30, 0).unwrap();
        assert_eq!(
            storage_prefix("radar", RadarRegion::Nrw, RadarQuality::Q1, ts),
            Some("radar/NRW_Q1/250901/".to_string())
        );
        assert_eq!(
            storage_prefix("radar/", RadarRegion::Lfu, RadarQuality::Q3, ts),
            Some("radar/LFU_Q3/250901/".to_string())
        );
    }

    #[test]
    fn lfu_q1_is_not_a_product() {
        let ts = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        assert_eq!(
            storage_prefix("radar", RadarRegion::Lfu, RadarQuality::Q1, ts),
            None
        );
    }

    #[test]
    fn scan_row_deserializes() {
        let scan: RadarScan = serde_json::from_str(
            r#"{
                "file_name": "radar/NRW_Q1/250901/hd2509011430.scu",
                "sensing_start": "2025-09-01T14:30:00Z",
                "sensing_end": "2025-09-01T14:35:00Z",
                "region": "NRW"
            }"#,
        )
        .unwrap();
        assert_eq!(scan.region, "NRW");
        assert!(scan.sensing_end > scan.sensing_start);
    }
}
