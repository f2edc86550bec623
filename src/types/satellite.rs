//! Types describing satellite products: the metadata rows returned by
//! `/satellite` and the date-based object-storage layout of raw GeoTIFFs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One satellite metadata row returned by `GET /satellite`.
///
/// `location` is the object-storage key of the raw GeoTIFF and can be passed
/// directly to [`crate::SatelliteClient`]'s download methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteScene {
    /// Object key of the GeoTIFF inside the satellite bucket.
    pub location: String,
    /// Start of the sensing interval (UTC).
    pub sensing_start: DateTime<Utc>,
    /// End of the sensing interval (UTC).
    pub sensing_end: DateTime<Utc>,
}

/// Coverage region of a satellite scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatelliteRegion {
    /// North Rhine-Westphalia.
    Nrw,
    /// Boostedt reference area.
    Boo,
}

impl SatelliteRegion {
    pub(crate) fn as_param(&self) -> &'static str {
        match self {
            SatelliteRegion::Nrw => "NRW",
            SatelliteRegion::Boo => "BOO",
        }
    }
}

impl fmt::Display for SatelliteRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// Builds the object-storage prefix for all scenes of one region on one day.
///
/// Layout inside the bucket: `<root>/<REGION>/<YYYY>/<MonthName>/<dd>/`, e.g.
/// `satellite/NRW/2025/December/01/`.
pub(crate) fn storage_prefix(root: &str, region: SatelliteRegion, ts: DateTime<Utc>) -> String {
    format!(
        "{}/{}/{}/{}/{}/",
        root.trim_end_matches('/'),
        region.as_param(),
        ts.format("%Y"),
        ts.format("%B"),
        ts.format("%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn prefix_matches_bucket_layout() {
        let ts = Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap();
        assert_eq!(
            storage_prefix("satellite", SatelliteRegion::Nrw, ts),
            "satellite/NRW/2025/December/01/"
        );
        assert_eq!(
            storage_prefix("satellite/", SatelliteRegion::Boo, ts),
            "satellite/BOO/2025/December/01/"
        );
    }

    #[test]
    fn scene_row_deserializes() {
        let scene: SatelliteScene = serde_json::from_str(
            r#"{
                "location": "/satellite/NRW/2025/December/01/scene_0800.tif",
                "sensing_start": "2025-12-01T08:00:00Z",
                "sensing_end": "2025-12-01T08:10:00Z"
            }"#,
        )
        .unwrap();
        assert!(scene.location.ends_with(".tif"));
    }
}
