use crate::error::HeavyRainError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;

const DOWNLOAD_DIR_NAME: &str = "heavyrain";

/// ISO-8601 with a `Z` suffix, the timestamp format every heavyRAIN endpoint
/// expects in query parameters.
pub(crate) fn to_utc_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Default destination for downloaded artifacts when the caller gives none:
/// `<system cache dir>/heavyrain/<kind>`.
pub(crate) fn default_download_dir(kind: &str) -> Result<PathBuf, HeavyRainError> {
    dirs::cache_dir()
        .ok_or(HeavyRainError::DownloadDirResolution)
        .map(|p| p.join(DOWNLOAD_DIR_NAME).join(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso_timestamps_use_z_suffix() {
        let dt = Utc.with_ymd_and_hms(2025, 9, 1, 14, 30, 0).unwrap();
        assert_eq!(to_utc_iso(&dt), "2025-09-01T14:30:00Z");
    }
}
