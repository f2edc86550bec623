//! Defines the data structures for a single IoT rain-gauge reading as returned
//! by the heavyRAIN `/iot` endpoint, including the loosely-typed numeric wrapper
//! used to survive malformed sensor payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A numeric field as it arrives from the wire: a proper number, a string that
/// may or may not parse as one, or nothing at all.
///
/// Gauge firmware and ingest layers are inconsistent about how they encode
/// measurements; the same field can show up as `12.4`, `"12.4"`, `"NaN"` or
/// `null` depending on the device generation. Deserializing straight into
/// `f64` would reject whole pages over a single bad row, so the raw shape is
/// kept and coercion happens lazily via [`MaybeNumber::as_f64`].
///
/// [`MaybeNumber::Missing`] is the sentinel for "no usable value" and is
/// distinct from a genuine `0.0` reading.
///
/// # Examples
///
/// ```
/// use heavyrain::MaybeNumber;
///
/// assert_eq!(MaybeNumber::Number(1.5).as_f64(), Some(1.5));
/// assert_eq!(MaybeNumber::Text("2.25".to_string()).as_f64(), Some(2.25));
/// assert_eq!(MaybeNumber::Text("NaN".to_string()).as_f64(), None);
/// assert_eq!(MaybeNumber::Missing.as_f64(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaybeNumber {
    /// A JSON number.
    Number(f64),
    /// A string payload, possibly numeric.
    Text(String),
    /// JSON `null` or an absent field.
    #[default]
    Missing,
    /// Anything else the ingest layer produced (arrays, objects, booleans).
    Other(serde_json::Value),
}

impl MaybeNumber {
    /// Coerces the value to a finite `f64`, returning `None` when coercion
    /// fails. Numeric strings are trimmed and parsed; `NaN` and infinities
    /// are treated as missing so they cannot poison downstream aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MaybeNumber::Number(v) if v.is_finite() => Some(*v),
            MaybeNumber::Number(_) => None,
            MaybeNumber::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            MaybeNumber::Missing | MaybeNumber::Other(_) => None,
        }
    }

    /// Returns `true` when [`as_f64`](Self::as_f64) would return `None`.
    pub fn is_missing(&self) -> bool {
        self.as_f64().is_none()
    }
}

/// One rain-gauge reading.
///
/// Mirrors a row of the JSON array returned by `GET /iot`. Only `timestamp`
/// is required; every other field may be absent depending on the device and
/// the query flags (for example readings without a resolved location have no
/// `city`). Fields this crate does not model are preserved in [`extra`]
/// so nothing from the server is silently discarded.
///
/// [`extra`]: RainReading::extra
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainReading {
    /// Measurement time in UTC (ISO-8601 on the wire).
    pub timestamp: DateTime<Utc>,
    /// LoRaWAN device EUI, if the reading is tied to a known device.
    #[serde(default)]
    pub dev_eui: Option<String>,
    /// City or station identifier the gauge is assigned to.
    #[serde(default)]
    pub city: Option<String>,
    /// Which ingest path produced the reading (e.g. `"auto"`).
    #[serde(default)]
    pub source: Option<String>,
    /// Gauge latitude. May arrive as a string from older firmware.
    #[serde(default)]
    pub latitude: MaybeNumber,
    /// Gauge longitude. Same caveat as `latitude`.
    #[serde(default)]
    pub longitude: MaybeNumber,
    /// The rain measurement in millimetres.
    #[serde(default)]
    pub rain_value: MaybeNumber,
    /// Any additional fields returned by the server.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RainReading {
    /// The rain measurement as a finite `f64`, or `None` when the value was
    /// missing or not coercible.
    pub fn rain_mm(&self) -> Option<f64> {
        self.rain_value.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading(value: serde_json::Value) -> RainReading {
        serde_json::from_value(json!({
            "timestamp": "2025-09-01T12:00:00Z",
            "dev_eui": "a81758fffe051d02",
            "city": "Dortmund",
            "rain_value": value,
        }))
        .expect("reading should deserialize")
    }

    #[test]
    fn numeric_rain_value_coerces() {
        assert_eq!(reading(json!(3.2)).rain_mm(), Some(3.2));
        assert_eq!(reading(json!(0)).rain_mm(), Some(0.0));
    }

    #[test]
    fn string_rain_value_coerces() {
        assert_eq!(reading(json!("4.75")).rain_mm(), Some(4.75));
        assert_eq!(reading(json!(" 1.5 ")).rain_mm(), Some(1.5));
    }

    #[test]
    fn nan_and_null_become_missing() {
        assert_eq!(reading(json!("NaN")).rain_mm(), None);
        assert_eq!(reading(json!(null)).rain_mm(), None);
        assert_eq!(reading(json!("not a number")).rain_mm(), None);
    }

    #[test]
    fn absent_rain_value_becomes_missing() {
        let r: RainReading = serde_json::from_value(json!({
            "timestamp": "2025-09-01T12:00:00Z",
        }))
        .unwrap();
        assert!(r.rain_value.is_missing());
        assert!(r.dev_eui.is_none());
        assert!(r.city.is_none());
    }

    #[test]
    fn unexpected_shapes_do_not_fail_the_record() {
        assert_eq!(reading(json!([1, 2])).rain_mm(), None);
        assert_eq!(reading(json!({"mm": 3})).rain_mm(), None);
        assert_eq!(reading(json!(true)).rain_mm(), None);
    }

    #[test]
    fn unknown_fields_are_retained() {
        let r: RainReading = serde_json::from_value(json!({
            "timestamp": "2025-09-01T12:00:00Z",
            "battery_v": 3.6,
            "rssi": -97,
        }))
        .unwrap();
        assert_eq!(r.extra.get("battery_v"), Some(&json!(3.6)));
        assert_eq!(r.extra.get("rssi"), Some(&json!(-97)));
    }

    #[test]
    fn string_coordinates_coerce() {
        let r: RainReading = serde_json::from_value(json!({
            "timestamp": "2025-09-01T12:00:00Z",
            "latitude": "51.51",
            "longitude": 7.46,
        }))
        .unwrap();
        assert_eq!(r.latitude.as_f64(), Some(51.51));
        assert_eq!(r.longitude.as_f64(), Some(7.46));
    }
}
