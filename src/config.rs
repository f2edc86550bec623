//! Immutable, environment-sourced configuration.
//!
//! Everything the client needs to reach the remote collaborators (base URLs,
//! bearer tokens, object-storage credentials) is collected once into a
//! [`Config`] and passed into [`crate::HeavyRain`] explicitly. Nothing in the
//! fetch path reads process-wide state.
//!
//! A missing token or access key is *not* a local error: the remote API
//! answers with 401/403 and that is where the failure surfaces. Only
//! malformed values (a boolean that is neither `true` nor `false`, non-unicode
//! bytes) fail locally.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var} is not valid unicode")]
    NotUnicode { var: &'static str },

    #[error("invalid value '{value}' for {var}; expected 'true' or 'false'")]
    InvalidBool { var: &'static str, value: String },
}

/// Base URL and optional bearer token of one HTTP API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Bearer token sent on every request, when present.
    pub token: Option<String>,
}

/// Endpoint and credentials of an S3-compatible object store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Host (and port) of the store, with or without a scheme.
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    /// Whether to speak TLS when `endpoint` carries no scheme of its own.
    pub secure: bool,
}

impl StoreConfig {
    /// The endpoint as a full URL; `secure` picks the scheme when the
    /// configured value has none.
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else if self.secure {
            format!("https://{}", self.endpoint)
        } else {
            format!("http://{}", self.endpoint)
        }
    }
}

/// Radar API plus the bucket layout of its `.scu` archive.
#[derive(Debug, Clone)]
pub struct RadarConfig {
    pub api: ApiConfig,
    /// Object store holding the radar files; `None` when `MINIO_ENDPOINT`
    /// is not set, in which case only metadata listing works.
    pub store: Option<StoreConfig>,
    pub bucket: String,
    /// Key root the radar products live under.
    pub prefix: String,
}

/// Satellite API plus the bucket layout of its GeoTIFF archive.
#[derive(Debug, Clone)]
pub struct SatelliteConfig {
    pub api: ApiConfig,
    pub store: Option<StoreConfig>,
    pub bucket: String,
    /// Key root the raw scenes live under.
    pub prefix: String,
}

/// Everything the client reads from the environment, resolved once.
#[derive(Debug, Clone)]
pub struct Config {
    pub iot: ApiConfig,
    pub radar: RadarConfig,
    pub satellite: SatelliteConfig,
}

const DEFAULT_IOT_BASE: &str = "http://localhost:8030";
const DEFAULT_DATA_API_BASE: &str = "http://localhost:8030/heavyrain/data-api/api";
const DEFAULT_BUCKET: &str = "heavyrain";

impl Config {
    /// Loads `.env` from the working directory (if present), then reads the
    /// environment. The usual entry point for notebooks and demos.
    pub fn from_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Builds the configuration from the current process environment.
    ///
    /// Recognized variables: `IOT_API_BASE`, `IOT_API_TOKEN`,
    /// `RADAR_API_BASE`, `RADAR_API_TOKEN`, `RADAR_BUCKET`, `RADAR_PREFIX`,
    /// `MINIO_ENDPOINT`, `MINIO_ACCESS_KEY`, `MINIO_SECRET_KEY`,
    /// `MINIO_SECURE`, and the `SAT_*` counterparts (`SAT_API_BASE`,
    /// `SAT_API_TOKEN`, `SAT_MINIO_*`, `SAT_BUCKET`, `SAT_PREFIX`), where the
    /// satellite store falls back to the shared `MINIO_*` values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let iot = ApiConfig {
            base_url: base_url(var("IOT_API_BASE")?, DEFAULT_IOT_BASE),
            token: var("IOT_API_TOKEN")?,
        };

        let shared_store = store(
            var("MINIO_ENDPOINT")?,
            var("MINIO_ACCESS_KEY")?,
            var("MINIO_SECRET_KEY")?,
            parse_bool("MINIO_SECURE", var("MINIO_SECURE")?)?,
        );

        let radar = RadarConfig {
            api: ApiConfig {
                base_url: base_url(var("RADAR_API_BASE")?, DEFAULT_DATA_API_BASE),
                token: var("RADAR_API_TOKEN")?,
            },
            store: shared_store.clone(),
            bucket: var("RADAR_BUCKET")?.unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            prefix: var("RADAR_PREFIX")?.unwrap_or_else(|| "radar".to_string()),
        };

        let sat_store = store(
            var("SAT_MINIO_ENDPOINT")?,
            var("SAT_MINIO_ACCESS_KEY")?,
            var("SAT_MINIO_SECRET_KEY")?,
            parse_bool("SAT_MINIO_SECURE", var("SAT_MINIO_SECURE")?)?,
        );

        let satellite = SatelliteConfig {
            api: ApiConfig {
                base_url: base_url(var("SAT_API_BASE")?, DEFAULT_DATA_API_BASE),
                token: var("SAT_API_TOKEN")?,
            },
            store: sat_store.or(shared_store),
            bucket: var("SAT_BUCKET")?.unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            prefix: var("SAT_PREFIX")?.unwrap_or_else(|| "satellite".to_string()),
        };

        Ok(Config {
            iot,
            radar,
            satellite,
        })
    }
}

fn var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var: name }),
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    let url = value.unwrap_or_else(|| default.to_string());
    url.trim_end_matches('/').to_string()
}

fn parse_bool(name: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref() {
        None => Ok(true),
        Some("true") | Some("True") | Some("1") => Ok(true),
        Some("false") | Some("False") | Some("0") => Ok(false),
        Some(other) => Err(ConfigError::InvalidBool {
            var: name,
            value: other.to_string(),
        }),
    }
}

fn store(
    endpoint: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    secure: bool,
) -> Option<StoreConfig> {
    endpoint.map(|endpoint| StoreConfig {
        endpoint,
        access_key: access_key.unwrap_or_default(),
        secret_key: secret_key.unwrap_or_default(),
        secure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests mutate the process environment; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: &[&str] = &[
        "IOT_API_BASE",
        "IOT_API_TOKEN",
        "RADAR_API_BASE",
        "RADAR_API_TOKEN",
        "RADAR_BUCKET",
        "RADAR_PREFIX",
        "MINIO_ENDPOINT",
        "MINIO_ACCESS_KEY",
        "MINIO_SECRET_KEY",
        "MINIO_SECURE",
        "SAT_API_BASE",
        "SAT_API_TOKEN",
        "SAT_MINIO_ENDPOINT",
        "SAT_MINIO_ACCESS_KEY",
        "SAT_MINIO_SECRET_KEY",
        "SAT_MINIO_SECURE",
        "SAT_BUCKET",
        "SAT_PREFIX",
    ];

    fn clear_env() {
        for name in ALL_VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn defaults_apply_with_empty_environment() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.iot.base_url, "http://localhost:8030");
        assert!(config.iot.token.is_none());
        assert_eq!(
            config.radar.api.base_url,
            "http://localhost:8030/heavyrain/data-api/api"
        );
        assert_eq!(config.radar.bucket, "heavyrain");
        assert_eq!(config.radar.prefix, "radar");
        assert!(config.radar.store.is_none());
        assert_eq!(config.satellite.prefix, "satellite");
    }

    #[test]
    fn explicit_values_override_and_urls_are_trimmed() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("IOT_API_BASE", "https://rain.example.org/api/");
        std::env::set_var("IOT_API_TOKEN", "sekrit");
        std::env::set_var("MINIO_ENDPOINT", "minio.local:9000");
        std::env::set_var("MINIO_ACCESS_KEY", "minio");
        std::env::set_var("MINIO_SECRET_KEY", "minio123");
        std::env::set_var("MINIO_SECURE", "false");

        let config = Config::from_env().unwrap();

        assert_eq!(config.iot.base_url, "https://rain.example.org/api");
        assert_eq!(config.iot.token.as_deref(), Some("sekrit"));
        let store = config.radar.store.as_ref().unwrap();
        assert_eq!(store.endpoint_url(), "http://minio.local:9000");
        // The satellite store falls back to the shared MinIO settings.
        assert!(config.satellite.store.is_some());

        clear_env();
    }

    #[test]
    fn malformed_boolean_is_a_config_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("MINIO_ENDPOINT", "minio.local:9000");
        std::env::set_var("MINIO_SECURE", "yes please");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { var: "MINIO_SECURE", .. }));

        clear_env();
    }

    #[test]
    fn secure_endpoint_defaults_to_https() {
        let store = StoreConfig {
            endpoint: "minio.example.org".to_string(),
            access_key: String::new(),
            secret_key: String::new(),
            secure: true,
        };
        assert_eq!(store.endpoint_url(), "https://minio.example.org");

        let explicit = StoreConfig {
            endpoint: "http://minio.example.org".to_string(),
            secure: true,
            ..store
        };
        assert_eq!(explicit.endpoint_url(), "http://minio.example.org");
    }
}
