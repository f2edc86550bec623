use crate::rain_data::error::FetchError;
use log::warn;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// Issues one authenticated GET and decodes the JSON body.
///
/// Error mapping follows the three failure classes the notebooks care about:
/// 401/403 become [`FetchError::Auth`], transport failures (unreachable host,
/// timeout) become [`FetchError::Connection`], every other non-2xx status
/// becomes [`FetchError::HttpStatus`]. An absent token is not checked locally;
/// the remote API answers with 401 and that is the error surface.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    token: Option<&str>,
    params: &[(&str, String)],
) -> Result<T, FetchError> {
    let mut request = http.get(url).query(params);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            FetchError::Connection {
                url: url.to_string(),
                source: e,
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        warn!("auth rejected ({}) for {}", status, url);
        return Err(FetchError::Auth {
            url: url.to_string(),
            status,
        });
    }

    let response = response.error_for_status().map_err(|e| {
        warn!("HTTP error for {}: {:?}", url, e);
        FetchError::HttpStatus {
            url: url.to_string(),
            status,
            source: e,
        }
    })?;

    response.json::<T>().await.map_err(|e| FetchError::Decode {
        url: url.to_string(),
        source: e,
    })
}
