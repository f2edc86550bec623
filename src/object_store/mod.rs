//! A thin list-and-download wrapper over S3-compatible object storage.
//!
//! The heavyRAIN deployment keeps radar `.scu` files and satellite GeoTIFFs
//! in MinIO buckets; MinIO speaks the S3 protocol, so the AWS SDK with an
//! explicit endpoint and path-style addressing is all that is needed.

pub mod error;

use crate::config::StoreConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::Client;
use aws_smithy_types_convert::date_time::DateTimeExt;
use chrono::{DateTime, Utc};
use error::ObjectStoreError;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// One listing row: key plus the metadata needed to pick objects by age.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Full object key inside the bucket.
    pub key: String,
    /// Object size in bytes.
    pub size: i64,
    /// Last-modified time reported by the store.
    pub last_modified: Option<DateTime<Utc>>,
}

/// Client for one bucket of an S3-compatible store.
pub struct ObjectStore {
    client: Client,
    bucket: String,
}

impl ObjectStore {
    /// Builds a client for `bucket` from endpoint and key-pair credentials.
    ///
    /// Path-style addressing is forced because MinIO does not resolve
    /// virtual-host bucket names by default. The region is a placeholder the
    /// SDK requires; MinIO ignores it.
    pub fn connect(store: &StoreConfig, bucket: impl Into<String>) -> Self {
        let credentials = Credentials::new(
            store.access_key.clone(),
            store.secret_key.clone(),
            None,
            None,
            "heavyrain-config",
        );
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-central-1"))
            .endpoint_url(store.endpoint_url())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();
        Self {
            client: Client::from_conf(config),
            bucket: bucket.into(),
        }
    }

    /// The bucket this store is bound to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Lists every object under `prefix`, following continuation tokens until
    /// the listing is exhausted. An empty result is not an error.
    pub async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>, ObjectStoreError> {
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(token) = &continuation {
                request = request.continuation_token(token);
            }
            let output = request.send().await?;

            for object in output.contents() {
                let Some(key) = object.key() else { continue };
                objects.push(StoredObject {
                    key: key.to_string(),
                    size: object.size().unwrap_or(0),
                    last_modified: object
                        .last_modified()
                        .and_then(|d| d.to_chrono_utc().ok()),
                });
            }

            continuation = if output.is_truncated() == Some(true) {
                output.next_continuation_token().map(str::to_string)
            } else {
                None
            };
            if continuation.is_none() {
                break;
            }
        }

        debug!(
            "listed {} object(s) under {}/{}",
            objects.len(),
            self.bucket,
            prefix
        );
        Ok(objects)
    }

    /// Downloads one object into `destination_dir`, streaming the body chunk
    /// by chunk. The file is named after the last path component of the key;
    /// a leading `/` on the key is stripped (the store wants relative keys).
    pub async fn download(
        &self,
        key: &str,
        destination_dir: &Path,
    ) -> Result<PathBuf, ObjectStoreError> {
        let key = key.trim_start_matches('/');
        let file_name = key
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ObjectStoreError::NoFileName(key.to_string()))?;

        tokio::fs::create_dir_all(destination_dir).await?;
        let file_path = destination_dir.join(file_name);
        let mut file = tokio::fs::File::create(&file_path).await?;

        let mut object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;

        while let Some(bytes) = object.body.try_next().await? {
            file.write_all(&bytes).await?;
        }
        file.flush().await?;

        info!("downloaded {}/{} to {:?}", self.bucket, key, file_path);
        Ok(file_path)
    }

    /// Downloads a batch of keys into `destination_dir`, in order.
    pub async fn download_all(
        &self,
        keys: impl IntoIterator<Item = impl AsRef<str>>,
        destination_dir: &Path,
    ) -> Result<Vec<PathBuf>, ObjectStoreError> {
        let mut paths = Vec::new();
        for key in keys {
            paths.push(self.download(key.as_ref(), destination_dir).await?);
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    fn store_config(endpoint: &str, secure: bool) -> StoreConfig {
        StoreConfig {
            endpoint: endpoint.to_string(),
            access_key: "minio".to_string(),
            secret_key: "minio123".to_string(),
            secure,
        }
    }

    #[test]
    fn connect_accepts_bare_and_full_endpoints() {
        // Construction is offline; only the endpoint URL shape matters here.
        let store = ObjectStore::connect(&store_config("minio.local:9000", false), "heavyrain");
        assert_eq!(store.bucket(), "heavyrain");

        let store = ObjectStore::connect(
            &store_config("https://minio.example.org", true),
            "heavyrain",
        );
        assert_eq!(store.bucket(), "heavyrain");
    }
}
