//! S3 object store adapter - Implements ObjectStorePort using rust-s3

use std::time::Duration;

use application::{error::ApplicationError, ports::ObjectStorePort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::CacheEntry;
use s3::{Bucket, Region, creds::Credentials, error::S3Error};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::{AwsConfig, StorageConfig};

/// Adapter for S3-compatible object storage
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    name: String,
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("bucket", &self.name)
            .field("region", &self.bucket.region().to_string())
            .finish_non_exhaustive()
    }
}

impl S3ObjectStore {
    /// Create a bucket handle from AWS and storage configuration
    ///
    /// Path-style addressing is always used so MinIO and LocalStack endpoints
    /// work without DNS tricks.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::Configuration`] if the credentials, region or
    /// bucket handle cannot be built.
    pub fn new(aws: &AwsConfig, storage: &StorageConfig) -> Result<Self, ApplicationError> {
        let credentials = Credentials::new(
            Some(aws.access_key_str()),
            Some(aws.secret_key_str()),
            None,
            None,
            None,
        )
        .map_err(|e| ApplicationError::Configuration(format!("Invalid S3 credentials: {e}")))?;

        let region = if let Some(ref endpoint) = aws.endpoint {
            Region::Custom {
                region: aws.region.clone(),
                endpoint: endpoint.clone(),
            }
        } else {
            aws.region
                .parse()
                .map_err(|e| ApplicationError::Configuration(format!("Invalid S3 region: {e}")))?
        };

        let mut bucket = Bucket::new(&storage.bucket_name, region, credentials)
            .map_err(|e| {
                ApplicationError::Configuration(format!("Failed to create S3 bucket handle: {e}"))
            })?
            .with_path_style();
        bucket.set_request_timeout(Some(Duration::from_secs(storage.request_timeout_secs)));

        Ok(Self {
            bucket,
            name: storage.bucket_name.clone(),
        })
    }

    fn classify(err: S3Error) -> ApplicationError {
        match err {
            S3Error::HttpFailWithBody(404, body) => {
                ApplicationError::NotFound(error_message(404, &body))
            },
            S3Error::HttpFailWithBody(status, body) => {
                ApplicationError::Store(error_message(status, &body))
            },
            other => ApplicationError::Store(other.to_string()),
        }
    }
}

/// `<Error>` document returned by S3 on failed requests
#[derive(Debug, Default, Deserialize)]
struct S3ErrorBody {
    #[serde(rename = "Code")]
    code: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
}

/// Human-readable message from an S3 XML error document
///
/// Falls back to the status code and raw body when the document has no
/// `<Code>`/`<Message>` elements.
fn error_message(status: u16, body: &str) -> String {
    let parsed = quick_xml::de::from_str::<S3ErrorBody>(body).unwrap_or_default();
    let code = non_empty(parsed.code);
    let message = non_empty(parsed.message);

    match (code, message) {
        (Some(code), Some(message)) => format!("{code} ({status}): {message}"),
        (Some(code), None) => format!("{code} ({status})"),
        (None, Some(message)) => format!("{message} ({status})"),
        (None, None) if body.trim().is_empty() => format!("HTTP {status}"),
        (None, None) => format!("HTTP {status}: {}", body.trim()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl ObjectStorePort for S3ObjectStore {
    #[instrument(skip(self), fields(bucket = %self.name))]
    async fn list(&self, prefix: &str) -> Result<Vec<CacheEntry>, ApplicationError> {
        let pages = self
            .bucket
            .list(prefix.to_string(), None)
            .await
            .map_err(Self::classify)?;

        let mut entries = Vec::new();
        for object in pages.into_iter().flat_map(|page| page.contents) {
            let last_modified = DateTime::parse_from_rfc3339(&object.last_modified)
                .map_err(|e| {
                    ApplicationError::Store(format!(
                        "invalid LastModified '{}' for {}: {e}",
                        object.last_modified, object.key
                    ))
                })?
                .with_timezone(&Utc);
            entries.push(CacheEntry::new(object.key, last_modified, object.size));
        }

        debug!(count = entries.len(), "Listed objects");
        Ok(entries)
    }

    #[instrument(skip(self), fields(bucket = %self.name))]
    async fn get(&self, key: &str) -> Result<Vec<u8>, ApplicationError> {
        let response = self.bucket.get_object(key).await.map_err(Self::classify)?;

        debug!(bytes = response.as_slice().len(), "Fetched object");
        Ok(response.to_vec())
    }

    #[instrument(skip(self, body), fields(bucket = %self.name, bytes = body.len()))]
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApplicationError> {
        self.bucket
            .put_object_with_content_type(key, &body, content_type)
            .await
            .map_err(Self::classify)?;

        debug!("Stored object");
        Ok(())
    }

    fn bucket(&self) -> &str {
        &self.name
    }
}
