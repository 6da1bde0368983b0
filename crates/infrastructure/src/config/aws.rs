//! AWS credentials, object storage and audit table configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

// ==============================
// Credentials & Region
// ==============================

/// Static AWS credentials and region shared by S3 and DynamoDB
#[derive(Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Access key ID (sensitive - uses `SecretString`)
    #[serde(skip_serializing, default = "empty_secret")]
    pub access_key: SecretString,

    /// Secret access key (sensitive - uses `SecretString`)
    #[serde(skip_serializing, default = "empty_secret")]
    pub secret_key: SecretString,

    /// Region name (default: us-east-1)
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for S3/DynamoDB compatible services (MinIO, LocalStack)
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl std::fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsConfig")
            .field("access_key", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

pub(crate) fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            access_key: empty_secret(),
            secret_key: empty_secret(),
            region: default_region(),
            endpoint: None,
        }
    }
}

impl AwsConfig {
    /// Get the access key as a string reference
    #[must_use]
    pub fn access_key_str(&self) -> &str {
        self.access_key.expose_secret()
    }

    /// Get the secret key as a string reference
    #[must_use]
    pub fn secret_key_str(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

// ==============================
// Object Storage
// ==============================

/// S3 bucket holding cached weather records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket name (required)
    #[serde(default)]
    pub bucket_name: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

const fn default_request_timeout() -> u64 {
    30
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_name: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

// ==============================
// Audit Table
// ==============================

/// DynamoDB table receiving audit records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Table name (required)
    #[serde(default)]
    pub table_name: String,

    /// Fail the request when the audit write fails (default: true)
    ///
    /// When `false` the failure is logged and the fetched weather is returned.
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            table_name: String::new(),
            strict: true,
        }
    }
}
