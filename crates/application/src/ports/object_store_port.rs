//! Object store port
//!
//! Blob storage for cached weather payloads. Implementations may use S3,
//! MinIO or any S3-compatible service.

use async_trait::async_trait;
use domain::CacheEntry;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for key-addressed blob storage
///
/// Implementations report a missing bucket or object as
/// [`ApplicationError::NotFound`] and every other failure as
/// [`ApplicationError::Store`], each carrying the store's own message.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStorePort: Send + Sync {
    /// List every object whose key starts with `prefix`
    async fn list(&self, prefix: &str) -> Result<Vec<CacheEntry>, ApplicationError>;

    /// Read the full body of an object
    async fn get(&self, key: &str) -> Result<Vec<u8>, ApplicationError>;

    /// Write an object, replacing any existing object with the same key
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str)
    -> Result<(), ApplicationError>;

    /// Name of the bucket objects are stored in
    fn bucket(&self) -> &str;
}
