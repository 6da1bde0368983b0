//! Port for audit log persistence
//!
//! The audit log is append-only: entries are written once and never read back
//! or mutated by the service.

use async_trait::async_trait;
use domain::AuditLogEntry;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for audit log storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuditLogPort: Send + Sync {
    /// Append one entry
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), ApplicationError>;

    /// Name of the table entries are written to
    fn table(&self) -> &str;
}
