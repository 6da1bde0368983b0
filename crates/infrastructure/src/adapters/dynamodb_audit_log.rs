//! DynamoDB audit log adapter - Implements AuditLogPort using aws-sdk-dynamodb

use application::{error::ApplicationError, ports::AuditLogPort};
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client,
    config::{BehaviorVersion, Credentials, Region, retry::RetryConfig},
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::AttributeValue,
};
use domain::AuditLogEntry;
use tracing::{debug, instrument};

use crate::config::{AuditConfig, AwsConfig};

/// Adapter writing audit entries as DynamoDB items
///
/// Every column is stored as a string attribute: `log_id`, `city`,
/// `timestamp`, `s3_url`.
pub struct DynamoDbAuditLog {
    client: Client,
    table: String,
}

impl std::fmt::Debug for DynamoDbAuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoDbAuditLog")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl DynamoDbAuditLog {
    /// Create a client with static credentials and retries disabled
    pub fn new(aws: &AwsConfig, audit: &AuditConfig) -> Self {
        let credentials = Credentials::new(
            aws.access_key_str(),
            aws.secret_key_str(),
            None,
            None,
            "weather-cache-config",
        );

        let mut builder = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(aws.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled());
        if let Some(ref endpoint) = aws.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self::with_client(Client::from_conf(builder.build()), &audit.table_name)
    }

    /// Wrap an existing client
    pub fn with_client(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    fn describe<E, R>(err: &SdkError<E, R>) -> String
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        match (err.code(), err.message()) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (Some(code), None) => code.to_string(),
            _ => DisplayErrorContext(err).to_string(),
        }
    }
}

#[async_trait]
impl AuditLogPort for DynamoDbAuditLog {
    #[instrument(skip(self, entry), fields(table = %self.table, log_id = %entry.log_id))]
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), ApplicationError> {
        let mut request = self.client.put_item().table_name(&self.table);
        for (column, value) in entry.columns() {
            request = request.item(column, AttributeValue::S(value));
        }

        request
            .send()
            .await
            .map_err(|e| ApplicationError::Log(Self::describe(&e)))?;

        debug!("Audit item written");
        Ok(())
    }

    fn table(&self) -> &str {
        &self.table
    }
}
