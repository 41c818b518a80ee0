use contact_backend_core::config::ProvisioningConfig;
use contact_backend_core::error::ProviderError;

use crate::adapters::table_store::TableStore;

const COMPONENT: &str = "table_provisioner";

/// Creates the contact table and returns its ARN.
pub fn provision_table(config: &ProvisioningConfig, tables: &dyn TableStore) -> Option<String> {
    match tables.create_table(&config.table) {
        Ok(table) => {
            tracing::info!(
                component = COMPONENT,
                event = "table_created",
                table = %table.name,
                table_arn = %table.arn,
                "created DynamoDB table {}",
                table.name
            );
            Some(table.arn)
        }
        Err(error @ ProviderError::AlreadyExists { .. }) => {
            tracing::error!(
                component = COMPONENT,
                event = "table_failed",
                table = %config.table.name,
                %error,
                "failed to create DynamoDB table: {error}; re-running the setup is not idempotent"
            );
            None
        }
        Err(error) => {
            tracing::error!(
                component = COMPONENT,
                event = "table_failed",
                table = %config.table.name,
                %error,
                "failed to create DynamoDB table: {error}"
            );
            None
        }
    }
}
