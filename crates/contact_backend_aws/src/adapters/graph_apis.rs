use contact_backend_core::contract::GraphApiDescriptor;
use contact_backend_core::error::ProviderError;

pub trait GraphApis {
    /// Creates a graph API authenticated by API key.
    fn create_api(&self, name: &str) -> Result<GraphApiDescriptor, ProviderError>;

    /// Returns the id of the new key.
    fn create_api_key(
        &self,
        api_id: &str,
        description: &str,
        expires_epoch_seconds: i64,
    ) -> Result<String, ProviderError>;

    /// Triggers schema compilation; completion is not awaited.
    fn start_schema_creation(&self, api_id: &str, definition: &str) -> Result<(), ProviderError>;
}
