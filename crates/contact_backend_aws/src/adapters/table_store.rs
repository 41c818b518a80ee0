use contact_backend_core::contract::{TableDescriptor, TableSpec};
use contact_backend_core::error::ProviderError;

pub trait TableStore {
    /// Creates an on-demand table with a single string partition key.
    fn create_table(&self, spec: &TableSpec) -> Result<TableDescriptor, ProviderError>;
}
