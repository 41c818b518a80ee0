use contact_backend_core::contract::{FunctionDescriptor, FunctionSpec};
use contact_backend_core::error::ProviderError;

#[derive(Debug, Clone, Copy)]
pub struct FunctionRegistration<'a> {
    pub spec: &'a FunctionSpec,
    pub role_arn: &'a str,
    pub archive: &'a [u8],
}

pub trait FunctionRegistry {
    /// Registers the function. Reports `ProviderError::NotReady` when the
    /// execution role cannot be assumed yet.
    fn create_function(
        &self,
        registration: &FunctionRegistration<'_>,
    ) -> Result<FunctionDescriptor, ProviderError>;
}
