use contact_backend_core::contract::{RoleDescriptor, RoleSpec};
use contact_backend_core::error::ProviderError;

pub trait ExecutionRoles {
    fn create_role(&self, spec: &RoleSpec) -> Result<RoleDescriptor, ProviderError>;

    fn attach_policy(&self, role_name: &str, policy_arn: &str) -> Result<(), ProviderError>;

    /// Managed policies currently attached to the role, or `None` while the
    /// role itself is not yet visible.
    fn attached_policies(&self, role_name: &str) -> Result<Option<Vec<String>>, ProviderError>;
}
