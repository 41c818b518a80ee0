use std::time::Duration;

use contact_backend_core::config::ProvisioningConfig;
use contact_backend_core::contract::{FunctionDescriptor, RoleDescriptor, RoleSpec};
use contact_backend_core::error::{ProviderError, ProvisionError};
use contact_backend_core::packaging::{package_function_source, FunctionSource};
use contact_backend_core::readiness::{poll_until_ready, Probe};

use crate::adapters::execution_roles::ExecutionRoles;
use crate::adapters::function_registry::{FunctionRegistration, FunctionRegistry};

const COMPONENT: &str = "function_provisioner";

/// Creates the execution role, waits for it to settle, then registers the
/// function with the packaged source. Returns the function ARN.
pub fn provision_function(
    config: &ProvisioningConfig,
    source: &FunctionSource,
    roles: &dyn ExecutionRoles,
    functions: &dyn FunctionRegistry,
    pause: &mut dyn FnMut(Duration),
) -> Option<String> {
    match try_provision_function(config, source, roles, functions, pause) {
        Ok(function) => {
            tracing::info!(
                component = COMPONENT,
                event = "function_created",
                function = %function.name,
                function_arn = %function.arn,
                "created Lambda function {}",
                function.arn
            );
            Some(function.arn)
        }
        Err(error) => {
            tracing::error!(
                component = COMPONENT,
                event = "function_failed",
                function = %config.function.name,
                %error,
                "failed to create Lambda function: {error}"
            );
            None
        }
    }
}

fn try_provision_function(
    config: &ProvisioningConfig,
    source: &FunctionSource,
    roles: &dyn ExecutionRoles,
    functions: &dyn FunctionRegistry,
    pause: &mut dyn FnMut(Duration),
) -> Result<FunctionDescriptor, ProvisionError> {
    let role = roles.create_role(&config.role)?;
    tracing::info!(
        component = COMPONENT,
        event = "role_created",
        role_arn = %role.arn,
        "created IAM role {}",
        role.arn
    );

    for policy_arn in &config.role.managed_policy_arns {
        roles.attach_policy(&role.name, policy_arn)?;
        tracing::debug!(
            component = COMPONENT,
            event = "policy_attached",
            role = %role.name,
            policy_arn = %policy_arn
        );
    }

    let spent_attempts = wait_for_role(config, &role, roles, pause)?;

    let archive = package_function_source(source)?;
    tracing::debug!(
        component = COMPONENT,
        event = "source_packaged",
        archive_bytes = archive.len()
    );

    let registration = FunctionRegistration {
        spec: &config.function,
        role_arn: &role.arn,
        archive: &archive,
    };
    let function = poll_until_ready(
        &format!("role {}", role.name),
        &config.readiness.after_attempts(spent_attempts),
        pause,
        |attempt| match functions.create_function(&registration) {
            Ok(function) => Ok(Probe::Ready(function)),
            Err(ProviderError::NotReady { message, .. }) => {
                tracing::info!(
                    component = COMPONENT,
                    event = "role_not_assumable",
                    attempt,
                    "function registration deferred: {message}"
                );
                Ok(Probe::Pending)
            }
            Err(error) => Err(error),
        },
    )?;

    Ok(function)
}

/// Returns how many checks the role took to settle.
fn wait_for_role(
    config: &ProvisioningConfig,
    role: &RoleDescriptor,
    roles: &dyn ExecutionRoles,
    pause: &mut dyn FnMut(Duration),
) -> Result<u32, ProvisionError> {
    let mut spent_attempts = 0;
    poll_until_ready(
        &format!("role {}", role.name),
        &config.readiness,
        pause,
        |attempt| {
            spent_attempts = attempt;
            let attached = roles.attached_policies(&role.name)?;
            if role_is_ready(&config.role, attached.as_deref()) {
                tracing::info!(
                    component = COMPONENT,
                    event = "role_ready",
                    role = %role.name,
                    attempt
                );
                Ok(Probe::Ready(()))
            } else {
                Ok(Probe::Pending)
            }
        },
    )?;
    Ok(spent_attempts)
}

fn role_is_ready(spec: &RoleSpec, attached: Option<&[String]>) -> bool {
    attached.is_some_and(|attached| {
        spec.managed_policy_arns
            .iter()
            .all(|required| attached.contains(required))
    })
}
