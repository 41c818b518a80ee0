//! AWS SDK implementations of the provider ports.
//!
//! The ports are synchronous; each call bridges onto the async SDK with
//! `block_in_place`, so these adapters need a multi-thread tokio runtime.

use std::future::Future;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_appsync::types::AuthenticationType;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_lambda::error::ProvideErrorMetadata;
use aws_sdk_lambda::types::{FunctionCode, Runtime};
use contact_backend_core::contract::{
    FunctionDescriptor, GraphApiDescriptor, RoleDescriptor, RoleSpec, TableDescriptor, TableSpec,
};
use contact_backend_core::error::ProviderError;

use crate::adapters::execution_roles::ExecutionRoles;
use crate::adapters::function_registry::{FunctionRegistration, FunctionRegistry};
use crate::adapters::graph_apis::GraphApis;
use crate::adapters::table_store::TableStore;

const GRAPHQL_URI_KEY: &str = "GRAPHQL";
const ROLE_NOT_ASSUMABLE_HINT: &str = "cannot be assumed";

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// One client per provider service, all bound to the same region.
#[derive(Clone)]
pub struct AwsProviders {
    pub tables: DynamoDbTableStore,
    pub roles: IamExecutionRoles,
    pub functions: LambdaFunctionRegistry,
    pub graph_apis: AppSyncGraphApis,
}

impl AwsProviders {
    pub async fn load(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            tables: DynamoDbTableStore {
                client: aws_sdk_dynamodb::Client::new(&sdk_config),
            },
            roles: IamExecutionRoles {
                client: aws_sdk_iam::Client::new(&sdk_config),
            },
            functions: LambdaFunctionRegistry {
                client: aws_sdk_lambda::Client::new(&sdk_config),
            },
            graph_apis: AppSyncGraphApis {
                client: aws_sdk_appsync::Client::new(&sdk_config),
            },
        }
    }
}

#[derive(Clone)]
pub struct DynamoDbTableStore {
    client: aws_sdk_dynamodb::Client,
}

impl TableStore for DynamoDbTableStore {
    fn create_table(&self, spec: &TableSpec) -> Result<TableDescriptor, ProviderError> {
        let key_schema = KeySchemaElement::builder()
            .attribute_name(&spec.partition_key)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|error| ProviderError::rejected("CreateTable", error.to_string()))?;
        let key_attribute = AttributeDefinition::builder()
            .attribute_name(&spec.partition_key)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|error| ProviderError::rejected("CreateTable", error.to_string()))?;

        let output = block_on(
            self.client
                .create_table()
                .table_name(&spec.name)
                .key_schema(key_schema)
                .attribute_definitions(key_attribute)
                .billing_mode(BillingMode::PayPerRequest)
                .send(),
        )
        .map_err(|error| {
            let error = error.into_service_error();
            if error.is_resource_in_use_exception() {
                ProviderError::AlreadyExists {
                    resource: format!("table {}", spec.name),
                }
            } else {
                ProviderError::rejected(
                    "CreateTable",
                    aws_sdk_dynamodb::error::DisplayErrorContext(&error).to_string(),
                )
            }
        })?;

        let description = output
            .table_description()
            .ok_or_else(|| ProviderError::missing_field("CreateTable", "TableDescription"))?;
        let arn = description
            .table_arn()
            .ok_or_else(|| ProviderError::missing_field("CreateTable", "TableArn"))?;

        Ok(TableDescriptor {
            name: description.table_name().unwrap_or(&spec.name).to_string(),
            arn: arn.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct IamExecutionRoles {
    client: aws_sdk_iam::Client,
}

impl ExecutionRoles for IamExecutionRoles {
    fn create_role(&self, spec: &RoleSpec) -> Result<RoleDescriptor, ProviderError> {
        let output = block_on(
            self.client
                .create_role()
                .role_name(&spec.name)
                .assume_role_policy_document(spec.trust_policy_document())
                .description(&spec.description)
                .send(),
        )
        .map_err(|error| {
            let error = error.into_service_error();
            if error.is_entity_already_exists_exception() {
                ProviderError::AlreadyExists {
                    resource: format!("role {}", spec.name),
                }
            } else {
                ProviderError::rejected(
                    "CreateRole",
                    aws_sdk_iam::error::DisplayErrorContext(&error).to_string(),
                )
            }
        })?;

        let role = output
            .role()
            .ok_or_else(|| ProviderError::missing_field("CreateRole", "Role"))?;

        Ok(RoleDescriptor {
            name: role.role_name().to_string(),
            arn: role.arn().to_string(),
        })
    }

    fn attach_policy(&self, role_name: &str, policy_arn: &str) -> Result<(), ProviderError> {
        block_on(
            self.client
                .attach_role_policy()
                .role_name(role_name)
                .policy_arn(policy_arn)
                .send(),
        )
        .map(|_| ())
        .map_err(|error| {
            ProviderError::rejected(
                format!("AttachRolePolicy {policy_arn}"),
                aws_sdk_iam::error::DisplayErrorContext(&error.into_service_error()).to_string(),
            )
        })
    }

    fn attached_policies(&self, role_name: &str) -> Result<Option<Vec<String>>, ProviderError> {
        let visible = block_on(self.client.get_role().role_name(role_name).send());
        if let Err(error) = visible {
            let error = error.into_service_error();
            if error.is_no_such_entity_exception() {
                return Ok(None);
            }
            return Err(ProviderError::rejected(
                "GetRole",
                aws_sdk_iam::error::DisplayErrorContext(&error).to_string(),
            ));
        }

        let output = block_on(
            self.client
                .list_attached_role_policies()
                .role_name(role_name)
                .send(),
        );
        match output {
            Ok(output) => Ok(Some(
                output
                    .attached_policies()
                    .iter()
                    .filter_map(|policy| policy.policy_arn())
                    .map(str::to_string)
                    .collect(),
            )),
            Err(error) => {
                let error = error.into_service_error();
                if error.is_no_such_entity_exception() {
                    Ok(None)
                } else {
                    Err(ProviderError::rejected(
                        "ListAttachedRolePolicies",
                        aws_sdk_iam::error::DisplayErrorContext(&error).to_string(),
                    ))
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct LambdaFunctionRegistry {
    client: aws_sdk_lambda::Client,
}

impl FunctionRegistry for LambdaFunctionRegistry {
    fn create_function(
        &self,
        registration: &FunctionRegistration<'_>,
    ) -> Result<FunctionDescriptor, ProviderError> {
        let spec = registration.spec;
        let code = FunctionCode::builder()
            .zip_file(aws_sdk_lambda::primitives::Blob::new(registration.archive))
            .build();

        let output = block_on(
            self.client
                .create_function()
                .function_name(&spec.name)
                .runtime(Runtime::from(spec.runtime.as_str()))
                .role(registration.role_arn)
                .handler(&spec.handler)
                .code(code)
                .description(&spec.description)
                .timeout(spec.timeout_seconds)
                .memory_size(spec.memory_size_mb)
                .send(),
        )
        .map_err(|error| {
            let error = error.into_service_error();
            if error.is_resource_conflict_exception() {
                ProviderError::AlreadyExists {
                    resource: format!("function {}", spec.name),
                }
            } else if error.is_invalid_parameter_value_exception()
                && error
                    .message()
                    .is_some_and(|message| message.contains(ROLE_NOT_ASSUMABLE_HINT))
            {
                ProviderError::NotReady {
                    resource: format!("role {}", registration.role_arn),
                    message: error.message().unwrap_or_default().to_string(),
                }
            } else {
                ProviderError::rejected(
                    "CreateFunction",
                    aws_sdk_lambda::error::DisplayErrorContext(&error).to_string(),
                )
            }
        })?;

        let arn = output
            .function_arn()
            .ok_or_else(|| ProviderError::missing_field("CreateFunction", "FunctionArn"))?;

        Ok(FunctionDescriptor {
            name: output.function_name().unwrap_or(&spec.name).to_string(),
            arn: arn.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct AppSyncGraphApis {
    client: aws_sdk_appsync::Client,
}

impl GraphApis for AppSyncGraphApis {
    fn create_api(&self, name: &str) -> Result<GraphApiDescriptor, ProviderError> {
        let output = block_on(
            self.client
                .create_graphql_api()
                .name(name)
                .authentication_type(AuthenticationType::ApiKey)
                .send(),
        )
        .map_err(|error| {
            ProviderError::rejected(
                "CreateGraphqlApi",
                aws_sdk_appsync::error::DisplayErrorContext(&error.into_service_error())
                    .to_string(),
            )
        })?;

        let api = output
            .graphql_api()
            .ok_or_else(|| ProviderError::missing_field("CreateGraphqlApi", "GraphqlApi"))?;
        let api_id = api
            .api_id()
            .ok_or_else(|| ProviderError::missing_field("CreateGraphqlApi", "ApiId"))?;
        let endpoint = api
            .uris()
            .and_then(|uris| uris.get(GRAPHQL_URI_KEY))
            .ok_or_else(|| ProviderError::missing_field("CreateGraphqlApi", "Uris.GRAPHQL"))?;

        Ok(GraphApiDescriptor {
            api_id: api_id.to_string(),
            endpoint: endpoint.clone(),
        })
    }

    fn create_api_key(
        &self,
        api_id: &str,
        description: &str,
        expires_epoch_seconds: i64,
    ) -> Result<String, ProviderError> {
        let output = block_on(
            self.client
                .create_api_key()
                .api_id(api_id)
                .description(description)
                .expires(expires_epoch_seconds)
                .send(),
        )
        .map_err(|error| {
            ProviderError::rejected(
                "CreateApiKey",
                aws_sdk_appsync::error::DisplayErrorContext(&error.into_service_error())
                    .to_string(),
            )
        })?;

        output
            .api_key()
            .and_then(|key| key.id())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::missing_field("CreateApiKey", "ApiKey.Id"))
    }

    fn start_schema_creation(&self, api_id: &str, definition: &str) -> Result<(), ProviderError> {
        block_on(
            self.client
                .start_schema_creation()
                .api_id(api_id)
                .definition(aws_sdk_appsync::primitives::Blob::new(definition.as_bytes()))
                .send(),
        )
        .map(|_| ())
        .map_err(|error| {
            ProviderError::rejected(
                "StartSchemaCreation",
                aws_sdk_appsync::error::DisplayErrorContext(&error.into_service_error())
                    .to_string(),
            )
        })
    }
}
