use serde::{Deserialize, Serialize};
use serde_json::json;

pub const LAMBDA_SERVICE_PRINCIPAL: &str = "lambda.amazonaws.com";
pub const BASIC_EXECUTION_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";
pub const DYNAMODB_FULL_ACCESS_POLICY_ARN: &str = "arn:aws:iam::aws:policy/AmazonDynamoDBFullAccess";
pub const SES_FULL_ACCESS_POLICY_ARN: &str = "arn:aws:iam::aws:policy/AmazonSESFullAccess";

pub const API_KEY_AUTHORIZATION: &str = "API_KEY";
pub const API_KEY_VALIDITY_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningStep {
    Table,
    Function,
    Api,
}

impl ProvisioningStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Function => "function",
            Self::Api => "api",
        }
    }
}

impl std::fmt::Display for ProvisioningStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub partition_key: String,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            name: "Contact".to_string(),
            partition_key: "id".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSpec {
    pub name: String,
    pub description: String,
    pub service_principal: String,
    pub managed_policy_arns: Vec<String>,
}

impl RoleSpec {
    /// Trust policy letting the function service assume this role.
    pub fn trust_policy_document(&self) -> String {
        json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {
                        "Service": self.service_principal,
                    },
                    "Action": "sts:AssumeRole",
                }
            ],
        })
        .to_string()
    }
}

impl Default for RoleSpec {
    fn default() -> Self {
        Self {
            name: "contactHandlerLambdaRole".to_string(),
            description: "Role for contact handler Lambda function".to_string(),
            service_principal: LAMBDA_SERVICE_PRINCIPAL.to_string(),
            managed_policy_arns: vec![
                BASIC_EXECUTION_POLICY_ARN.to_string(),
                DYNAMODB_FULL_ACCESS_POLICY_ARN.to_string(),
                SES_FULL_ACCESS_POLICY_ARN.to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub runtime: String,
    pub handler: String,
    pub description: String,
    pub timeout_seconds: i32,
    pub memory_size_mb: i32,
}

impl Default for FunctionSpec {
    fn default() -> Self {
        Self {
            name: "contactHandler".to_string(),
            runtime: "nodejs20.x".to_string(),
            handler: "index.handler".to_string(),
            description: "Contact form handler function".to_string(),
            timeout_seconds: 30,
            memory_size_mb: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphApiSpec {
    pub name: String,
    pub api_key_description: String,
    pub schema_definition: String,
}

impl Default for GraphApiSpec {
    fn default() -> Self {
        Self {
            name: "my-portfolio-api".to_string(),
            api_key_description: "Contact form API key".to_string(),
            schema_definition: crate::schema::CONTACT_SCHEMA.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDescriptor {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphApiDescriptor {
    pub api_id: String,
    pub endpoint: String,
}

/// Identifier, access key and endpoint of a provisioned graph API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub api_id: String,
    pub api_key: String,
    pub endpoint: String,
}

/// Expiry for a freshly minted API key, in epoch seconds.
pub fn api_key_expiry(now: chrono::DateTime<chrono::Utc>) -> i64 {
    (now + chrono::Duration::days(API_KEY_VALIDITY_DAYS)).timestamp()
}
