use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::contract::{ApiInfo, ProvisioningStep, API_KEY_AUTHORIZATION};
use crate::error::OutputError;
use crate::schema::{contact_model, ModelDescriptor, CONTACT_MODEL_NAME};

pub const OUTPUT_DOCUMENT_VERSION: &str = "1.4";
pub const MODEL_INTROSPECTION_VERSION: u32 = 1;
pub const ADDITIONAL_AUTHORIZATION_TYPE: &str = "AWS_IAM";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub data: DataSection,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSection {
    pub url: String,
    pub aws_region: String,
    pub api_key: String,
    pub default_authorization_type: String,
    pub authorization_types: Vec<String>,
    pub model_introspection: ModelIntrospection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIntrospection {
    pub version: u32,
    pub models: IndexMap<String, ModelDescriptor>,
}

/// Results gathered from the three provisioners; `None` marks a failed step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionedResources {
    pub table_arn: Option<String>,
    pub function_arn: Option<String>,
    pub api: Option<ApiInfo>,
}

impl ProvisionedResources {
    pub fn failed_steps(&self) -> Vec<ProvisioningStep> {
        let mut failed = Vec::new();
        if self.table_arn.is_none() {
            failed.push(ProvisioningStep::Table);
        }
        if self.function_arn.is_none() {
            failed.push(ProvisioningStep::Function);
        }
        if self.api.is_none() {
            failed.push(ProvisioningStep::Api);
        }
        failed
    }
}

impl OutputDocument {
    pub fn new(api: &ApiInfo, region: &str) -> Self {
        let mut models = IndexMap::new();
        models.insert(CONTACT_MODEL_NAME.to_string(), contact_model());

        Self {
            data: DataSection {
                url: api.endpoint.clone(),
                aws_region: region.to_string(),
                api_key: api.api_key.clone(),
                default_authorization_type: API_KEY_AUTHORIZATION.to_string(),
                authorization_types: vec![ADDITIONAL_AUTHORIZATION_TYPE.to_string()],
                model_introspection: ModelIntrospection {
                    version: MODEL_INTROSPECTION_VERSION,
                    models,
                },
            },
            version: OUTPUT_DOCUMENT_VERSION.to_string(),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds the document only when every step produced a result; otherwise
/// returns the steps that did not.
pub fn assemble_output_document(
    resources: &ProvisionedResources,
    region: &str,
) -> Result<OutputDocument, Vec<ProvisioningStep>> {
    match (&resources.table_arn, &resources.function_arn, &resources.api) {
        (Some(_), Some(_), Some(api)) => Ok(OutputDocument::new(api, region)),
        _ => Err(resources.failed_steps()),
    }
}

pub fn write_output_document(path: &Path, document: &OutputDocument) -> Result<(), OutputError> {
    let body = document.to_pretty_json()?;
    fs::write(path, body).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
