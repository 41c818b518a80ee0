use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use contact_backend_core::config::ProvisioningConfig;
use contact_backend_core::contract::ProvisioningStep;
use contact_backend_core::output::{
    assemble_output_document, write_output_document, ProvisionedResources,
};
use contact_backend_core::packaging::FunctionSource;

use crate::adapters::execution_roles::ExecutionRoles;
use crate::adapters::function_registry::FunctionRegistry;
use crate::adapters::graph_apis::GraphApis;
use crate::adapters::table_store::TableStore;
use crate::provisioners::api::provision_api;
use crate::provisioners::function::provision_function;
use crate::provisioners::table::provision_table;

const COMPONENT: &str = "workflow";

/// The provider ports the workflow drives, one per service.
#[derive(Clone, Copy)]
pub struct Providers<'a> {
    pub tables: &'a dyn TableStore,
    pub roles: &'a dyn ExecutionRoles,
    pub functions: &'a dyn FunctionRegistry,
    pub graph_apis: &'a dyn GraphApis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputOutcome {
    Written(PathBuf),
    Skipped { failed_steps: Vec<ProvisioningStep> },
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub resources: ProvisionedResources,
    pub output: OutputOutcome,
}

impl WorkflowReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.output, OutputOutcome::Written(_))
    }
}

/// Runs table, function and API provisioning in order, each regardless of
/// the others' outcome, then writes the output document if all succeeded.
///
/// Resources created before a failing step are left in place.
pub fn run_provisioning(
    config: &ProvisioningConfig,
    source: &FunctionSource,
    providers: Providers<'_>,
    pause: &mut dyn FnMut(Duration),
    now: DateTime<Utc>,
) -> WorkflowReport {
    tracing::info!(
        component = COMPONENT,
        event = "provisioning_started",
        region = %config.region,
        app_id = %config.app_id,
        env_name = %config.env_name,
        "setting up backend resources"
    );

    let resources = ProvisionedResources {
        table_arn: provision_table(config, providers.tables),
        function_arn: provision_function(
            config,
            source,
            providers.roles,
            providers.functions,
            pause,
        ),
        api: provision_api(config, providers.graph_apis, now),
    };

    let output = match assemble_output_document(&resources, &config.region) {
        Ok(document) => match write_output_document(&config.output_path, &document) {
            Ok(()) => {
                tracing::info!(
                    component = COMPONENT,
                    event = "output_written",
                    path = %config.output_path.display(),
                    "generated {}",
                    config.output_path.display()
                );
                OutputOutcome::Written(config.output_path.clone())
            }
            Err(error) => {
                tracing::error!(
                    component = COMPONENT,
                    event = "output_failed",
                    %error,
                    "failed to write output document: {error}"
                );
                OutputOutcome::WriteFailed(error.to_string())
            }
        },
        Err(failed_steps) => {
            tracing::warn!(
                component = COMPONENT,
                event = "output_skipped",
                failed_steps = %join_steps(&failed_steps),
                "skipping output document; some resources failed to create"
            );
            OutputOutcome::Skipped { failed_steps }
        }
    };

    WorkflowReport { resources, output }
}

fn join_steps(steps: &[ProvisioningStep]) -> String {
    steps
        .iter()
        .map(|step| step.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable summary printed by the CLI at the end of a run.
pub fn render_summary(report: &WorkflowReport) -> String {
    let mut lines = vec!["=".repeat(50)];

    match &report.output {
        OutputOutcome::Written(path) => {
            let resources = &report.resources;
            lines.push("Backend resources created successfully".to_string());
            if let Some(arn) = &resources.table_arn {
                lines.push(format!("DynamoDB table ARN:  {arn}"));
            }
            if let Some(arn) = &resources.function_arn {
                lines.push(format!("Lambda function ARN: {arn}"));
            }
            if let Some(api) = &resources.api {
                lines.push(format!("AppSync API ID:      {}", api.api_id));
                lines.push(format!("API key:             {}", api.api_key));
                lines.push(format!("GraphQL endpoint:    {}", api.endpoint));
            }
            lines.push(format!("Generated {}", path.display()));
        }
        OutputOutcome::Skipped { failed_steps } => lines.push(format!(
            "Some resources failed to create ({}). Check permissions.",
            join_steps(failed_steps)
        )),
        OutputOutcome::WriteFailed(error) => lines.push(format!(
            "Resources were created but the output document was not written: {error}"
        )),
    }

    let mut summary = lines.join("\n");
    summary.push('\n');
    summary
}

#[cfg(test)]
mod tests {
    use contact_backend_core::contract::ApiInfo;

    use super::*;

    fn complete_resources() -> ProvisionedResources {
        ProvisionedResources {
            table_arn: Some("arn:table".to_string()),
            function_arn: Some("arn:function".to_string()),
            api: Some(ApiInfo {
                api_id: "abc".to_string(),
                api_key: "da2-key".to_string(),
                endpoint: "https://abc/graphql".to_string(),
            }),
        }
    }

    #[test]
    fn summary_lists_every_resource_on_success() {
        let report = WorkflowReport {
            resources: complete_resources(),
            output: OutputOutcome::Written(PathBuf::from("amplify_outputs.json")),
        };

        let summary = render_summary(&report);

        assert!(report.succeeded());
        for expected in [
            "arn:table",
            "arn:function",
            "abc",
            "da2-key",
            "https://abc/graphql",
            "Generated amplify_outputs.json",
        ] {
            assert!(summary.contains(expected), "missing {expected} in {summary}");
        }
    }

    #[test]
    fn summary_names_failed_steps() {
        let report = WorkflowReport {
            resources: ProvisionedResources::default(),
            output: OutputOutcome::Skipped {
                failed_steps: vec![ProvisioningStep::Table, ProvisioningStep::Api],
            },
        };

        assert!(!report.succeeded());
        assert!(render_summary(&report).contains("(table, api)"));
    }

    #[test]
    fn summary_reports_write_failures() {
        let report = WorkflowReport {
            resources: complete_resources(),
            output: OutputOutcome::WriteFailed("permission denied".to_string()),
        };

        let summary = render_summary(&report);

        assert!(!report.succeeded());
        assert!(summary.starts_with(&"=".repeat(50)));
        assert!(summary.ends_with("was not written: permission denied\n"));
    }
}
