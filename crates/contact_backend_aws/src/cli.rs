use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use contact_backend_core::config::{
    ProvisioningConfig, ReadinessPolicy, DEFAULT_APP_ID, DEFAULT_ENV_NAME,
    DEFAULT_HANDLER_SOURCE, DEFAULT_OUTPUT_PATH, DEFAULT_REGION,
};
use contact_backend_core::packaging::FunctionSource;

#[derive(Debug, Parser)]
#[command(
    name = "setup_backend",
    about = "Create the contact backend resources and write amplify_outputs.json",
    long_about = "Creates the DynamoDB table, the Lambda execution role and function,\n\
                  and the AppSync API for the contact form, then writes the\n\
                  client configuration file. Every flag has a default."
)]
pub struct SetupArgs {
    /// AWS region all resources are created in
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,
    /// Amplify app the resources belong to
    #[arg(long, env = "AMPLIFY_APP_ID", default_value = DEFAULT_APP_ID)]
    pub app_id: String,
    /// Amplify environment name
    #[arg(long, env = "AMPLIFY_ENV_NAME", default_value = DEFAULT_ENV_NAME)]
    pub env_name: String,
    /// Source file packaged as the contact handler function
    #[arg(long, default_value = DEFAULT_HANDLER_SOURCE)]
    pub handler_source: PathBuf,
    /// Where the client configuration is written
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,
    /// Give up waiting for the execution role after this many seconds,
    /// counting both the role lookups and the function registration retries
    #[arg(long, default_value_t = 60)]
    pub readiness_timeout_secs: u64,
    /// Seconds between execution role readiness checks
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    pub readiness_interval_secs: u64,
}

impl SetupArgs {
    pub fn to_config(&self) -> ProvisioningConfig {
        ProvisioningConfig {
            region: self.region.clone(),
            app_id: self.app_id.clone(),
            env_name: self.env_name.clone(),
            readiness: ReadinessPolicy::new(
                Duration::from_secs(self.readiness_interval_secs),
                Duration::from_secs(self.readiness_timeout_secs),
            ),
            output_path: self.output.clone(),
            ..ProvisioningConfig::default()
        }
    }

    pub fn function_source(&self) -> FunctionSource {
        FunctionSource::File(self.handler_source.clone())
    }
}
