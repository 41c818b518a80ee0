use std::process::ExitCode;

use clap::Parser;
use contact_backend_aws::adapters::aws::AwsProviders;
use contact_backend_aws::cli::SetupArgs;
use contact_backend_aws::logging::{init_tracing, LogTarget};
use contact_backend_aws::workflow::{render_summary, run_provisioning, Providers};
use contact_backend_core::readiness::thread_pause;

#[tokio::main]
async fn main() -> ExitCode {
    let args = SetupArgs::parse();
    init_tracing(LogTarget::Terminal);

    let config = args.to_config();
    let source = args.function_source();
    let aws = AwsProviders::load(&config.region).await;
    let providers = Providers {
        tables: &aws.tables,
        roles: &aws.roles,
        functions: &aws.functions,
        graph_apis: &aws.graph_apis,
    };

    let mut pause = thread_pause;
    let report = run_provisioning(&config, &source, providers, &mut pause, chrono::Utc::now());
    print!("{}", render_summary(&report));

    if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
