use contact_backend_aws::handlers::say_hello::{handle_say_hello, ApiGatewayResponse};
use contact_backend_aws::logging::{init_tracing, LogTarget};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_say_hello(&event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing(LogTarget::Lambda);
    lambda_runtime::run(service_fn(handle_request)).await
}
