use chrono::{DateTime, Utc};
use contact_backend_core::config::ProvisioningConfig;
use contact_backend_core::contract::{api_key_expiry, ApiInfo};
use contact_backend_core::error::ProviderError;

use crate::adapters::graph_apis::GraphApis;

const COMPONENT: &str = "api_provisioner";

/// Creates the graph API, mints an API key valid for a year from `now` and
/// triggers schema creation. Schema compilation is not awaited.
pub fn provision_api(
    config: &ProvisioningConfig,
    graph_apis: &dyn GraphApis,
    now: DateTime<Utc>,
) -> Option<ApiInfo> {
    match try_provision_api(config, graph_apis, now) {
        Ok(info) => Some(info),
        Err(error) => {
            tracing::error!(
                component = COMPONENT,
                event = "api_failed",
                api = %config.graph_api.name,
                %error,
                "failed to create AppSync API: {error}"
            );
            None
        }
    }
}

fn try_provision_api(
    config: &ProvisioningConfig,
    graph_apis: &dyn GraphApis,
    now: DateTime<Utc>,
) -> Result<ApiInfo, ProviderError> {
    let spec = &config.graph_api;

    let api = graph_apis.create_api(&spec.name)?;
    tracing::info!(
        component = COMPONENT,
        event = "api_created",
        api_id = %api.api_id,
        "created AppSync API {}",
        api.api_id
    );

    let api_key = graph_apis.create_api_key(
        &api.api_id,
        &spec.api_key_description,
        api_key_expiry(now),
    )?;
    tracing::info!(
        component = COMPONENT,
        event = "api_key_created",
        api_id = %api.api_id,
        "created API key {api_key}"
    );

    graph_apis.start_schema_creation(&api.api_id, &spec.schema_definition)?;
    tracing::info!(
        component = COMPONENT,
        event = "schema_creation_started",
        api_id = %api.api_id,
        "started schema creation"
    );

    Ok(ApiInfo {
        api_id: api.api_id,
        api_key,
        endpoint: api.endpoint,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;
    use contact_backend_core::contract::GraphApiDescriptor;
    use contact_backend_core::schema::CONTACT_SCHEMA;

    use super::*;

    const ENDPOINT: &str = "https://abc.appsync-api.eu-central-1.amazonaws.com/graphql";

    #[derive(Default)]
    struct RecordingGraphApis {
        fail_on: Option<&'static str>,
        calls: Mutex<Vec<String>>,
        key_expiry: Mutex<Option<i64>>,
        schema: Mutex<Option<String>>,
    }

    impl RecordingGraphApis {
        fn record(&self, operation: &'static str) -> Result<(), ProviderError> {
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push(operation.to_string());
            if self.fail_on == Some(operation) {
                return Err(ProviderError::rejected(operation, "BadRequestException"));
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("poisoned mutex").clone()
        }
    }

    impl GraphApis for RecordingGraphApis {
        fn create_api(&self, name: &str) -> Result<GraphApiDescriptor, ProviderError> {
            self.record("create_api")?;
            assert_eq!(name, "my-portfolio-api");
            Ok(GraphApiDescriptor {
                api_id: "abc".to_string(),
                endpoint: ENDPOINT.to_string(),
            })
        }

        fn create_api_key(
            &self,
            api_id: &str,
            description: &str,
            expires_epoch_seconds: i64,
        ) -> Result<String, ProviderError> {
            self.record("create_api_key")?;
            assert_eq!(api_id, "abc");
            assert_eq!(description, "Contact form API key");
            *self.key_expiry.lock().expect("poisoned mutex") = Some(expires_epoch_seconds);
            Ok("da2-key".to_string())
        }

        fn start_schema_creation(
            &self,
            api_id: &str,
            definition: &str,
        ) -> Result<(), ProviderError> {
            self.record("start_schema_creation")?;
            assert_eq!(api_id, "abc");
            *self.schema.lock().expect("poisoned mutex") = Some(definition.to_string());
            Ok(())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn returns_id_key_and_endpoint() {
        let apis = RecordingGraphApis::default();

        let info = provision_api(&ProvisioningConfig::default(), &apis, now())
            .expect("api should be provisioned");

        assert_eq!(
            info,
            ApiInfo {
                api_id: "abc".to_string(),
                api_key: "da2-key".to_string(),
                endpoint: ENDPOINT.to_string(),
            }
        );
        assert_eq!(
            apis.calls(),
            vec!["create_api", "create_api_key", "start_schema_creation"]
        );
        assert_eq!(
            *apis.key_expiry.lock().expect("poisoned mutex"),
            Some(api_key_expiry(now()))
        );
        assert_eq!(
            apis.schema.lock().expect("poisoned mutex").as_deref(),
            Some(CONTACT_SCHEMA)
        );
    }

    #[test]
    fn failure_at_any_call_yields_none_and_stops() {
        for (fail_on, expected_calls) in [
            ("create_api", 1),
            ("create_api_key", 2),
            ("start_schema_creation", 3),
        ] {
            let apis = RecordingGraphApis {
                fail_on: Some(fail_on),
                ..RecordingGraphApis::default()
            };

            assert_eq!(
                provision_api(&ProvisioningConfig::default(), &apis, now()),
                None
            );
            assert_eq!(apis.calls().len(), expected_calls);
        }
    }
}
